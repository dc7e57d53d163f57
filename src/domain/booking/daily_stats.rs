use chrono::NaiveDate;

use crate::api::booking_dto::DailyStatsDto;
use crate::domain::booking::booking::{Booking, BookingStatus};

/// Per-day summary shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_bookings: usize,
    pub completed_bookings: usize,

    /// Kilometres.
    pub total_distance: f64,

    /// SEK.
    pub total_revenue: i64,
}

impl DailyStats {
    pub fn for_date(date: NaiveDate, bookings: &[Booking]) -> Self {
        let on_date: Vec<&Booking> = bookings.iter().filter(|booking| booking.date == date).collect();

        DailyStats {
            date,
            total_bookings: on_date.len(),
            completed_bookings: on_date.iter().filter(|booking| booking.status == BookingStatus::Completed).count(),
            total_distance: on_date.iter().map(|booking| booking.travel_distance).sum(),
            total_revenue: on_date.iter().map(|booking| booking.total_cost).sum(),
        }
    }

    pub fn to_dto(&self) -> DailyStatsDto {
        DailyStatsDto {
            total_bookings: self.total_bookings,
            completed_bookings: self.completed_bookings,
            total_distance: self.total_distance,
            total_revenue: self.total_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_sums_only_the_requested_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let time = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();

        let mut done = Booking::interval(date, time(8), time(10));
        done.status = BookingStatus::Completed;
        done.travel_distance = 12.5;
        done.total_cost = 1000;

        let mut open = Booking::interval(date, time(13), time(15));
        open.travel_distance = 4.0;
        open.total_cost = 975;

        let mut elsewhere = Booking::interval(date.succ_opt().unwrap(), time(8), time(10));
        elsewhere.total_cost = 5000;

        let stats = DailyStats::for_date(date, &[done, open, elsewhere]);

        assert_eq!(stats.total_bookings, 2);
        assert_eq!(stats.completed_bookings, 1);
        assert!((stats.total_distance - 16.5).abs() < 1e-9);
        assert_eq!(stats.total_revenue, 1975);

        let json = serde_json::to_value(stats.to_dto()).unwrap();
        assert_eq!(json["totalRevenue"], 1975);
        assert_eq!(json["completedBookings"], 1);
    }
}
