use std::io::Write;

use crate::domain::scheduling::time_slot::TimeSlot;
use crate::domain::utils::time_format::{format_clock_time, format_date};
use crate::error::Result;

const HEADERS: [&str; 5] = ["date", "startTime", "endTime", "available", "reason"];

/// Writes the slot grid as `;`-separated CSV with a header row.
pub fn write_slots_csv<W: Write>(slots: &[TimeSlot], writer: W) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    csv_wtr.write_record(HEADERS)?;

    for slot in slots {
        csv_wtr.write_record([
            format_date(slot.date),
            format_clock_time(slot.start_time),
            format_clock_time(slot.end_time),
            slot.available.to_string(),
            slot.reason.map(|reason| reason.as_str().to_string()).unwrap_or_default(),
        ])?;
    }

    csv_wtr.flush()?;
    Ok(())
}
