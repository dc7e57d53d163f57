use anyhow::Context;
use clap::{Parser, Subcommand};

use solar_scheduler::api::slot_export::write_slots_csv;
use solar_scheduler::domain::booking::booking::{Booking, ServiceType};
use solar_scheduler::domain::booking::daily_stats::DailyStats;
use solar_scheduler::domain::pricing::quote::Quote;
use solar_scheduler::domain::scheduling::scheduler::{Scheduler, SchedulerConfig};
use solar_scheduler::domain::utils::time_format::{format_clock_time, parse_clock_time, parse_date};
use solar_scheduler::{load_bookings, load_scheduler_config, logger};

#[derive(Parser, Debug)]
#[command(name = "solar_scheduler", version, about = "Appointment scheduling for solar panel cleaning")]
struct Cli {
    /// Scheduler configuration file (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the slot grid of a day.
    Slots {
        /// yyyy-MM-dd
        #[arg(long)]
        date: String,

        /// Existing bookings (JSON array).
        #[arg(long)]
        bookings: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check whether a job fits at a given start time.
    Check {
        #[arg(long)]
        date: String,

        /// HH:mm
        #[arg(long)]
        start: String,

        #[arg(long)]
        panels: u32,

        /// Minutes of travel to the site.
        #[arg(long, default_value_t = 0)]
        travel_time: i64,

        #[arg(long)]
        bookings: Option<String>,
    },

    /// Print the cost breakdown of a job.
    Quote {
        #[arg(long)]
        panels: u32,

        #[arg(long)]
        yearly: bool,

        #[arg(long)]
        residential: bool,

        #[arg(long, default_value_t = 0.0)]
        distance_km: f64,
    },

    /// Print the statistics of a day.
    Stats {
        #[arg(long)]
        date: String,

        #[arg(long)]
        bookings: String,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_scheduler_config(path).with_context(|| format!("loading configuration '{}'", path))?,
        None => SchedulerConfig::default(),
    };
    let scheduler = Scheduler::new(config);

    match cli.command {
        Command::Slots { date, bookings, format } => {
            let date = parse_date(&date)?;
            let bookings = read_bookings(bookings.as_deref())?;
            let slots = scheduler.generate_slots(date, &bookings);

            match format {
                OutputFormat::Table => {
                    for slot in &slots {
                        let status = match slot.reason {
                            Some(reason) => reason.as_str(),
                            None => "available",
                        };
                        println!("{} - {}  {}", format_clock_time(slot.start_time), format_clock_time(slot.end_time), status);
                    }
                }
                OutputFormat::Json => {
                    let dtos: Vec<_> = slots.iter().map(|slot| slot.to_dto()).collect();
                    println!("{}", serde_json::to_string_pretty(&dtos)?);
                }
                OutputFormat::Csv => write_slots_csv(&slots, std::io::stdout())?,
            }
        }
        Command::Check { date, start, panels, travel_time, bookings } => {
            let date = parse_date(&date)?;
            let start = parse_clock_time(&start)?;
            let bookings = read_bookings(bookings.as_deref())?;

            let verdict = scheduler.check(date, start, panels, &bookings, travel_time)?;
            let window = scheduler.service_window(date, start, panels, travel_time)?;

            println!(
                "{} {} - {} ({} min): {}",
                date,
                format_clock_time(window.start.time()),
                format_clock_time(window.end.time()),
                window.minutes(),
                verdict.as_str()
            );

            if !verdict.is_bookable() {
                std::process::exit(1);
            }
        }
        Command::Quote { panels, yearly, residential, distance_km } => {
            let service_type = if yearly { ServiceType::Yearly } else { ServiceType::OneTime };
            let quote = Quote::for_job(panels, service_type, residential, distance_km, &scheduler.config().pricing)?;

            println!("Service cost:    {:>6} SEK", quote.service_cost);
            println!("Residential fee: {:>6} SEK", quote.residential_fee);
            println!("Travel cost:     {:>6} SEK", quote.travel_cost);
            println!("Total:           {:>6} SEK", quote.total());
        }
        Command::Stats { date, bookings } => {
            let date = parse_date(&date)?;
            let bookings = load_bookings(&bookings)?;

            let stats = DailyStats::for_date(date, &bookings);
            println!("{}", serde_json::to_string_pretty(&stats.to_dto())?);
        }
    }

    Ok(())
}

fn read_bookings(path: Option<&str>) -> anyhow::Result<Vec<Booking>> {
    match path {
        Some(path) => load_bookings(path).with_context(|| format!("loading bookings '{}'", path)),
        None => Ok(Vec::new()),
    }
}
