mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use innochannel_core::event::{Event, EventManager, SharedListener, names};
use innochannel_core::kernel::Application;
use innochannel_core::model::{Booking, BookingData, BookingStatus, Observable};
use log::{error, info};

use crate::cli::{ConsoleListener, WebhookBody, parse_payload};

/// Innochannel: drive the SDK event core from the shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Configuration file (.json, .yaml or .toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start with events disabled
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fire a single event
    Fire {
        /// Event name, e.g. booking.created
        name: String,
        /// JSON payload
        #[arg(long)]
        payload: Option<String>,
    },
    /// Fire the event stored in a webhook body file
    Replay {
        /// File holding {"event": ..., "data": {...}}
        file: PathBuf,
    },
    /// Walk a booking through its lifecycle and print the events
    Demo,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let app = match Application::discover(args.config.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&app);

    if args.quiet {
        app.events().disable();
    }

    let result = match args.command {
        Some(Commands::Fire { name, payload }) => {
            parse_payload(payload.as_deref()).map(|value| fire(app.events(), Event::from_value(name, value)))
        }
        Some(Commands::Replay { file }) => WebhookBody::read(&file).map(|body| fire(app.events(), body.into_event())),
        Some(Commands::Demo) => demo(app.events()),
        None => {
            println!("No command given; try --help");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(app: &Application) {
    let level = app.config().logging.level_filter();
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Failed to initialize env_logger: {}", e);
    }
}

fn fire(events: &EventManager, event: Event) {
    let console: SharedListener = Arc::new(ConsoleListener);
    events.add_listener(event.name(), console, 0);
    info!("Firing '{}'", event.name());
    let outcome = if events.fire(&event) { "continue" } else { "halted" };
    println!("dispatched {}: {}", event.name(), outcome);
}

fn demo(events: &EventManager) -> innochannel_core::Result<()> {
    let console: SharedListener = Arc::new(ConsoleListener);
    for name in [
        names::BOOKING_CREATED,
        names::BOOKING_UPDATED,
        names::BOOKING_MODIFIED,
        names::BOOKING_CONFIRMED,
        names::BOOKING_CANCELLED,
        names::BOOKING_DELETED,
    ] {
        events.add_listener(name, Arc::clone(&console), 0);
    }

    let check_in = NaiveDate::from_ymd_opt(2026, 11, 3).ok_or("invalid demo date")?;
    let check_out = NaiveDate::from_ymd_opt(2026, 11, 6).ok_or("invalid demo date")?;
    let mut booking = Booking::new(
        BookingData {
            id: "BK-DEMO".to_string(),
            property_id: "PR-DEMO".to_string(),
            guest_name: "Demo Guest".to_string(),
            room_type: "DBL".to_string(),
            check_in,
            check_out,
            total_amount: 300.0,
            currency: "EUR".to_string(),
            status: BookingStatus::Pending,
            notes: None,
        },
        events,
    )?;
    booking.confirm()?;
    booking.without_events(|b| b.set_notes(Some("imported silently".to_string())))?;
    println!("dirty fields: {}", booking.get_changes().keys().cloned().collect::<Vec<_>>().join(", "));
    booking.cancel()?;
    booking.delete()?;
    Ok(())
}
