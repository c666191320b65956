//! Command-line front end for `~/.days/events.csv`.
//!
//! ```text
//! days                                   list events with time offsets
//! days add <date> <category> <text...>   append an event and save
//! days categories                        list distinct categories
//! ```

use chrono::{Local, NaiveDate};
use days::{Config, Event, EventStore};
use std::process::ExitCode;

const USAGE: &str = "usage: days [list | add <date> <category> <description> | categories]";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let config = Config::from_env()?;
    if config.is_birthday(today) {
        println!("Happy birthday!");
    }
    config.check_paths()?;

    let mut store = EventStore::new();
    let report = store.load(&config.events_path)?;
    for row in &report.skipped {
        eprintln!("{row}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("list") => {
            store.sort_by_date();
            for event in store.events() {
                println!("{event} - {}", event.difference_from(today).trim_end());
            }
        }
        Some("add") if args.len() >= 4 => {
            let date = NaiveDate::parse_from_str(&args[1], "%Y-%m-%d")?;
            let event = Event::new(date, args[2].as_str(), args[3..].join(" "));
            println!("Added: {event}");
            store.events_mut().push(event);
            store.save(&config.events_path)?;
        }
        Some("categories") => {
            for category in store.categories() {
                println!("{category}");
            }
        }
        Some(_) => {
            return Err(USAGE.into());
        }
    }
    Ok(())
}
