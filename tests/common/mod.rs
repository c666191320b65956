#![allow(dead_code)]

use chrono::NaiveDate;
use days::Event;
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "date,category,description\n";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn event(y: i32, m: u32, d: u32, category: &str, description: &str) -> Event {
    Event::new(date(y, m, d), category, description)
}

/// Write `body` under a header row to `events.csv` in `dir`.
pub fn write_events_file(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("events.csv");
    fs::write(&path, format!("{HEADER}{body}")).unwrap();
    path
}
