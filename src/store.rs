use crate::error::{RowError, StoreError};
use crate::event::Event;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Columns per data row: `date,category,description`.
const FIELD_COUNT: usize = 3;

/// Date format of the `date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// True for exactly `YYYY-MM-DD`: no sign, padding or surrounding spaces.
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Owns the event collection and moves it to and from `events.csv`.
///
/// ```text
/// date,category,description
/// 2024-03-01,birthday,Alice
/// 2024-07-04,holiday,Independence Day
/// ```
///
/// Construct one store and pass it to whatever needs it. [`events_mut`]
/// hands out the live collection; changes made through it are what the next
/// [`save`] writes.
///
/// [`events_mut`]: EventStore::events_mut
/// [`save`]: EventStore::save
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
}

/// Outcome of a successful load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of events now held by the store.
    pub loaded: usize,
    /// Rows that were skipped, in file order.
    pub skipped: Vec<RowError>,
}

impl LoadReport {
    /// True when no row had to be skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// One data row as written. Field names double as the header.
#[derive(Serialize)]
struct Row<'a> {
    date: NaiveDate,
    category: &'a str,
    description: &'a str,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load events from the file at `path`, replacing the current ones.
    ///
    /// The first row is a header and is discarded. Blank lines are ignored.
    /// Rows without exactly three columns, or with a date that is not a
    /// valid `YYYY-MM-DD` calendar date, are logged, skipped and listed in
    /// the returned [`LoadReport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read, or cannot be
    /// parsed as delimited text at all. The store is left unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.load_from_reader(BufReader::new(file))?;
        debug!(
            "loaded {} events from {} ({} skipped)",
            report.loaded,
            path.display(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Load events from any reader. See [`EventStore::load`].
    ///
    /// A quoted field left open swallows every row after it, so input with
    /// an odd number of `"` is rejected as a whole.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> Result<LoadReport, StoreError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        if buf.iter().filter(|&&b| b == b'"').count() % 2 != 0 {
            return Err(StoreError::Structural(
                "unterminated quoted field".to_string(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(buf.as_slice());

        let mut events = Vec::new();
        let mut skipped = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |pos| pos.line());
            match parse_record(&record, line) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => {
                    warn!("skipping row: {err}");
                    skipped.push(err);
                }
            }
        }

        self.events = events;
        Ok(LoadReport {
            loaded: self.events.len(),
            skipped,
        })
    }

    /// Write all events to `path` and return how many rows were written.
    ///
    /// Writes a `date,category,description` header followed by one row per
    /// event, in the current order. Fields holding a comma or quote are
    /// quoted. The file is written next to `path` first and renamed into
    /// place, so a failed save never leaves a partial file behind.
    ///
    /// An empty store writes nothing: `path` is neither created nor
    /// truncated, and `Ok(0)` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created, written or
    /// renamed over `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        if self.events.is_empty() {
            debug!("no events, not writing {}", path.display());
            return Ok(0);
        }

        let tmp_path = tmp_path(path);
        match self.replace_file(path, &tmp_path) {
            Ok(written) => {
                debug!("saved {written} events to {}", path.display());
                Ok(written)
            }
            Err(err) => {
                match fs::remove_file(&tmp_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => warn!("cannot remove {}: {e}", tmp_path.display()),
                }
                Err(err)
            }
        }
    }

    /// Write all events to any writer. An empty store writes nothing.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<usize, StoreError> {
        if self.events.is_empty() {
            return Ok(0);
        }
        let mut writer = self.write_rows(writer)?;
        writer.flush()?;
        Ok(self.events.len())
    }

    /// The events, in their current order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The live event collection.
    ///
    /// This is the store's own vector, not a copy: events pushed, removed or
    /// reordered through it are what the next [`EventStore::save`] writes.
    pub fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }

    /// Append an event.
    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Distinct categories across all events, sorted ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use days::{Event, EventStore};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let mut store = EventStore::new();
    /// store.add(Event::new(date, "b", "one"));
    /// store.add(Event::new(date, "a", "two"));
    /// store.add(Event::new(date, "b", "three"));
    /// assert_eq!(store.categories(), vec!["a", "b"]);
    /// ```
    pub fn categories(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| e.category())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Sort events by date, oldest first. Events on the same date keep
    /// their relative order.
    pub fn sort_by_date(&mut self) {
        sort_by_date(&mut self.events);
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn write_rows<W: Write>(&self, writer: W) -> Result<csv::Writer<W>, StoreError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for event in &self.events {
            writer.serialize(Row {
                date: event.date(),
                category: event.category(),
                description: event.description(),
            })?;
        }
        Ok(writer)
    }

    /// Write every row to `tmp_path`, sync it, then rename it over `path`.
    fn replace_file(&self, path: &Path, tmp_path: &Path) -> Result<usize, StoreError> {
        let file = File::create(tmp_path).map_err(|source| StoreError::Open {
            path: tmp_path.to_path_buf(),
            source,
        })?;
        let writer = self.write_rows(file)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_data()?;
        drop(file);

        fs::rename(tmp_path, path)?;
        Ok(self.events.len())
    }
}

/// Stable ascending sort by date over any slice of events.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by_key(Event::date);
}

/// Turn one data row into an event.
///
/// `Ok(None)` means the row is blank and should be ignored silently.
fn parse_record(record: &csv::StringRecord, line: u64) -> Result<Option<Event>, RowError> {
    if record.iter().all(|field| field.trim().is_empty()) && record.len() <= 1 {
        return Ok(None);
    }
    if record.len() != FIELD_COUNT {
        return Err(RowError::Format {
            line,
            found: record.len(),
        });
    }

    let value = &record[0];
    let date = is_iso_date(value)
        .then(|| NaiveDate::parse_from_str(value, DATE_FORMAT).ok())
        .flatten()
        .ok_or_else(|| RowError::Date {
            line,
            value: value.to_string(),
        })?;
    Ok(Some(Event::new(date, &record[1], &record[2])))
}

/// Sibling path used while saving: `events.csv` -> `events.csv.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
