//! Where the events file lives, and whose birthday it is.
//!
//! Resolved from environment variables:
//!
//! - `HOME`: required; the events file is `$HOME/.days/events.csv`
//! - `BIRTHDATE`: optional `YYYY-MM-DD`; enables the birthday greeting

use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate};
use std::env;
use std::path::{Path, PathBuf};

const DATA_DIR: &str = ".days";
const EVENTS_FILE: &str = "events.csv";

/// Location of the events file and the optional birthdate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full path of the events file.
    pub events_path: PathBuf,
    /// The user's date of birth, if configured.
    pub birthdate: Option<NaiveDate>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = env::var("HOME").ok();
        let birthdate = env::var("BIRTHDATE").ok();
        Self::from_vars(home.as_deref(), birthdate.as_deref())
    }

    /// Build configuration from raw variable values.
    ///
    /// Blank values count as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use days::Config;
    /// use std::path::Path;
    ///
    /// let config = Config::from_vars(Some("/home/ann"), None).unwrap();
    /// assert_eq!(config.events_path, Path::new("/home/ann/.days/events.csv"));
    /// assert!(config.birthdate.is_none());
    /// ```
    pub fn from_vars(home: Option<&str>, birthdate: Option<&str>) -> Result<Self, ConfigError> {
        let home = home
            .filter(|h| !h.trim().is_empty())
            .ok_or(ConfigError::NoHomeDir)?;

        let birthdate = match birthdate.map(str::trim).filter(|b| !b.is_empty()) {
            Some(value) => Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(
                |source| ConfigError::InvalidBirthdate {
                    value: value.to_string(),
                    source,
                },
            )?),
            None => None,
        };

        Ok(Config {
            events_path: Path::new(home).join(DATA_DIR).join(EVENTS_FILE),
            birthdate,
        })
    }

    /// The directory holding the events file.
    pub fn data_dir(&self) -> &Path {
        self.events_path.parent().unwrap_or(Path::new(""))
    }

    /// Check that the data directory and the events file both exist.
    pub fn check_paths(&self) -> Result<(), ConfigError> {
        let dir = self.data_dir();
        if !dir.is_dir() {
            return Err(ConfigError::MissingDirectory(dir.to_path_buf()));
        }
        if !self.events_path.is_file() {
            return Err(ConfigError::MissingFile(self.events_path.clone()));
        }
        Ok(())
    }

    /// True when `today` has the same month and day as the birthdate.
    pub fn is_birthday(&self, today: NaiveDate) -> bool {
        self.birthdate
            .is_some_and(|b| b.month() == today.month() && b.day() == today.day())
    }
}
