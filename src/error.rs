//! Error types for loading, saving and locating the events file.
//!
//! File-level failures ([`StoreError`]) abort the operation and leave the
//! in-memory events untouched. Row-level failures ([`RowError`]) are
//! recovered during a load: the row is skipped and reported in the
//! [`LoadReport`](crate::LoadReport).

use std::io;
use std::path::PathBuf;

/// A load or save that could not complete.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The events file could not be opened or created.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading, writing or replacing the file failed part way.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file could not be read as delimited text at all, e.g. a
    /// quoted field that is never closed.
    #[error("malformed events file: {0}")]
    Structural(String),
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            StoreError::Io(err.into())
        } else {
            StoreError::Structural(err.to_string())
        }
    }
}

/// A data row that was skipped during a load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// The row does not have exactly `date,category,description`.
    #[error("line {line}: expected 3 columns, found {found}")]
    Format { line: u64, found: usize },

    /// The `date` column is not a valid `YYYY-MM-DD` calendar date.
    #[error("line {line}: bad date: {value}")]
    Date { line: u64, value: String },
}

impl RowError {
    /// The 1-based line of the file the row started on.
    pub fn line(&self) -> u64 {
        match self {
            RowError::Format { line, .. } | RowError::Date { line, .. } => *line,
        }
    }
}

/// The storage location could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `HOME` is unset or blank.
    #[error("unable to determine user home directory")]
    NoHomeDir,

    /// `BIRTHDATE` is set but not a `YYYY-MM-DD` date.
    #[error("invalid BIRTHDATE {value:?}: {source}")]
    InvalidBirthdate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The `.days` data directory is missing.
    #[error("{} directory does not exist, please create it", .0.display())]
    MissingDirectory(PathBuf),

    /// The events file is missing.
    #[error("{} file not found", .0.display())]
    MissingFile(PathBuf),
}
