mod config;
mod error;
mod event;
mod period;
mod store;

pub use config::Config;
pub use error::{ConfigError, RowError, StoreError};
pub use event::Event;
pub use period::Period;
pub use store::{EventStore, LoadReport, sort_by_date};
