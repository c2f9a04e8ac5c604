//! Session record storage: the persisted delimited file and its in-memory form

mod error;
mod io;
mod paths;
mod types;

pub use error::{Result, StoreError};
pub use io::{atomic_write, read_records, write_records, CsvRecordStore, RecordSource, COLUMNS};
pub use paths::Paths;
pub use types::{format_ended, parse_ended, parse_timestamp, SessionRecord};
