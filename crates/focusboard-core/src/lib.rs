//! Filtering and aggregation over focus session records

mod config;
mod error;
pub mod filter;
pub mod stats;
mod types;

pub use config::{Config, DEFAULT_HISTOGRAM_BINS};
pub use error::{CoreError, Result};
pub use filter::{apply, FilterSpec};
pub use stats::{is_canonical_length, summarize, CanonicalSplit};
pub use types::{AggregateBundle, FilterRequest, Outcome};
