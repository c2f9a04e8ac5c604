//! Request and result types shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter request as received from a caller.
///
/// Dates are `YYYY-MM-DD` strings; `plot_options` names catalog derivations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub goals: Vec<String>,
    pub search_query: Option<String>,
    pub plot_options: Vec<String>,
}

/// Summary metrics over one filtered collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBundle {
    pub total_sessions: usize,
    pub average_time: f64,
    pub median_time: f64,
    pub total_time: u64,
    pub total_elapsed: u64,
    pub average_elapsed: f64,
    /// Counted over the canonical-inclusive collection
    pub sessions_per_goal: BTreeMap<String, usize>,
}

/// Result of an operation that may have nothing to work on.
///
/// `NoData` is an expected outcome, not an error: callers render it specially.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ready(T),
    NoData,
}

impl<T> Outcome<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Outcome::NoData)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::NoData => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::NoData => Outcome::NoData,
        }
    }
}
