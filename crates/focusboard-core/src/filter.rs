//! Conjunctive record filters: date range, goal set, free-text search

use crate::error::{CoreError, Result};
use crate::types::FilterRequest;
use chrono::NaiveDate;
use focusboard_store::SessionRecord;
use std::collections::BTreeSet;

/// Immutable set of predicates narrowing a record collection.
///
/// Every absent field is the identity for its predicate; present fields are
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Inclusive lower bound on the session's UTC calendar date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the session's UTC calendar date
    pub end_date: Option<NaiveDate>,
    /// Allowed goal tags (case-sensitive); empty means unrestricted
    pub goals: Option<BTreeSet<String>>,
    /// Case-insensitive substring searched in the string form of every field
    pub search_query: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec from a caller request, rejecting malformed dates up front
    pub fn from_request(request: &FilterRequest) -> Result<Self> {
        Ok(Self {
            start_date: parse_date_bound("start_date", request.start_date.as_deref())?,
            end_date: parse_date_bound("end_date", request.end_date.as_deref())?,
            goals: if request.goals.is_empty() {
                None
            } else {
                Some(request.goals.iter().cloned().collect())
            },
            search_query: request
                .search_query
                .as_ref()
                .filter(|q| !q.is_empty())
                .cloned(),
        })
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.goals = Some(goals.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Apply to `records`, preserving input order
    pub fn apply(&self, records: &[SessionRecord]) -> Vec<SessionRecord> {
        let query = self.search_query.as_ref().map(|q| q.to_lowercase());

        let filtered: Vec<SessionRecord> = records
            .iter()
            .filter(|r| self.matches_dates(r))
            .filter(|r| self.matches_goals(r))
            .filter(|r| query.as_deref().map_or(true, |q| matches_search(r, q)))
            .cloned()
            .collect();

        tracing::debug!(
            input = records.len(),
            output = filtered.len(),
            "applied session filter"
        );
        filtered
    }

    pub fn matches(&self, record: &SessionRecord) -> bool {
        self.matches_dates(record)
            && self.matches_goals(record)
            && self
                .search_query
                .as_ref()
                .map_or(true, |q| matches_search(record, &q.to_lowercase()))
    }

    fn matches_dates(&self, record: &SessionRecord) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(date) = record.date() else {
            return false;
        };
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    fn matches_goals(&self, record: &SessionRecord) -> bool {
        match &self.goals {
            Some(goals) if !goals.is_empty() => goals.contains(&record.goal),
            _ => true,
        }
    }
}

/// Apply `spec` to `records`; an empty result is a valid outcome
pub fn apply(records: &[SessionRecord], spec: &FilterSpec) -> Vec<SessionRecord> {
    spec.apply(records)
}

// Matches if ANY field's string form contains the (lowercased) query,
// including the numeric ones: "30" finds a 30-minute session.
fn matches_search(record: &SessionRecord, lowered_query: &str) -> bool {
    record
        .field_strings()
        .iter()
        .any(|field| field.to_lowercase().contains(lowered_query))
}

fn parse_date_bound(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| CoreError::InvalidDate {
                field,
                value: raw.to_string(),
            }),
    }
}
