//! Session record types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single logged focus session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Timestamp text exactly as it was persisted
    pub created_at_raw: String,
    /// Parsed timestamp, `None` when the persisted text is not a valid instant
    pub created_at: Option<DateTime<Utc>>,
    /// Nominal session length in minutes
    pub time: u32,
    /// Actually tracked minutes
    pub elapsed: u32,
    pub goal: String,
    pub ended: bool,
    pub work: String,
}

impl SessionRecord {
    pub fn new(
        created_at_raw: impl Into<String>,
        time: u32,
        elapsed: u32,
        goal: impl Into<String>,
        ended: bool,
        work: impl Into<String>,
    ) -> Self {
        let created_at_raw = created_at_raw.into();
        let created_at = parse_timestamp(&created_at_raw);
        Self {
            created_at_raw,
            created_at,
            time,
            elapsed,
            goal: goal.into(),
            ended,
            work: work.into(),
        }
    }

    pub fn has_valid_timestamp(&self) -> bool {
        self.created_at.is_some()
    }

    /// Calendar date (UTC) of the session start
    pub fn date(&self) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.date_naive())
    }

    /// String form of every field, in column order.
    ///
    /// Free-text search runs against all of these, numeric columns included.
    pub fn field_strings(&self) -> [Cow<'_, str>; 6] {
        [
            Cow::Borrowed(self.created_at_raw.as_str()),
            Cow::Owned(self.time.to_string()),
            Cow::Owned(self.elapsed.to_string()),
            Cow::Borrowed(self.goal.as_str()),
            Cow::Borrowed(format_ended(self.ended)),
            Cow::Borrowed(self.work.as_str()),
        ]
    }
}

/// Parse a persisted timestamp; unparseable text yields `None`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(ts) = DateTime::parse_from_str(raw, fmt) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_ended(ended: bool) -> &'static str {
    if ended {
        "True"
    } else {
        "False"
    }
}

pub fn parse_ended(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
