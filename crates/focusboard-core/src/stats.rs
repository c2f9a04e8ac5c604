//! Summary statistics and the canonical-length session split

use crate::types::AggregateBundle;
use focusboard_store::SessionRecord;
use std::collections::BTreeMap;

/// Default session length offered by the timer, in minutes
pub const DEFAULT_CANONICAL_MINUTES: u32 = 60;

/// True when a session ran exactly the preset length.
///
/// Such sessions say nothing about variance, so variance-oriented charts skip
/// them. Count-oriented and raw time-series views keep them.
pub fn is_canonical_length(record: &SessionRecord, canonical_minutes: u32) -> bool {
    record.time == canonical_minutes
}

/// A filtered collection tagged once into its full and canonical-exclusive views
#[derive(Debug, Clone)]
pub struct CanonicalSplit<'a> {
    full: Vec<&'a SessionRecord>,
    excluding_canonical: Vec<&'a SessionRecord>,
}

impl<'a> CanonicalSplit<'a> {
    pub fn new(records: &'a [SessionRecord], canonical_minutes: u32) -> Self {
        let full: Vec<&SessionRecord> = records.iter().collect();
        let excluding_canonical = full
            .iter()
            .copied()
            .filter(|r| !is_canonical_length(r, canonical_minutes))
            .collect();
        Self {
            full,
            excluding_canonical,
        }
    }

    pub fn full(&self) -> &[&'a SessionRecord] {
        &self.full
    }

    pub fn excluding_canonical(&self) -> &[&'a SessionRecord] {
        &self.excluding_canonical
    }

    pub fn canonical_count(&self) -> usize {
        self.full.len() - self.excluding_canonical.len()
    }
}

/// Summarize a collection; empty input yields zeros rather than an error
pub fn summarize(records: &[SessionRecord]) -> AggregateBundle {
    summarize_refs(&records.iter().collect::<Vec<_>>())
}

pub fn summarize_refs(records: &[&SessionRecord]) -> AggregateBundle {
    let total_sessions = records.len();
    let total_time: u64 = records.iter().map(|r| u64::from(r.time)).sum();
    let total_elapsed: u64 = records.iter().map(|r| u64::from(r.elapsed)).sum();

    let mut times: Vec<f64> = records.iter().map(|r| f64::from(r.time)).collect();
    times.sort_by(f64::total_cmp);

    let mut sessions_per_goal = BTreeMap::new();
    for record in records {
        *sessions_per_goal.entry(record.goal.clone()).or_insert(0) += 1;
    }

    AggregateBundle {
        total_sessions,
        average_time: mean_of(total_time, total_sessions),
        median_time: quantile(&times, 0.5),
        total_time,
        total_elapsed,
        average_elapsed: mean_of(total_elapsed, total_sessions),
        sessions_per_goal,
    }
}

/// Linear-interpolated quantile of an ascending slice; 0 for an empty slice
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let weight = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn mean_of(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}
