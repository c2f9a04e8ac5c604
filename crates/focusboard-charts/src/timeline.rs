//! Time-series derivations grouped by session timestamp or calendar date

use crate::base::{AxisValue, ChartData, Derivation, DerivationName, InputSet, Point};
use chrono::NaiveDate;
use focusboard_store::SessionRecord;
use std::collections::BTreeMap;

/// Group records with a valid timestamp by UTC calendar date
fn by_date<'a>(records: &[&'a SessionRecord]) -> BTreeMap<NaiveDate, Vec<&'a SessionRecord>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&SessionRecord>> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date() {
            groups.entry(date).or_default().push(*record);
        }
    }
    groups
}

fn date_series<F>(records: &[&SessionRecord], value: F) -> ChartData
where
    F: Fn(&[&SessionRecord]) -> f64,
{
    ChartData::Series(
        by_date(records)
            .into_iter()
            .map(|(date, group)| Point {
                x: AxisValue::Date(date),
                y: value(group.as_slice()),
            })
            .collect(),
    )
}

/// Declared session length of each session, in start order
pub struct SessionTimeOverTime;

impl Derivation for SessionTimeOverTime {
    fn name(&self) -> DerivationName {
        DerivationName::SessionTimeOverTime
    }

    fn title(&self) -> &str {
        "Session Time Over Time"
    }

    fn x_label(&self) -> &str {
        "Date"
    }

    fn y_label(&self) -> &str {
        "Session Time (minutes)"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        let mut points: Vec<_> = records
            .iter()
            .filter_map(|r| r.created_at.map(|ts| (ts, r.time)))
            .collect();
        // stable: sessions sharing a timestamp keep input order
        points.sort_by_key(|(ts, _)| *ts);

        ChartData::Series(
            points
                .into_iter()
                .map(|(ts, time)| Point {
                    x: AxisValue::Timestamp(ts),
                    y: f64::from(time),
                })
                .collect(),
        )
    }
}

pub struct SessionsOverTime;

impl Derivation for SessionsOverTime {
    fn name(&self) -> DerivationName {
        DerivationName::SessionsOverTime
    }

    fn title(&self) -> &str {
        "Sessions Over Time"
    }

    fn x_label(&self) -> &str {
        "Date"
    }

    fn y_label(&self) -> &str {
        "Sessions"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        date_series(records, |group| group.len() as f64)
    }
}

pub struct AverageElapsedOverTime;

impl Derivation for AverageElapsedOverTime {
    fn name(&self) -> DerivationName {
        DerivationName::AverageElapsedOverTime
    }

    fn title(&self) -> &str {
        "Average Elapsed Time Over Time"
    }

    fn x_label(&self) -> &str {
        "Date"
    }

    fn y_label(&self) -> &str {
        "Average Elapsed (minutes)"
    }

    fn input(&self) -> InputSet {
        InputSet::ExcludingCanonical
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        date_series(records, |group| {
            let total: u64 = group.iter().map(|r| u64::from(r.elapsed)).sum();
            total as f64 / group.len() as f64
        })
    }
}

pub struct TotalElapsedOverTime;

impl Derivation for TotalElapsedOverTime {
    fn name(&self) -> DerivationName {
        DerivationName::TotalElapsedOverTime
    }

    fn title(&self) -> &str {
        "Total Elapsed Time Over Time"
    }

    fn x_label(&self) -> &str {
        "Date"
    }

    fn y_label(&self) -> &str {
        "Total Elapsed (minutes)"
    }

    fn input(&self) -> InputSet {
        InputSet::ExcludingCanonical
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        date_series(records, |group| {
            group.iter().map(|r| u64::from(r.elapsed)).sum::<u64>() as f64
        })
    }
}
