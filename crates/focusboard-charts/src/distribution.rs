//! Per-goal and per-duration distributions

use crate::base::{
    AxisValue, Category, ChartData, Derivation, DerivationName, GoalSummary, HistogramBin,
    InputSet, Point,
};
use focusboard_core::stats::{mean, quantile};
use focusboard_core::DEFAULT_HISTOGRAM_BINS;
use focusboard_store::SessionRecord;
use std::collections::BTreeMap;

/// Number of sessions per goal, most frequent first
pub struct GoalDistribution;

impl Derivation for GoalDistribution {
    fn name(&self) -> DerivationName {
        DerivationName::GoalDistribution
    }

    fn title(&self) -> &str {
        "Goal Distribution"
    }

    fn x_label(&self) -> &str {
        "Goal"
    }

    fn y_label(&self) -> &str {
        "Sessions"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(record.goal.as_str()).or_default() += 1;
        }

        let mut ordered: Vec<_> = counts.into_iter().collect();
        ordered.sort_by_key(|&(_, count)| std::cmp::Reverse(count));

        ChartData::Categories(
            ordered
                .into_iter()
                .map(|(goal, count)| Category {
                    label: goal.to_string(),
                    value: count as f64,
                })
                .collect(),
        )
    }
}

/// Equal-width histogram of declared session length
pub struct SessionDurationDistribution {
    bins: usize,
}

impl SessionDurationDistribution {
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }
}

impl Default for SessionDurationDistribution {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BINS)
    }
}

impl Derivation for SessionDurationDistribution {
    fn name(&self) -> DerivationName {
        DerivationName::SessionDurationDistribution
    }

    fn title(&self) -> &str {
        "Session Duration Distribution"
    }

    fn x_label(&self) -> &str {
        "Session Time (minutes)"
    }

    fn y_label(&self) -> &str {
        "Sessions"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        ChartData::Histogram(histogram(
            records.iter().map(|r| f64::from(r.time)).collect(),
            self.bins,
        ))
    }
}

fn histogram(values: Vec<f64>, bins: usize) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    // a single distinct value still gets `bins` buckets, centred on it
    let (lower, upper) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (upper - lower) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lower + width * i as f64).collect();
    edges.push(upper);

    // index against the reported edges, not a recomputed floor
    let interior = &edges[1..bins];
    let mut counts = vec![0usize; bins];
    for v in values {
        counts[interior.partition_point(|&e| e <= v)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
        })
        .collect()
}

/// Tracked minutes per goal, canonical-length sessions excluded
pub struct ElapsedTimeByGoal;

impl Derivation for ElapsedTimeByGoal {
    fn name(&self) -> DerivationName {
        DerivationName::ElapsedTimeByGoal
    }

    fn title(&self) -> &str {
        "Elapsed Time by Goal"
    }

    fn x_label(&self) -> &str {
        "Goal"
    }

    fn y_label(&self) -> &str {
        "Elapsed (minutes)"
    }

    fn input(&self) -> InputSet {
        InputSet::ExcludingCanonical
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for record in records {
            *totals.entry(record.goal.as_str()).or_default() += u64::from(record.elapsed);
        }

        ChartData::Categories(
            totals
                .into_iter()
                .map(|(goal, total)| Category {
                    label: goal.to_string(),
                    value: total as f64,
                })
                .collect(),
        )
    }
}

/// Declared versus tracked minutes, one point per session
pub struct TimeVsElapsed;

impl Derivation for TimeVsElapsed {
    fn name(&self) -> DerivationName {
        DerivationName::TimeVsElapsed
    }

    fn title(&self) -> &str {
        "Session Time vs Elapsed Time"
    }

    fn x_label(&self) -> &str {
        "Session Time (minutes)"
    }

    fn y_label(&self) -> &str {
        "Elapsed (minutes)"
    }

    fn input(&self) -> InputSet {
        InputSet::ExcludingCanonical
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        ChartData::Series(
            records
                .iter()
                .map(|r| Point {
                    x: AxisValue::Number(f64::from(r.time)),
                    y: f64::from(r.elapsed),
                })
                .collect(),
        )
    }
}

/// Box-plot summary of declared session length per goal
pub struct SessionLengthByGoal;

impl Derivation for SessionLengthByGoal {
    fn name(&self) -> DerivationName {
        DerivationName::SessionLengthByGoal
    }

    fn title(&self) -> &str {
        "Session Length by Goal"
    }

    fn x_label(&self) -> &str {
        "Goal"
    }

    fn y_label(&self) -> &str {
        "Session Time (minutes)"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        let mut by_goal: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in records {
            by_goal
                .entry(record.goal.as_str())
                .or_default()
                .push(f64::from(record.time));
        }

        ChartData::Summary(
            by_goal
                .into_iter()
                .map(|(goal, mut times)| {
                    times.sort_by(f64::total_cmp);
                    GoalSummary {
                        goal: goal.to_string(),
                        count: times.len(),
                        min: times[0],
                        q1: quantile(&times, 0.25),
                        median: quantile(&times, 0.5),
                        q3: quantile(&times, 0.75),
                        max: times[times.len() - 1],
                        mean: mean(&times),
                    }
                })
                .collect(),
        )
    }
}
