//! Derivation trait and chart dataset types

use crate::error::ChartError;
use chrono::{DateTime, NaiveDate, Utc};
use focusboard_store::SessionRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The fixed set of chart derivations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationName {
    SessionTimeOverTime,
    GoalDistribution,
    SessionDurationDistribution,
    ElapsedTimeByGoal,
    TimeVsElapsed,
    AverageElapsedOverTime,
    SessionsOverTime,
    TotalElapsedOverTime,
    SessionsByWeekday,
    SessionLengthByGoal,
    SessionsHeatmap,
}

impl DerivationName {
    pub const ALL: [DerivationName; 11] = [
        DerivationName::SessionTimeOverTime,
        DerivationName::GoalDistribution,
        DerivationName::SessionDurationDistribution,
        DerivationName::ElapsedTimeByGoal,
        DerivationName::TimeVsElapsed,
        DerivationName::AverageElapsedOverTime,
        DerivationName::SessionsOverTime,
        DerivationName::TotalElapsedOverTime,
        DerivationName::SessionsByWeekday,
        DerivationName::SessionLengthByGoal,
        DerivationName::SessionsHeatmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DerivationName::SessionTimeOverTime => "session_time_over_time",
            DerivationName::GoalDistribution => "goal_distribution",
            DerivationName::SessionDurationDistribution => "session_duration_distribution",
            DerivationName::ElapsedTimeByGoal => "elapsed_time_by_goal",
            DerivationName::TimeVsElapsed => "time_vs_elapsed",
            DerivationName::AverageElapsedOverTime => "average_elapsed_over_time",
            DerivationName::SessionsOverTime => "sessions_over_time",
            DerivationName::TotalElapsedOverTime => "total_elapsed_over_time",
            DerivationName::SessionsByWeekday => "sessions_by_weekday",
            DerivationName::SessionLengthByGoal => "session_length_by_goal",
            DerivationName::SessionsHeatmap => "sessions_heatmap",
        }
    }
}

impl fmt::Display for DerivationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivationName {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == trimmed)
            .ok_or_else(|| ChartError::UnknownDerivation(s.to_string()))
    }
}

/// Which collection a derivation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSet {
    /// Every filtered record
    Full,
    /// Filtered records minus canonical-length sessions
    ExcludingCanonical,
}

/// X-axis value of a series point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: AxisValue,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub label: String,
    pub value: f64,
}

/// Half-open bucket `[lower, upper)`; the last bucket also includes `upper`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Distribution of session length for one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    pub goal: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Date × hour-of-day session counts; absent cells are zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub dates: Vec<NaiveDate>,
    pub hours: Vec<u32>,
    /// `counts[row][hour]`, one row per entry of `dates`
    pub counts: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ChartData {
    Series(Vec<Point>),
    Categories(Vec<Category>),
    Histogram(Vec<HistogramBin>),
    Summary(Vec<GoalSummary>),
    Heatmap(Heatmap),
}

impl ChartData {
    /// Number of plotted entries (points, categories, bins, goals or heatmap rows)
    pub fn len(&self) -> usize {
        match self {
            ChartData::Series(points) => points.len(),
            ChartData::Categories(categories) => categories.len(),
            ChartData::Histogram(bins) => bins.len(),
            ChartData::Summary(goals) => goals.len(),
            ChartData::Heatmap(heatmap) => heatmap.dates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Chart-ready dataset handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub name: DerivationName,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

/// A named, pure transformation from records to a chart dataset
pub trait Derivation: Send + Sync {
    fn name(&self) -> DerivationName;

    fn title(&self) -> &str;

    fn x_label(&self) -> &str;

    fn y_label(&self) -> &str;

    /// Collection this derivation is computed over
    fn input(&self) -> InputSet {
        InputSet::Full
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData;

    fn dataset(&self, records: &[&SessionRecord]) -> ChartDataset {
        ChartDataset {
            name: self.name(),
            title: self.title().to_string(),
            x_label: self.x_label().to_string(),
            y_label: self.y_label().to_string(),
            data: self.derive(records),
        }
    }
}
