//! Weekday and hour-of-day groupings

use crate::base::{Category, ChartData, Derivation, DerivationName, Heatmap};
use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use focusboard_store::SessionRecord;
use std::collections::BTreeMap;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Session counts per weekday, Monday first, empty days included
pub struct SessionsByWeekday;

impl Derivation for SessionsByWeekday {
    fn name(&self) -> DerivationName {
        DerivationName::SessionsByWeekday
    }

    fn title(&self) -> &str {
        "Sessions by Weekday"
    }

    fn x_label(&self) -> &str {
        "Weekday"
    }

    fn y_label(&self) -> &str {
        "Sessions"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        let mut counts = [0usize; 7];
        for ts in records.iter().filter_map(|r| r.created_at) {
            counts[ts.weekday().num_days_from_monday() as usize] += 1;
        }

        ChartData::Categories(
            WEEKDAYS
                .iter()
                .zip(counts)
                .map(|(&day, count)| Category {
                    label: weekday_name(day).to_string(),
                    value: count as f64,
                })
                .collect(),
        )
    }
}

/// Sessions per (date, hour) cell
pub struct SessionsHeatmap;

impl Derivation for SessionsHeatmap {
    fn name(&self) -> DerivationName {
        DerivationName::SessionsHeatmap
    }

    fn title(&self) -> &str {
        "Sessions Heatmap"
    }

    fn x_label(&self) -> &str {
        "Hour of Day"
    }

    fn y_label(&self) -> &str {
        "Date"
    }

    fn derive(&self, records: &[&SessionRecord]) -> ChartData {
        let mut rows: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for ts in records.iter().filter_map(|r| r.created_at) {
            let row = rows.entry(ts.date_naive()).or_insert_with(|| vec![0; 24]);
            row[ts.hour() as usize] += 1;
        }

        let (dates, counts) = rows.into_iter().unzip();
        ChartData::Heatmap(Heatmap {
            dates,
            hours: (0..24).collect(),
            counts,
        })
    }
}
