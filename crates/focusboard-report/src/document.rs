//! Paginated report document: fixed section order, one page per section

use crate::error::Result;
use focusboard_charts::{AxisValue, ChartData, ChartDataset};
use focusboard_core::{AggregateBundle, Outcome};
use serde::Serialize;
use std::fmt::Write as _;

pub const DOCUMENT_TITLE: &str = "Focus Session Report";

const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain text, pages separated by form feed
    Text,
    /// Structured sections for an external renderer
    Json,
}

impl DocumentFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "text/plain; charset=utf-8",
            DocumentFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "txt",
            DocumentFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Title { subtitle: String },
    Statistics { rows: Vec<(String, String)> },
    GoalCounts { rows: Vec<(String, usize)> },
    Chart { chart: ChartDataset },
}

/// Assemble the report sections: title, summary statistics, per-goal counts,
/// then one section per chart in the given order.
pub fn build_document(aggregate: &AggregateBundle, charts: &[ChartDataset]) -> Outcome<Document> {
    if aggregate.total_sessions == 0 {
        return Outcome::NoData;
    }

    let mut sections = Vec::with_capacity(3 + charts.len());
    sections.push(Section {
        heading: DOCUMENT_TITLE.to_string(),
        body: SectionBody::Title {
            subtitle: format!("{} sessions", aggregate.total_sessions),
        },
    });
    sections.push(Section {
        heading: "Summary Statistics".to_string(),
        body: SectionBody::Statistics {
            rows: vec![
                ("Total Sessions".to_string(), aggregate.total_sessions.to_string()),
                ("Average Time (minutes)".to_string(), format_number(aggregate.average_time)),
                ("Median Time (minutes)".to_string(), format_number(aggregate.median_time)),
                ("Total Time (minutes)".to_string(), aggregate.total_time.to_string()),
                ("Total Elapsed (minutes)".to_string(), aggregate.total_elapsed.to_string()),
                ("Average Elapsed (minutes)".to_string(), format_number(aggregate.average_elapsed)),
            ],
        },
    });
    sections.push(Section {
        heading: "Sessions per Goal".to_string(),
        body: SectionBody::GoalCounts {
            rows: aggregate
                .sessions_per_goal
                .iter()
                .map(|(goal, count)| (goal.clone(), *count))
                .collect(),
        },
    });
    sections.extend(charts.iter().map(|chart| Section {
        heading: chart.title.clone(),
        body: SectionBody::Chart {
            chart: chart.clone(),
        },
    }));

    Outcome::Ready(Document {
        title: DOCUMENT_TITLE.to_string(),
        sections,
    })
}

/// Render as plain text, one page per section
pub fn render_text(document: &Document) -> String {
    let pages: Vec<String> = document.sections.iter().map(render_section).collect();
    pages.join(&format!("\n{}", PAGE_BREAK))
}

fn render_section(section: &Section) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section.heading);
    let _ = writeln!(out, "{}", "=".repeat(section.heading.chars().count()));
    let _ = writeln!(out);

    match &section.body {
        SectionBody::Title { subtitle } => {
            let _ = writeln!(out, "{}", subtitle);
        }
        SectionBody::Statistics { rows } => {
            for (label, value) in rows {
                let _ = writeln!(out, "{}: {}", label, value);
            }
        }
        SectionBody::GoalCounts { rows } => {
            for (goal, count) in rows {
                let _ = writeln!(out, "{}: {}", goal, count);
            }
        }
        SectionBody::Chart { chart } => render_chart(&mut out, chart),
    }
    out
}

fn render_chart(out: &mut String, chart: &ChartDataset) {
    let _ = writeln!(out, "{} / {}", chart.x_label, chart.y_label);
    if chart.data.is_empty() {
        let _ = writeln!(out, "(no points)");
        return;
    }

    match &chart.data {
        ChartData::Series(points) => {
            for point in points {
                let _ = writeln!(out, "{}\t{}", format_axis(&point.x), format_number(point.y));
            }
        }
        ChartData::Categories(categories) => {
            for category in categories {
                let _ = writeln!(out, "{}\t{}", category.label, format_number(category.value));
            }
        }
        ChartData::Histogram(bins) => {
            for bin in bins {
                let _ = writeln!(
                    out,
                    "{}-{}\t{}",
                    format_number(bin.lower),
                    format_number(bin.upper),
                    bin.count
                );
            }
        }
        ChartData::Summary(summaries) => {
            let _ = writeln!(out, "goal\tcount\tmin\tq1\tmedian\tq3\tmax\tmean");
            for s in summaries {
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    s.goal,
                    s.count,
                    format_number(s.min),
                    format_number(s.q1),
                    format_number(s.median),
                    format_number(s.q3),
                    format_number(s.max),
                    format_number(s.mean)
                );
            }
        }
        ChartData::Heatmap(heatmap) => {
            let hours: Vec<String> = heatmap.hours.iter().map(|h| h.to_string()).collect();
            let _ = writeln!(out, "date\t{}", hours.join("\t"));
            for (date, row) in heatmap.dates.iter().zip(&heatmap.counts) {
                let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                let _ = writeln!(out, "{}\t{}", date, cells.join("\t"));
            }
        }
    }
}

fn format_axis(value: &AxisValue) -> String {
    match value {
        AxisValue::Timestamp(ts) => ts.to_rfc3339(),
        AxisValue::Date(date) => date.to_string(),
        AxisValue::Number(n) => format_number(*n),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Build and serialize the report document
pub fn to_document(
    aggregate: &AggregateBundle,
    charts: &[ChartDataset],
    format: DocumentFormat,
) -> Result<Outcome<Vec<u8>>> {
    let Outcome::Ready(document) = build_document(aggregate, charts) else {
        return Ok(Outcome::NoData);
    };

    let payload = match format {
        DocumentFormat::Text => render_text(&document).into_bytes(),
        DocumentFormat::Json => serde_json::to_vec_pretty(&document)?,
    };
    tracing::info!(
        sections = document.sections.len(),
        bytes = payload.len(),
        "exported document"
    );
    Ok(Outcome::Ready(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusboard_charts::{Category, DerivationName};
    use std::collections::BTreeMap;

    fn aggregate() -> AggregateBundle {
        AggregateBundle {
            total_sessions: 2,
            average_time: 45.0,
            median_time: 45.0,
            total_time: 90,
            total_elapsed: 88,
            average_elapsed: 44.0,
            sessions_per_goal: BTreeMap::from([("read".to_string(), 1), ("write".to_string(), 1)]),
        }
    }

    fn chart(title: &str) -> ChartDataset {
        ChartDataset {
            name: DerivationName::GoalDistribution,
            title: title.to_string(),
            x_label: "Goal".to_string(),
            y_label: "Sessions".to_string(),
            data: ChartData::Categories(vec![Category {
                label: "write".to_string(),
                value: 1.0,
            }]),
        }
    }

    #[test]
    fn test_section_order() {
        let document = build_document(&aggregate(), &[chart("First"), chart("Second")])
            .ready()
            .unwrap();
        let headings: Vec<_> = document.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![DOCUMENT_TITLE, "Summary Statistics", "Sessions per Goal", "First", "Second"]
        );
        assert!(matches!(document.sections[0].body, SectionBody::Title { .. }));
        assert!(matches!(document.sections[3].body, SectionBody::Chart { .. }));
    }

    #[test]
    fn test_empty_aggregate_is_no_data() {
        let mut empty = aggregate();
        empty.total_sessions = 0;
        assert!(build_document(&empty, &[]).is_no_data());
        assert!(to_document(&empty, &[], DocumentFormat::Text)
            .unwrap()
            .is_no_data());
    }

    #[test]
    fn test_text_pages_split_by_form_feed() {
        let payload = to_document(&aggregate(), &[chart("Goals")], DocumentFormat::Text)
            .unwrap()
            .ready()
            .unwrap();
        let text = String::from_utf8(payload).unwrap();
        let pages: Vec<_> = text.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 4);
        assert!(pages[1].contains("Total Sessions: 2"));
        assert!(pages[1].contains("Average Time (minutes): 45"));
        assert!(pages[2].contains("read: 1"));
        assert!(pages[3].contains("write\t1"));
    }

    #[test]
    fn test_json_document_tags_sections() {
        let payload = to_document(&aggregate(), &[], DocumentFormat::Json)
            .unwrap()
            .ready()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["title"], DOCUMENT_TITLE);
        assert_eq!(value["sections"][1]["body"]["kind"], "statistics");
        assert_eq!(value["sections"][2]["body"]["rows"][0][0], "read");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(27.5), "27.50");
        assert_eq!(format_number(0.0), "0");
    }
}
