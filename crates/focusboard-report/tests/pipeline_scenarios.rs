use focusboard_charts::{AxisValue, ChartData, DerivationName};
use focusboard_core::{Config, FilterRequest, Outcome};
use focusboard_report::{
    DispatchError, DocumentFormat, ExportFormat, Mailer, OutboundMessage, Pipeline, RelayMailer,
    ReportError,
};
use focusboard_store::{read_records, CsvRecordStore, SessionRecord};
use std::net::TcpListener;
use std::sync::Mutex;
use tempfile::TempDir;

fn two_sessions() -> Vec<SessionRecord> {
    vec![
        SessionRecord::new("2024-01-01T09:00:00Z", 30, 28, "write", true, "chapter one"),
        SessionRecord::new("2024-01-02T10:00:00Z", 60, 60, "read", true, "novel"),
    ]
}

fn store_with(dir: &TempDir, records: &[SessionRecord]) -> CsvRecordStore {
    let store = CsvRecordStore::new(dir.path().join("sessions.csv"));
    store.replace(records).unwrap();
    store
}

fn charts(names: &[DerivationName]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_unfiltered_aggregate_and_excluded_chart() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(store_with(&dir, &two_sessions()), &Config::new());
    let request = FilterRequest {
        plot_options: charts(&[DerivationName::ElapsedTimeByGoal, DerivationName::GoalDistribution]),
        ..Default::default()
    };

    let view = pipeline.view(&request).unwrap();
    assert!(!view.no_data);
    let aggregate = view.aggregate.unwrap();
    assert_eq!(aggregate.total_sessions, 2);
    assert_eq!(aggregate.sessions_per_goal.get("write"), Some(&1));
    assert_eq!(aggregate.sessions_per_goal.get("read"), Some(&1));
    assert_eq!(aggregate.sessions_per_goal.values().sum::<usize>(), 2);

    // the 60-minute "read" session only disappears from the elapsed chart
    let ChartData::Categories(elapsed) = &view.charts[0].data else {
        panic!("Expected categories");
    };
    assert_eq!(elapsed.len(), 1);
    assert_eq!(elapsed[0].label, "write");
    assert_eq!(elapsed[0].value, 28.0);

    let ChartData::Categories(goals) = &view.charts[1].data else {
        panic!("Expected categories");
    };
    assert_eq!(goals.len(), 2);
}

#[test]
fn test_goal_filter_single_day_series() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(store_with(&dir, &two_sessions()), &Config::new());
    let request = FilterRequest {
        goals: vec!["write".to_string()],
        plot_options: charts(&[DerivationName::SessionsOverTime]),
        ..Default::default()
    };

    let view = pipeline.view(&request).unwrap();
    assert_eq!(view.aggregate.unwrap().total_sessions, 1);
    let ChartData::Series(points) = &view.charts[0].data else {
        panic!("Expected series");
    };
    assert_eq!(points.len(), 1);
    assert_eq!(
        points[0].x,
        AxisValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    );
    assert_eq!(points[0].y, 1.0);
}

#[test]
fn test_start_date_drops_invalid_timestamp() {
    let dir = TempDir::new().unwrap();
    let records = vec![
        SessionRecord::new("not a timestamp", 25, 25, "code", true, ""),
        SessionRecord::new("2024-06-03T12:00:00Z", 25, 20, "code", true, ""),
    ];
    let pipeline = Pipeline::new(store_with(&dir, &records), &Config::new());

    let unbounded = FilterRequest {
        plot_options: charts(&[DerivationName::SessionsByWeekday]),
        ..Default::default()
    };
    let view = pipeline.view(&unbounded).unwrap();
    assert_eq!(view.aggregate.unwrap().total_sessions, 2);
    // weekday grouping still skips the unparseable row
    let ChartData::Categories(days) = &view.charts[0].data else {
        panic!("Expected categories");
    };
    assert_eq!(days.iter().map(|d| d.value).sum::<f64>(), 1.0);

    let bounded = FilterRequest {
        start_date: Some("2024-06-01".to_string()),
        ..unbounded
    };
    let view = pipeline.view(&bounded).unwrap();
    assert_eq!(view.aggregate.unwrap().total_sessions, 1);

    let exported = pipeline.export_delimited(&bounded).unwrap().ready().unwrap();
    let reloaded = read_records(exported.as_slice()).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded[0].has_valid_timestamp());
}

#[test]
fn test_export_roundtrip_matches_filtered_set() {
    let dir = TempDir::new().unwrap();
    let mut records = two_sessions();
    records.push(SessionRecord::new(
        "2024-01-03T07:30:00Z",
        45,
        41,
        "write",
        false,
        "edits, \"notes\"",
    ));
    let pipeline = Pipeline::new(store_with(&dir, &records), &Config::new());
    let request = FilterRequest {
        search_query: Some("WRITE".to_string()),
        ..Default::default()
    };

    let payload = pipeline.export_delimited(&request).unwrap().ready().unwrap();
    let reloaded = read_records(payload.as_slice()).unwrap();
    assert_eq!(reloaded, vec![records[0].clone(), records[2].clone()]);
}

#[test]
fn test_document_export_sections() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(store_with(&dir, &two_sessions()), &Config::new());
    let request = FilterRequest {
        plot_options: charts(&[DerivationName::SessionsHeatmap, DerivationName::GoalDistribution]),
        ..Default::default()
    };

    let payload = pipeline
        .export_document(&request, DocumentFormat::Json)
        .unwrap()
        .ready()
        .unwrap();
    let document: serde_json::Value = serde_json::from_slice(&payload).unwrap();
    let kinds: Vec<_> = document["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["body"]["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["title", "statistics", "goal_counts", "chart", "chart"]);
    assert_eq!(document["sections"][3]["heading"], "Sessions Heatmap");
}

#[test]
fn test_missing_file_is_no_data() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(
        CsvRecordStore::new(dir.path().join("absent.csv")),
        &Config::new(),
    );
    let view = pipeline.view(&FilterRequest::default()).unwrap();
    assert!(view.no_data);
}

#[test]
fn test_malformed_file_fails_whole_invocation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions.csv");
    std::fs::write(
        &path,
        "Created At,Time,Elapsed,Goal,Ended,Work\n2024-01-01T09:00:00Z,30,28,write,True,x\n2024-01-02T09:00:00Z,thirty,28,write,True,x\n",
    )
    .unwrap();
    let pipeline = Pipeline::new(CsvRecordStore::new(path), &Config::new());
    assert!(matches!(
        pipeline.view(&FilterRequest::default()),
        Err(ReportError::Store(_))
    ));
}

struct RecordingMailer {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl Mailer for RecordingMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_dispatch_hands_over_export() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(store_with(&dir, &two_sessions()), &Config::new());
    let mailer = RecordingMailer {
        sent: Mutex::new(Vec::new()),
    };

    let outcome = pipeline
        .dispatch(
            &mailer,
            &FilterRequest::default(),
            ExportFormat::Delimited,
            "me@example.com",
            Some("reports@example.com"),
        )
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Ready(()));

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "me@example.com");
    assert_eq!(sent[0].attachment.filename, "focus_sessions.csv");
    assert_eq!(read_records(sent[0].attachment.bytes.as_slice()).unwrap(), two_sessions());
}

#[tokio::test]
async fn test_dispatch_no_data_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(store_with(&dir, &two_sessions()), &Config::new());
    let mailer = RecordingMailer {
        sent: Mutex::new(Vec::new()),
    };
    let request = FilterRequest {
        goals: vec!["sleep".to_string()],
        ..Default::default()
    };

    let outcome = pipeline
        .dispatch(&mailer, &request, ExportFormat::Delimited, "me@example.com", None)
        .await
        .unwrap();
    assert!(outcome.is_no_data());
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_relay_reports_connection_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mailer = RelayMailer::new(format!("http://127.0.0.1:{}/send", port), "token");

    let dir = TempDir::new().unwrap();
    let records = two_sessions();
    let pipeline = Pipeline::new(store_with(&dir, &records), &Config::new());
    let err = pipeline
        .dispatch(
            &mailer,
            &FilterRequest::default(),
            ExportFormat::Document(DocumentFormat::Text),
            "me@example.com",
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::Dispatch(DispatchError::Connection(_))
    ));

    // the export itself is unaffected by the failed delivery
    let payload = pipeline
        .export_delimited(&FilterRequest::default())
        .unwrap()
        .ready()
        .unwrap();
    assert_eq!(read_records(payload.as_slice()).unwrap(), records);
}
