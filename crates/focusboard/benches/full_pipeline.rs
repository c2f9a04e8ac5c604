use criterion::{criterion_group, criterion_main, Criterion};
use focusboard_charts::DerivationName;
use focusboard_core::{Config, FilterRequest};
use focusboard_report::{to_delimited_text, Pipeline};
use focusboard_store::{RecordSource, SessionRecord};
use std::hint::black_box;

struct InMemory(Vec<SessionRecord>);

impl RecordSource for InMemory {
    fn load(&self) -> focusboard_store::Result<Vec<SessionRecord>> {
        Ok(self.0.clone())
    }
}

fn sessions(n: usize) -> Vec<SessionRecord> {
    let goals = ["write", "read", "code", "study"];
    (0..n)
        .map(|i| {
            let day = 1 + (i / 24) % 28;
            let hour = i % 24;
            let time = [25, 30, 45, 60][i % 4];
            SessionRecord::new(
                format!("2024-02-{:02}T{:02}:00:00Z", day, hour),
                time,
                time - (i % 7) as u32,
                goals[i % goals.len()],
                i % 5 != 0,
                format!("session {}", i),
            )
        })
        .collect()
}

fn bench_view_all_charts_1000(c: &mut Criterion) {
    let pipeline = Pipeline::new(InMemory(sessions(1000)), &Config::default());
    let request = FilterRequest {
        search_query: Some("1".to_string()),
        plot_options: DerivationName::ALL.iter().map(|n| n.to_string()).collect(),
        ..Default::default()
    };

    c.bench_function("view_all_charts_1000", |b| {
        b.iter(|| pipeline.view(black_box(&request)).unwrap());
    });
}

fn bench_delimited_export_1000(c: &mut Criterion) {
    let records = sessions(1000);

    c.bench_function("delimited_export_1000", |b| {
        b.iter(|| to_delimited_text(black_box(&records)).unwrap());
    });
}

criterion_group!(benches, bench_view_all_charts_1000, bench_delimited_export_1000);
criterion_main!(benches);
