use focusboard_store::{CsvRecordStore, SessionRecord};
use std::path::Path;

pub fn sample_records() -> Vec<SessionRecord> {
    vec![
        SessionRecord::new("2024-01-01T09:00:00Z", 30, 28, "write", true, "outline"),
        SessionRecord::new("2024-01-01T14:30:00Z", 60, 60, "read", true, "papers"),
        SessionRecord::new("2024-01-02T08:15:00Z", 45, 41, "write", true, "chapter 2"),
        SessionRecord::new("2024-01-03T21:00:00Z", 25, 12, "code", false, "parser bug"),
        SessionRecord::new("unknown", 60, 60, "read", true, "undated"),
    ]
}

pub fn write_store(dir: &Path, records: &[SessionRecord]) -> CsvRecordStore {
    let store = CsvRecordStore::new(dir.join("sessions.csv"));
    store.replace(records).unwrap();
    store
}
