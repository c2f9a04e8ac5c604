//! Delimited-file I/O and atomic file operations

use crate::error::{Result, StoreError};
use crate::types::{format_ended, parse_ended, SessionRecord};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Column names of the persisted form, in order
pub const COLUMNS: [&str; 6] = ["Created At", "Time", "Elapsed", "Goal", "Ended", "Work"];

/// Anything that can produce the full record set for one pipeline invocation
pub trait RecordSource {
    fn load(&self) -> Result<Vec<SessionRecord>>;
}

/// Record set persisted as a delimited file.
///
/// Every `load` re-reads the file; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the persisted file with `records` (temp file + rename)
    pub fn replace(&self, records: &[SessionRecord]) -> Result<()> {
        let mut buf = Vec::new();
        write_records(&mut buf, records)?;
        atomic_write(&self.path, &buf)?;
        tracing::info!(path = %self.path.display(), records = records.len(), "wrote session file");
        Ok(())
    }
}

impl RecordSource for CsvRecordStore {
    fn load(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "session file missing, loading nothing");
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let records = read_records(BufReader::new(file))?;
        tracing::info!(path = %self.path.display(), records = records.len(), "loaded sessions");
        Ok(records)
    }
}

/// Read records from the delimited form (header row first).
///
/// Fields are decoded as UTF-8, falling back to Latin-1 for legacy bytes.
/// An unparseable timestamp only invalidates that row's timestamp; an
/// unparseable `Time`, `Elapsed` or `Ended` aborts the whole read.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<SessionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| decode_field(h).trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Ok(Vec::new());
    }

    let mut index = [0usize; 6];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or(StoreError::MissingColumn(column))?;
    }
    let [created_idx, time_idx, elapsed_idx, goal_idx, ended_idx, work_idx] = index;

    let mut records = Vec::new();
    let mut invalid_timestamps = 0usize;

    for row in rdr.byte_records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| row.get(idx).map(decode_field).unwrap_or_default();

        let time_raw = field(time_idx);
        let time = parse_minutes(&time_raw).ok_or_else(|| StoreError::MalformedRecord {
            line,
            column: "Time",
            value: time_raw.clone(),
        })?;

        let elapsed_raw = field(elapsed_idx);
        let elapsed = parse_minutes(&elapsed_raw).ok_or_else(|| StoreError::MalformedRecord {
            line,
            column: "Elapsed",
            value: elapsed_raw.clone(),
        })?;

        let ended_raw = field(ended_idx);
        let ended = parse_ended(&ended_raw).ok_or_else(|| StoreError::MalformedRecord {
            line,
            column: "Ended",
            value: ended_raw.clone(),
        })?;

        let record = SessionRecord::new(
            field(created_idx),
            time,
            elapsed,
            field(goal_idx),
            ended,
            field(work_idx),
        );
        if !record.has_valid_timestamp() {
            invalid_timestamps += 1;
        }
        records.push(record);
    }

    if invalid_timestamps > 0 {
        tracing::warn!(
            count = invalid_timestamps,
            "sessions with unparseable timestamps are excluded from time-based views"
        );
    }

    Ok(records)
}

/// Write records in the persisted delimited form, header first, input order kept
pub fn write_records<W: Write>(writer: W, records: &[SessionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;

    for record in records {
        wtr.write_record([
            record.created_at_raw.as_str(),
            &record.time.to_string(),
            &record.elapsed.to_string(),
            record.goal.as_str(),
            format_ended(record.ended),
            record.work.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// Accepts "30" and the float rendering "30.0"; rejects negatives and fractions.
fn parse_minutes(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}
