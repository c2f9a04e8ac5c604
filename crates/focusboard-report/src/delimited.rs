use crate::error::Result;
use focusboard_core::Outcome;
use focusboard_store::{write_records, SessionRecord};

pub const DELIMITED_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Serialize records in the persisted column layout.
///
/// Rows keep input order and the verbatim timestamp text, so sessions with an
/// unparseable timestamp are exported too. The payload reloads through
/// `focusboard_store::read_records` into equal records.
pub fn to_delimited_text(records: &[SessionRecord]) -> Result<Outcome<Vec<u8>>> {
    if records.is_empty() {
        return Ok(Outcome::NoData);
    }

    let mut payload = Vec::new();
    write_records(&mut payload, records)?;
    tracing::info!(records = records.len(), bytes = payload.len(), "exported delimited text");
    Ok(Outcome::Ready(payload))
}
