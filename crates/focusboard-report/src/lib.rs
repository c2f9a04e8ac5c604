//! Export and delivery of filtered session data: delimited text, paginated
//! documents and outbound messages, plus the request pipeline tying the stages together

mod delimited;
mod dispatch;
mod document;
mod error;
mod pipeline;

pub use delimited::{to_delimited_text, DELIMITED_CONTENT_TYPE};
pub use dispatch::{dispatch, validate_destination, Attachment, Mailer, OutboundMessage, RelayMailer};
pub use document::{
    build_document, render_text, to_document, Document, DocumentFormat, Section, SectionBody,
};
pub use error::{DispatchError, ReportError, Result};
pub use pipeline::{ExportFormat, Pipeline, ViewResponse};
