//! Request pipeline: load, filter, split, summarize, derive, then export

use crate::delimited::{to_delimited_text, DELIMITED_CONTENT_TYPE};
use crate::dispatch::{self, Attachment, Mailer, OutboundMessage};
use crate::document::{to_document, DocumentFormat};
use crate::error::Result;
use focusboard_charts::{Catalog, ChartDataset, DerivationName};
use focusboard_core::{
    filter::FilterSpec, stats::summarize_refs, AggregateBundle, CanonicalSplit, Config,
    FilterRequest, Outcome,
};
use focusboard_store::{RecordSource, SessionRecord};
use serde::Serialize;

/// Interactive view result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResponse {
    pub no_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateBundle>,
    pub charts: Vec<ChartDataset>,
}

impl ViewResponse {
    fn no_data() -> Self {
        Self {
            no_data: true,
            aggregate: None,
            charts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Delimited,
    Document(DocumentFormat),
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Delimited => DELIMITED_CONTENT_TYPE,
            ExportFormat::Document(format) => format.content_type(),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Delimited => "csv",
            ExportFormat::Document(format) => format.extension(),
        }
    }
}

/// One filter-aggregate-export pipeline over a record source.
///
/// Holds no state between calls: every operation re-reads the source.
pub struct Pipeline<S: RecordSource> {
    source: S,
    canonical_minutes: u32,
    catalog: Catalog,
}

impl<S: RecordSource> Pipeline<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            canonical_minutes: config.canonical_length_minutes,
            catalog: Catalog::with_histogram_bins(config.histogram_bins),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn filtered(&self, request: &FilterRequest) -> Result<Vec<SessionRecord>> {
        let spec = FilterSpec::from_request(request)?;
        let records = self.source.load()?;
        let filtered = spec.apply(&records);
        tracing::debug!(loaded = records.len(), kept = filtered.len(), "filtered sessions");
        Ok(filtered)
    }

    /// Aggregate and charts for a request; names are validated before loading
    fn analyze(
        &self,
        request: &FilterRequest,
    ) -> Result<Outcome<(AggregateBundle, Vec<ChartDataset>)>> {
        let names: Vec<DerivationName> = self.catalog.resolve(&request.plot_options)?;
        let records = self.filtered(request)?;
        if records.is_empty() {
            return Ok(Outcome::NoData);
        }

        let split = CanonicalSplit::new(&records, self.canonical_minutes);
        tracing::debug!(canonical = split.canonical_count(), "tagged canonical-length sessions");
        let aggregate = summarize_refs(split.full());
        let charts = self.catalog.derive_all(&names, &split)?;
        Ok(Outcome::Ready((aggregate, charts)))
    }

    pub fn view(&self, request: &FilterRequest) -> Result<ViewResponse> {
        Ok(match self.analyze(request)? {
            Outcome::Ready((aggregate, charts)) => ViewResponse {
                no_data: false,
                aggregate: Some(aggregate),
                charts,
            },
            Outcome::NoData => ViewResponse::no_data(),
        })
    }

    pub fn export_delimited(&self, request: &FilterRequest) -> Result<Outcome<Vec<u8>>> {
        let records = self.filtered(request)?;
        to_delimited_text(&records)
    }

    pub fn export_document(
        &self,
        request: &FilterRequest,
        format: DocumentFormat,
    ) -> Result<Outcome<Vec<u8>>> {
        match self.analyze(request)? {
            Outcome::Ready((aggregate, charts)) => to_document(&aggregate, &charts, format),
            Outcome::NoData => Ok(Outcome::NoData),
        }
    }

    /// Export in `format`, wrapped as a named attachment
    pub fn export(&self, request: &FilterRequest, format: ExportFormat) -> Result<Outcome<Attachment>> {
        let payload = match format {
            ExportFormat::Delimited => self.export_delimited(request)?,
            ExportFormat::Document(document) => self.export_document(request, document)?,
        };
        Ok(payload.map(|bytes| Attachment {
            filename: format!("focus_sessions.{}", format.extension()),
            content_type: format.content_type().to_string(),
            bytes,
        }))
    }

    pub fn build_message(
        &self,
        request: &FilterRequest,
        format: ExportFormat,
        to: &str,
        from: Option<&str>,
    ) -> Result<Outcome<OutboundMessage>> {
        dispatch::validate_destination(to)?;
        Ok(self.export(request, format)?.map(|attachment| OutboundMessage {
            to: to.to_string(),
            from: from.map(str::to_string),
            subject: "Focus session export".to_string(),
            body: format!("Attached: {}", attachment.filename),
            attachment,
        }))
    }

    /// Export and hand the payload to `mailer` once.
    ///
    /// `NoData` means nothing was sent.
    pub async fn dispatch<M: Mailer>(
        &self,
        mailer: &M,
        request: &FilterRequest,
        format: ExportFormat,
        to: &str,
        from: Option<&str>,
    ) -> Result<Outcome<()>> {
        let Outcome::Ready(message) = self.build_message(request, format, to, from)? else {
            tracing::info!(to = %to, "no sessions matched, nothing dispatched");
            return Ok(Outcome::NoData);
        };
        dispatch::dispatch(mailer, &message).await?;
        Ok(Outcome::Ready(()))
    }
}
