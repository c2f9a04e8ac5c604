use focusboard_charts::ChartError;
use focusboard_core::CoreError;
use focusboard_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to load sessions: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Outbound delivery failure; never retried by this crate
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid destination address: {0:?}")]
    InvalidDestination(String),

    #[error("Relay not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Could not connect to relay: {0}")]
    Connection(String),

    #[error("Relay rejected credentials (HTTP {status})")]
    AuthenticationRejected { status: u16 },

    #[error("Relay refused message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Relay request failed: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
