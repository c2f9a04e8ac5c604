use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("Unknown chart derivation: {0}")]
    UnknownDerivation(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
