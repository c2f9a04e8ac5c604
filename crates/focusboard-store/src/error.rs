use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Malformed record at line {line}: column '{column}' has value {value:?}")]
    MalformedRecord {
        line: u64,
        column: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
