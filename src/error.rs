use thiserror::Error;

#[derive(Error, Debug)]
pub enum TillError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Please enter valid non-negative numbers.")]
    InvalidNumber,

    #[error("Negative values are not allowed: {0}")]
    NegativeValue(String),

    #[error("{0}")]
    Validation(String),

    #[error("No entry #{} (ledger has {len} entries)", .index + 1)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("No import is being previewed. Run `tillbook import stage <file>` first.")]
    NoPendingImport,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Incorrect passcode")]
    AuthFailed,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TillError>;
