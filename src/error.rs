use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unexpected error when querying Discogs API ({status})")]
    UnexpectedApi { status: u16 },

    #[error("No results found")]
    NoResults,

    #[error("Failed to add {title} to collection: {status}")]
    AddFailed { title: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, ImporterError>;
