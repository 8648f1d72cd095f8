use thiserror::Error;

/// Domain-level errors for table configuration and parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Invalid sequence token '{token}': allowed keywords are {allowed}")]
    InvalidSequenceToken { token: String, allowed: String },

    #[error("Malformed outcome token '{token}': expected 0, 00 or 1-36")]
    MalformedOutcomeToken { token: String },

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
