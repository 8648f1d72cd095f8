use thiserror::Error;

/// Errors raised by persistence adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the analysis collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Analysis service unavailable: {0}")]
    Unavailable(String),

    #[error("Analysis failed: {0}")]
    Failed(String),
}
