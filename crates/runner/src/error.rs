use croupier_core::TableError;
use thiserror::Error;

/// Errors surfaced by the runner before or while driving a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Simulation task is no longer listening")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, RunnerError>;
