//! Submit error types

use thiserror::Error;

/// Failure reported by a registration backend
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("registration rejected: {0}")]
    Rejected(String),
    #[error("registration task ended before reporting a result")]
    TaskAborted,
}
