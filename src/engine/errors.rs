use thiserror::Error;
use tracing::{debug, error};

use crate::shared::protocol::{FailureKind, FailureReason};

const LOG_TARGET: &str = "engine::errors";

/// Errors that abort a pipeline run. Each one becomes exactly one
/// `failure` message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote error: {0}")]
    Remote(String),

    #[error("query returned no features")]
    EmptyResult,

    #[error("worker error: {0}")]
    Worker(String),
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Network(_) => FailureKind::NetworkError,
            PipelineError::Remote(_) => FailureKind::RemoteError,
            PipelineError::EmptyResult => FailureKind::EmptyResultError,
            PipelineError::Worker(_) => FailureKind::WorkerError,
        }
    }

    pub fn log_error(&self) {
        match self {
            PipelineError::Network(e) => {
                error!(target: LOG_TARGET, "Network request failed: {}", e);
                debug!(target: LOG_TARGET, "Network error details: {:?}", e);
            }
            PipelineError::Remote(e) => {
                error!(target: LOG_TARGET, "Remote source rejected query: {}", e);
                debug!(target: LOG_TARGET, "Remote error details: {:?}", e);
            }
            PipelineError::EmptyResult => {
                error!(target: LOG_TARGET, "Query returned no features");
                debug!(target: LOG_TARGET, "Bounding box undefined for empty collection");
            }
            PipelineError::Worker(e) => {
                error!(target: LOG_TARGET, "Worker failed: {}", e);
                debug!(target: LOG_TARGET, "Worker error details: {:?}", e);
            }
        }
    }
}

impl From<PipelineError> for FailureReason {
    fn from(err: PipelineError) -> Self {
        let message = match &err {
            PipelineError::Network(m) | PipelineError::Remote(m) | PipelineError::Worker(m) => {
                m.clone()
            }
            PipelineError::EmptyResult => err.to_string(),
        };
        FailureReason {
            kind: err.kind(),
            message,
        }
    }
}

/// Failures below the executor: the transport call or the body read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("response body read failed: {0}")]
    Body(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl From<TransportError> for PipelineError {
    fn from(err: TransportError) -> Self {
        PipelineError::Network(err.to_string())
    }
}
