use async_trait::async_trait;
use bytes::Bytes;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

use crate::engine::errors::TransportError;

/// Status line received, body not yet read.
///
/// The body is a deferred future so the caller can narrate the read
/// separately from the request.
pub struct TransportResponse {
    pub status: u16,
    body: BoxFuture<'static, Result<Bytes, TransportError>>,
}

impl TransportResponse {
    pub fn new<F>(status: u16, body: F) -> Self
    where
        F: Future<Output = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            status,
            body: Box::pin(body),
        }
    }

    /// Response whose body is already in memory.
    pub fn ready(status: u16, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self::new(status, async move { Ok(body) })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub async fn read_body(self) -> Result<Bytes, TransportError> {
        self.body.await
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// One outbound request per call, body = query text. Implementations must
/// not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, body: String) -> Result<TransportResponse, TransportError>;

    /// Human-readable target for logs and progress text.
    fn describe(&self) -> String;
}
