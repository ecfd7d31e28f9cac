use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use super::transport::{Transport, TransportResponse};
use crate::engine::errors::TransportError;
use crate::shared::config::OverpassConfig;

const LOG_TARGET: &str = "engine::executor::http";

/// reqwest-backed transport POSTing the query text to the interpreter URL.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn from_config(config: &OverpassConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn map_request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

fn map_body_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Body(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String) -> Result<TransportResponse, TransportError> {
        debug!(target: LOG_TARGET, endpoint = %self.endpoint, bytes = body.len(), "Sending query");
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status().as_u16();
        debug!(target: LOG_TARGET, status, "Received response headers");
        Ok(TransportResponse::new(status, async move {
            response.bytes().await.map_err(map_body_error)
        }))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
