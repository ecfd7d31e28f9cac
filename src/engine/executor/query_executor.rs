use std::sync::Arc;
use tracing::{debug, info, warn};

use super::http::HttpTransport;
use super::transport::Transport;
use crate::engine::errors::{PipelineError, TransportError};
use crate::engine::osm::RawResponse;
use crate::engine::progress::ProgressSink;
use crate::shared::config::OverpassConfig;

const LOG_TARGET: &str = "engine::executor";

/// Longest slice of an error body quoted back in a `RemoteError`.
const ERROR_EXCERPT_CHARS: usize = 240;

/// Issues one request per query and decodes the Overpass document.
pub struct QueryExecutor {
    transport: Arc<dyn Transport>,
}

impl QueryExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &OverpassConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::from_config(config)?)))
    }

    pub async fn execute(
        &self,
        query: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RawResponse, PipelineError> {
        sink.report("sending query".to_string());
        info!(
            target: LOG_TARGET,
            target_url = %self.transport.describe(),
            query_len = query.len(),
            "Executing query"
        );

        let response = self.transport.post(query.to_string()).await?;
        let status = response.status;
        let success = response.is_success();

        sink.report("reading response".to_string());
        let body = response.read_body().await?;
        sink.report(format!("read {} bytes", body.len()));
        debug!(target: LOG_TARGET, status, bytes = body.len(), "Response body read");

        if !success {
            warn!(target: LOG_TARGET, status, "Remote returned non-success status");
            return Err(PipelineError::Remote(format!(
                "HTTP {status}: {}",
                excerpt(&body)
            )));
        }

        let raw: RawResponse = serde_json::from_slice(&body).map_err(|e| {
            PipelineError::Remote(format!("response is not an Overpass JSON document: {e}"))
        })?;

        if let Some(remark) = raw.remark.as_deref() {
            if remark.contains("runtime error") {
                return Err(PipelineError::Remote(remark.trim().to_string()));
            }
            sink.report(format!("remark: {}", remark.trim()));
        }

        debug!(target: LOG_TARGET, elements = raw.elements.len(), "Decoded response");
        Ok(raw)
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > ERROR_EXCERPT_CHARS {
        let cut: String = collapsed.chars().take(ERROR_EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        collapsed
    }
}
