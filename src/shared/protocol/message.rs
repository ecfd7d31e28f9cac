use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::bbox::BoundingBox;

/// Inbound message: one request starts one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Render-ready result of a successful execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    pub feature_collection: FeatureCollection,
    pub centroid_collection: FeatureCollection,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    NetworkError,
    RemoteError,
    EmptyResultError,
    WorkerError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NetworkError => "NetworkError",
            FailureKind::RemoteError => "RemoteError",
            FailureKind::EmptyResultError => "EmptyResultError",
            FailureKind::WorkerError => "WorkerError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outbound message. Zero or more `Progress`, then exactly one of
/// `Success` or `Failure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ProtocolMessage {
    Progress(String),
    Success(QueryPayload),
    Failure(FailureReason),
}

impl ProtocolMessage {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProtocolMessage::Progress(_))
    }

    /// Single-line JSON encoding, without the trailing newline.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}
