pub mod bbox;
pub mod message;

pub use bbox::BoundingBox;
pub use message::{FailureKind, FailureReason, ProtocolMessage, QueryPayload, QueryRequest};
