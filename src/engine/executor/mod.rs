pub mod http;
pub mod query_executor;
pub mod transport;

pub use http::HttpTransport;
pub use query_executor::QueryExecutor;
pub use transport::{Transport, TransportResponse};
