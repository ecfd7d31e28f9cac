pub mod query_worker;
pub mod sink;
pub mod state;
pub mod stream;

pub use query_worker::QueryWorker;
pub use sink::MessageSink;
pub use state::ExecutionState;
pub use stream::QueryStream;
