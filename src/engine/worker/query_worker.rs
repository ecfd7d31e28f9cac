use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use super::sink::MessageSink;
use super::state::ExecutionState;
use super::stream::QueryStream;
use crate::engine::errors::PipelineError;
use crate::engine::executor::QueryExecutor;
use crate::engine::transform::transform;
use crate::shared::protocol::{ProtocolMessage, QueryPayload, QueryRequest};

const LOG_TARGET: &str = "engine::worker";

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Owned handle for one query execution.
///
/// `execute` consumes the handle, so a second query needs a fresh worker;
/// concurrent queries are simply several workers. The executor is shared.
pub struct QueryWorker {
    executor: Arc<QueryExecutor>,
}

impl QueryWorker {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    pub fn state(&self) -> ExecutionState {
        ExecutionState::Idle
    }

    /// Start the pipeline on its own task and return the message stream.
    /// Must be called from within a tokio runtime.
    pub fn execute(self, request: QueryRequest) -> QueryStream {
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        info!(target: LOG_TARGET, run_id, "Query received");
        tokio::spawn(run_pipeline(run_id, self.executor, request.query, tx));
        QueryStream::new(rx)
    }
}

async fn run_pipeline(
    run_id: u64,
    executor: Arc<QueryExecutor>,
    query: String,
    tx: UnboundedSender<ProtocolMessage>,
) {
    let sink = MessageSink::new(tx.clone());

    let terminal = match run_stages(&executor, query, sink).await {
        Ok(payload) => {
            info!(
                target: LOG_TARGET,
                run_id,
                features = payload.feature_collection.features.len(),
                "Query succeeded"
            );
            ProtocolMessage::Success(payload)
        }
        Err(err) => {
            err.log_error();
            ProtocolMessage::Failure(err.into())
        }
    };

    if tx.send(terminal).is_err() {
        debug!(target: LOG_TARGET, run_id, "Caller dropped the stream; outcome discarded");
    }
}

/// Executor, then transform. The first error ends the run; the transform is
/// never started after a failed fetch.
async fn run_stages(
    executor: &QueryExecutor,
    query: String,
    sink: MessageSink,
) -> Result<QueryPayload, PipelineError> {
    let raw = executor.execute(&query, &sink).await?;

    tokio::task::spawn_blocking(move || transform(raw, &sink))
        .await
        .map_err(|e| PipelineError::Worker(format!("transform task failed: {e}")))?
}
