use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use super::state::ExecutionState;
use crate::shared::protocol::{FailureKind, FailureReason, ProtocolMessage, QueryPayload};

const LOG_TARGET: &str = "engine::worker::stream";

/// Caller end of one execution.
///
/// Yields progress messages in production order, then exactly one terminal
/// message, then `None`. If the worker disappears without a terminal message
/// the stream synthesizes a `WorkerError` failure.
pub struct QueryStream {
    rx: UnboundedReceiver<ProtocolMessage>,
    state: ExecutionState,
}

impl QueryStream {
    pub(crate) fn new(rx: UnboundedReceiver<ProtocolMessage>) -> Self {
        Self {
            rx,
            state: ExecutionState::Running,
        }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub async fn recv(&mut self) -> Option<ProtocolMessage> {
        futures::future::poll_fn(|cx| self.poll_message(cx)).await
    }

    /// Drain progress and return the terminal outcome.
    pub async fn outcome(mut self) -> Result<QueryPayload, FailureReason> {
        while let Some(message) = self.recv().await {
            match message {
                ProtocolMessage::Progress(text) => {
                    debug!(target: LOG_TARGET, progress = %text, "Progress");
                }
                ProtocolMessage::Success(payload) => return Ok(payload),
                ProtocolMessage::Failure(reason) => return Err(reason),
            }
        }
        Err(lost_worker())
    }

    fn poll_message(&mut self, cx: &mut Context<'_>) -> Poll<Option<ProtocolMessage>> {
        if self.state.is_terminal() {
            return Poll::Ready(None);
        }

        let message = match ready!(self.rx.poll_recv(cx)) {
            Some(message) => message,
            None => {
                warn!(target: LOG_TARGET, "Worker channel closed before a terminal message");
                ProtocolMessage::Failure(lost_worker())
            }
        };

        self.state = self.state.after(&message);
        if self.state.is_terminal() {
            // Nothing may follow the terminal message.
            self.rx.close();
        }
        Poll::Ready(Some(message))
    }
}

fn lost_worker() -> FailureReason {
    FailureReason {
        kind: FailureKind::WorkerError,
        message: "worker stopped without reporting an outcome".to_string(),
    }
}

impl Stream for QueryStream {
    type Item = ProtocolMessage;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_message(cx)
    }
}
