use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use crate::engine::progress::ProgressSink;
use crate::shared::protocol::ProtocolMessage;

const LOG_TARGET: &str = "engine::worker::sink";

/// Forwards stage narration into the worker's message channel as
/// `progress` messages. Sends never block, so the synchronous transform can
/// report from the blocking pool.
#[derive(Clone)]
pub struct MessageSink {
    tx: UnboundedSender<ProtocolMessage>,
}

impl MessageSink {
    pub fn new(tx: UnboundedSender<ProtocolMessage>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for MessageSink {
    fn report(&self, text: String) {
        trace!(target: LOG_TARGET, progress = %text, "Forwarding progress");
        // A dropped stream means nobody is listening; the run continues.
        let _ = self.tx.send(ProtocolMessage::Progress(text));
    }
}
