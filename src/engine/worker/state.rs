use crate::shared::protocol::ProtocolMessage;

/// Lifecycle of one execution. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionState::Succeeded | ExecutionState::Failed)
    }

    /// State after observing `message` while running.
    pub fn after(self, message: &ProtocolMessage) -> Self {
        match (self, message) {
            (ExecutionState::Running, ProtocolMessage::Progress(_)) => ExecutionState::Running,
            (ExecutionState::Running, ProtocolMessage::Success(_)) => ExecutionState::Succeeded,
            (ExecutionState::Running, ProtocolMessage::Failure(_)) => ExecutionState::Failed,
            (state, _) => state,
        }
    }
}
