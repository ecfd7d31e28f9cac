use crate::engine::progress::ProgressSink;
use std::sync::Mutex;

/// Collects narration in order for assertions.
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, text: String) {
        self.messages.lock().unwrap().push(text);
    }
}
