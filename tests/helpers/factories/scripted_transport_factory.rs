use crate::engine::errors::TransportError;
use crate::engine::executor::{Transport, TransportResponse};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone, Debug)]
enum Script {
    Respond { status: u16, body: Vec<u8> },
    FailRequest(String),
    FailBody { status: u16, error: String },
}

/// Transport double that plays back one canned outcome and records calls.
pub struct ScriptedTransport {
    script: Script,
    delay: Option<Duration>,
    calls: AtomicUsize,
    bodies: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<String> {
        self.bodies.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, body: String) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(body);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.script.clone() {
            Script::Respond { status, body } => Ok(TransportResponse::ready(status, body)),
            Script::FailRequest(message) => Err(TransportError::Request(message)),
            Script::FailBody { status, error } => Ok(TransportResponse::new(status, async move {
                Err(TransportError::Body(error))
            })),
        }
    }

    fn describe(&self) -> String {
        "scripted://overpass".to_string()
    }
}

pub struct ScriptedTransportFactory {
    script: Script,
    delay: Option<Duration>,
}

impl ScriptedTransportFactory {
    pub fn new() -> Self {
        Self {
            script: Script::Respond {
                status: 200,
                body: br#"{"elements":[]}"#.to_vec(),
            },
            delay: None,
        }
    }

    pub fn responding(mut self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.script = Script::Respond {
            status,
            body: body.into(),
        };
        self
    }

    pub fn refusing_connection(mut self, message: &str) -> Self {
        self.script = Script::FailRequest(message.to_string());
        self
    }

    pub fn failing_body(mut self, status: u16, error: &str) -> Self {
        self.script = Script::FailBody {
            status,
            error: error.to_string(),
        };
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn create(self) -> Arc<ScriptedTransport> {
        Arc::new(ScriptedTransport {
            script: self.script,
            delay: self.delay,
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        })
    }
}
