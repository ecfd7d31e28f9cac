pub use super::factories::{RawResponseFactory, ScriptedTransportFactory};

pub struct Factory;

impl Factory {
    pub fn raw_response() -> RawResponseFactory {
        RawResponseFactory::new()
    }

    pub fn scripted_transport() -> ScriptedTransportFactory {
        ScriptedTransportFactory::new()
    }
}
