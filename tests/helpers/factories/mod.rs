pub mod raw_response_factory;
pub mod scripted_transport_factory;

pub use raw_response_factory::RawResponseFactory;
pub use scripted_transport_factory::{ScriptedTransport, ScriptedTransportFactory};
