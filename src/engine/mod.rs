pub mod errors;
pub mod executor;
pub mod osm;
pub mod progress;
pub mod transform;
pub mod worker;

pub use errors::*;
pub use progress::{NoProgress, ProgressSink};
