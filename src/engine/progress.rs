/// Receives human-readable progress narration from pipeline stages.
///
/// Stages push events as they work and return their value separately,
/// so narration and results never share a channel type at the stage level.
pub trait ProgressSink: Send + Sync {
    fn report(&self, text: String);
}

/// Discards all narration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _text: String) {}
}

impl<F> ProgressSink for F
where
    F: Fn(String) + Send + Sync,
{
    fn report(&self, text: String) {
        self(text)
    }
}
