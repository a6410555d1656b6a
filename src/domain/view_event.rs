//! View event model for asynchronous hit tracking.

/// An in-memory record of one successful redirect, queued for async processing.
///
/// Decouples the HTTP response from counter writes: the redirect handler
/// sends the event over a bounded channel and never waits for the update.
/// If the queue is full the event is dropped.
#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub short_code: String,
}

impl ViewEvent {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }
}
