use std::sync::{Arc, Mutex};

use crate::events::Event;

/// Receives countdown events and turns them into user-visible effects
/// (overlay, sound cue, live display).
///
/// Fire and forget: no acknowledgement or delivery guarantee.
pub trait NotificationSink: Send {
    fn notify(&self, event: &Event);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _event: &Event) {}
}

/// Buffers events for front-ends that poll instead of being pushed to.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
