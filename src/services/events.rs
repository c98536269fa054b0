// Events Service
// Notification sinks for theme changes

use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

const EVENT_BUS_CAPACITY: usize = 64;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &str, _payload: Value) {}
}

pub fn emit_event<T: Serialize>(sink: &dyn EventSink, event: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => sink.emit(event, value),
        Err(e) => log::warn!("Failed to serialize '{event}' payload: {e}"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeEvent {
    pub event: String,
    pub payload: Value,
}

/// Broadcasts every emitted event to all current subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ThemeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &str, payload: Value) {
        // No subscribers is not an error
        let _ = self.sender.send(ThemeEvent {
            event: event.to_string(),
            payload,
        });
    }
}
