//! DOM Events
//!
//! Custom events dispatched along the ancestor path of their target.

use crate::NodeId;

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    /// Create a custom event
    pub fn custom(event_type: impl Into<String>, target: NodeId, bubbles: bool) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            current_target: None,
            bubbles,
            propagation_stopped: false,
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if a listener stopped propagation
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Dispatch an event; returns true when a listener stopped propagation
    fn dispatch_event(&mut self, event: DomEvent) -> bool;
}
