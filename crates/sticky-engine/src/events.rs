//! Sticky lifecycle events
//!
//! Bubbling custom events carrying nothing but their target. Header events
//! stop at the first `<sticky-wrapper>` above the target.

use sticky_dom::{DomEvent, NodeId};

/// Notification kinds exchanged between sticky elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickyEvent {
    HeaderConnected,
    HeaderDisconnected,
    TableHeaderConnected,
    TableHeaderDisconnected,
    /// Sent by a wrapper when it connects; nothing consumes it
    WrapperConnected,
}

impl StickyEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeaderConnected => "sticky-header-connected",
            Self::HeaderDisconnected => "sticky-header-disconnected",
            Self::TableHeaderConnected => "sticky-table-header-connected",
            Self::TableHeaderDisconnected => "sticky-table-header-disconnected",
            Self::WrapperConnected => "sticky-wrapper-connected",
        }
    }

    /// Parse an event type name
    pub fn from_type(event_type: &str) -> Option<Self> {
        match event_type {
            "sticky-header-connected" => Some(Self::HeaderConnected),
            "sticky-header-disconnected" => Some(Self::HeaderDisconnected),
            "sticky-table-header-connected" => Some(Self::TableHeaderConnected),
            "sticky-table-header-disconnected" => Some(Self::TableHeaderDisconnected),
            "sticky-wrapper-connected" => Some(Self::WrapperConnected),
            _ => None,
        }
    }

    /// Build the bubbling DOM event for `target`
    pub fn to_event(self, target: NodeId) -> DomEvent {
        DomEvent::custom(self.as_str(), target, true)
    }
}
