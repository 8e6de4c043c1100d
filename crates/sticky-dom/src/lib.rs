//! Sticky DOM - Document Object Model
//!
//! Arena-based DOM tree with the pieces sticky scroll regions need:
//! inline styles, shadow roots, custom element definitions and
//! bubbling custom events.

mod node;
mod tree;
mod document;
mod style;
mod error;
pub mod custom_elements;
pub mod dom_events;
pub mod shadow;

pub use node::{Node, NodeData, ElementData, TextData};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::Document;
pub use style::InlineStyle;
pub use error::{DomError, DomResult};
pub use custom_elements::{
    CustomElementRegistry, CustomElementDefinition, CustomElementError, LifecycleCallback,
};
pub use dom_events::{DomEvent, EventDispatcher};
pub use shadow::{ShadowRoot, Slot};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Build an ID from a raw arena index
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Check this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
