//! Shadow DOM
//!
//! Shadow roots and slots. Shadow children live in the host tree's arena but
//! are not linked under the host, so light-tree traversal never sees them.

use crate::NodeId;

/// Open shadow root
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    pub host: NodeId,
    children: Vec<NodeId>,
    slots: Vec<Slot>,
}

/// Slot element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Slot name; empty for the default slot
    pub name: String,
    /// The `<slot>` element inside the shadow tree
    pub element: NodeId,
}

impl ShadowRoot {
    /// Create a new shadow root
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            children: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Top-level shadow children
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// First top-level shadow child
    pub fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    /// Add a top-level shadow child
    pub fn append_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Find slot by name
    pub fn get_slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Register a slot; a second slot with the same name is ignored
    pub fn add_slot(&mut self, slot: Slot) {
        if self.get_slot(&slot.name).is_none() {
            self.slots.push(slot);
        }
    }
}

impl Slot {
    pub fn new(name: impl Into<String>, element: NodeId) -> Self {
        Self {
            name: name.into(),
            element,
        }
    }

    pub fn default_slot(element: NodeId) -> Self {
        Self::new("", element)
    }
}
