//! Header Registry
//!
//! One registry per sticky scroll region. Heights are keyed by the header
//! container; ordering is not stored here and comes from document order when
//! the stacking pass runs.

use std::collections::HashMap;

use sticky_dom::NodeId;

use crate::{HeaderKind, LayoutError};

/// Registered header and its last reported height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryEntry {
    pub kind: HeaderKind,
    /// Last accepted height; 0 until the first report
    pub height: f32,
    /// Whether any height has been accepted yet
    pub measured: bool,
}

/// Map of registered header containers to their rendered heights
#[derive(Debug, Default)]
pub struct HeaderRegistry {
    entries: HashMap<NodeId, RegistryEntry>,
}

impl HeaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container; returns false if it was already registered
    pub fn register(&mut self, container: NodeId, kind: HeaderKind) -> bool {
        if self.entries.contains_key(&container) {
            return false;
        }
        self.entries.insert(container, RegistryEntry { kind, height: 0.0, measured: false });
        true
    }

    /// Store a measured height, overwriting the previous one
    ///
    /// Negative and non-finite heights are rejected and the prior value is
    /// kept. Reports for unregistered containers are dropped.
    pub fn record_height(&mut self, container: NodeId, height: f32) -> Result<(), LayoutError> {
        if !height.is_finite() || height < 0.0 {
            return Err(LayoutError::InvalidMeasurement { container, height });
        }
        match self.entries.get_mut(&container) {
            Some(entry) => {
                entry.height = height;
                entry.measured = true;
            }
            None => tracing::trace!("Dropping height for unregistered header {}", container),
        }
        Ok(())
    }

    /// Remove a container; returns false if it was not registered
    pub fn unregister(&mut self, container: NodeId) -> bool {
        self.entries.remove(&container).is_some()
    }

    /// Stored height, or 0 when unknown
    pub fn height_of(&self, container: NodeId) -> f32 {
        self.entries.get(&container).map_or(0.0, |e| e.height)
    }

    pub fn get(&self, container: NodeId) -> Option<&RegistryEntry> {
        self.entries.get(&container)
    }

    pub fn contains(&self, container: NodeId) -> bool {
        self.entries.contains_key(&container)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
