//! Scroll container
//!
//! The scrollable viewport of a sticky region. It lives in the host's shadow
//! root as `<div><slot></slot></div>`, so slotted light-tree content scrolls
//! inside it without the page knowing the div exists.

use sticky_dom::{DomTree, NodeId, Slot};

use crate::LayoutError;

/// Styles making the region fill its host and scroll
const REGION_STYLE: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("overflow", "auto"),
];

/// Owner of a sticky region's scrollable viewport
#[derive(Debug)]
pub struct ScrollContainer {
    host: NodeId,
    region: NodeId,
    slot: NodeId,
    reserved_padding: Option<f32>,
}

impl ScrollContainer {
    /// Build the shadow tree for `host`
    pub fn new(tree: &mut DomTree, host: NodeId) -> Result<Self, LayoutError> {
        let region = tree.create_element("div");
        let slot = tree.create_element("slot");
        tree.append_child(region, slot)?;
        if let Some(style) = tree.style_mut(region) {
            for (property, value) in REGION_STYLE {
                style.set(property, value);
            }
        }

        let shadow = tree.attach_shadow(host)?;
        shadow.append_child(region);
        shadow.add_slot(Slot::default_slot(slot));

        Ok(Self {
            host,
            region,
            slot,
            reserved_padding: None,
        })
    }

    /// Set `scroll-padding-top` on the region; returns true if it changed
    pub fn apply_reserved_padding(&mut self, tree: &mut DomTree, height: f32) -> bool {
        if self.reserved_padding == Some(height) {
            return false;
        }
        if let Some(style) = tree.style_mut(self.region) {
            style.set_px("scroll-padding-top", height);
        }
        self.reserved_padding = Some(height);
        tracing::debug!("Reserved {}px of scroll padding in {}", height, self.host);
        true
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    /// The scrollable `<div>`
    pub fn region(&self) -> NodeId {
        self.region
    }

    /// The default `<slot>` inside the region
    pub fn slot(&self) -> NodeId {
        self.slot
    }

    /// Last applied padding, if any pass has run
    pub fn reserved_padding(&self) -> Option<f32> {
        self.reserved_padding
    }

    /// Light-tree nodes rendered through the region
    pub fn slotted(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.assigned_nodes(self.host, "")
    }
}
