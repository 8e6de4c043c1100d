//! Stacking pass
//!
//! Assigns every registered header a pinning offset (`top`) so stacked
//! headers never overlap, and derives the scroll padding that keeps anchor
//! navigation clear of them.
//!
//! The pass is a single walk in document order:
//!
//! ```text
//! top = 0
//! plain header  -> offset = top; top += height
//! table header  -> anchor cell offset = top; height not added
//! reserved      =  top after the walk
//! ```
//!
//! Consecutive table headers are the cells of one logical header row, so they
//! all pin at the same offset. By default the row's height is never added to
//! the running total. `TableRunPolicy::AccumulateOnce` adds the tallest cell of
//! each run once the run ends.

use serde::{Deserialize, Serialize};
use sticky_dom::{DomTree, NodeId};

use crate::HeaderRegistry;

/// Kind of sticky header, with kind-specific pinning target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// Generic header; pinned itself
    Plain,
    /// Header inside a table cell; the cell is pinned
    Table { anchor: NodeId },
}

impl HeaderKind {
    /// Node that receives `top` and sticky positioning
    pub fn target(self, container: NodeId) -> NodeId {
        match self {
            HeaderKind::Plain => container,
            HeaderKind::Table { anchor } => anchor,
        }
    }

    pub fn is_table(self) -> bool {
        matches!(self, HeaderKind::Table { .. })
    }
}

/// How a run of consecutive table headers contributes to the running offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableRunPolicy {
    /// Runs overlap later headers: their height is never added
    #[default]
    Overlap,
    /// The tallest header of a run is added once when the run ends
    AccumulateOnce,
}

impl TableRunPolicy {
    fn run_contribution(self, tallest: f32) -> f32 {
        match self {
            TableRunPolicy::Overlap => 0.0,
            TableRunPolicy::AccumulateOnce => tallest,
        }
    }
}

/// One header as seen by the stacking pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackEntry {
    pub container: NodeId,
    pub kind: HeaderKind,
    pub height: f32,
}

/// Offset assigned to one header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub container: NodeId,
    /// Node the offset is written to (container or anchor cell)
    pub target: NodeId,
    pub offset: f32,
}

/// Result of a stacking pass; rebuilt from scratch every time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackingState {
    /// Pins in document order
    pub pins: Vec<Pin>,
    pub total_reserved_height: f32,
}

impl StackingState {
    /// Offset assigned to a container
    pub fn offset_of(&self, container: NodeId) -> Option<f32> {
        self.pins.iter().find(|p| p.container == container).map(|p| p.offset)
    }

    /// Offsets in document order
    pub fn offsets(&self) -> Vec<f32> {
        self.pins.iter().map(|p| p.offset).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Write each offset as `top` on its target
    pub fn apply(&self, tree: &mut DomTree) {
        for pin in &self.pins {
            match tree.style_mut(pin.target) {
                Some(style) => style.set_px("top", pin.offset),
                None => tracing::warn!("Pin target {} is not an element", pin.target),
            }
        }
    }
}

/// Compute offsets for headers given in document order
pub fn compute_stacking<I>(entries: I, policy: TableRunPolicy) -> StackingState
where
    I: IntoIterator<Item = StackEntry>,
{
    let mut top = 0.0_f32;
    let mut pins = Vec::new();
    // Tallest header of the table run being traversed, if any
    let mut table_run: Option<f32> = None;

    for entry in entries {
        let target = entry.kind.target(entry.container);
        match entry.kind {
            HeaderKind::Table { .. } => {
                pins.push(Pin { container: entry.container, target, offset: top });
                let tallest = table_run.get_or_insert(0.0);
                *tallest = tallest.max(entry.height);
            }
            HeaderKind::Plain => {
                if let Some(tallest) = table_run.take() {
                    top += policy.run_contribution(tallest);
                }
                pins.push(Pin { container: entry.container, target, offset: top });
                top += entry.height;
            }
        }
    }
    if let Some(tallest) = table_run {
        top += policy.run_contribution(tallest);
    }

    StackingState { pins, total_reserved_height: top }
}

/// Registered headers under `root`, in document order
///
/// Headers registered with a different region (a nested wrapper) are not in
/// `registry` and so are skipped.
pub fn collect_entries(tree: &DomTree, root: NodeId, registry: &HeaderRegistry) -> Vec<StackEntry> {
    tree.descendants(root)
        .filter_map(|node| {
            registry.get(node).map(|entry| StackEntry {
                container: node,
                kind: entry.kind,
                height: entry.height,
            })
        })
        .collect()
}
