//! Resize observation
//!
//! `ResizeObserver` turns the host's measured boxes into change entries;
//! `SizeObserverAdapter` maps those entries back to header containers and
//! writes them into the registry, one batch at a time.

use std::collections::HashMap;

use sticky_dom::NodeId;

use crate::HeaderRegistry;

/// Smallest size change that produces an entry, in px
pub const DEFAULT_SIZE_EPSILON: f32 = 0.01;

/// Observed element size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeObserverSize {
    pub inline_size: f32,
    pub block_size: f32,
}

/// Content rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Resize observer entry
#[derive(Debug, Clone)]
pub struct ResizeObserverEntry {
    pub target: NodeId,
    pub content_rect: ContentRect,
    pub content_box_size: ResizeObserverSize,
}

/// Resize observer
#[derive(Debug)]
pub struct ResizeObserver {
    observed: HashMap<NodeId, ObservedElement>,
    pending_entries: Vec<ResizeObserverEntry>,
    epsilon: f32,
}

#[derive(Debug, Default)]
struct ObservedElement {
    last_size: Option<(f32, f32)>,
}

impl ResizeObserver {
    pub fn new() -> Self {
        Self::with_epsilon(DEFAULT_SIZE_EPSILON)
    }

    /// Observer ignoring changes of at most `epsilon` px
    pub fn with_epsilon(epsilon: f32) -> Self {
        Self {
            observed: HashMap::new(),
            pending_entries: Vec::new(),
            epsilon: epsilon.max(0.0),
        }
    }

    /// Observe an element; repeated calls are coalesced
    pub fn observe(&mut self, target: NodeId) -> bool {
        if self.observed.contains_key(&target) {
            return false;
        }
        self.observed.insert(target, ObservedElement::default());
        true
    }

    /// Stop observing an element
    pub fn unobserve(&mut self, target: NodeId) -> bool {
        self.pending_entries.retain(|e| e.target != target);
        self.observed.remove(&target).is_some()
    }

    /// Forget the last size of an observed element so the next report
    /// queues an entry even if nothing changed
    pub fn reset(&mut self, target: NodeId) -> bool {
        match self.observed.get_mut(&target) {
            Some(observed) => {
                observed.last_size = None;
                true
            }
            None => false,
        }
    }

    /// Disconnect all observations
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.pending_entries.clear();
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.contains_key(&target)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Queue entries for observed elements whose size changed
    ///
    /// The first report for an element always counts as a change.
    pub fn check_sizes(&mut self, sizes: &HashMap<NodeId, (f32, f32)>) {
        for (node, observed) in &mut self.observed {
            let Some(&(width, height)) = sizes.get(node) else { continue };

            // Written so a NaN on either side counts as a change
            let changed = match observed.last_size {
                Some((lw, lh)) => {
                    !((lw - width).abs() <= self.epsilon && (lh - height).abs() <= self.epsilon)
                }
                None => true,
            };
            if !changed {
                continue;
            }

            observed.last_size = Some((width, height));
            self.pending_entries.push(ResizeObserverEntry {
                target: *node,
                content_rect: ContentRect { x: 0.0, y: 0.0, width, height },
                content_box_size: ResizeObserverSize {
                    inline_size: width,
                    block_size: height,
                },
            });
        }
    }

    /// Get pending entries and clear
    pub fn take_entries(&mut self) -> Vec<ResizeObserverEntry> {
        std::mem::take(&mut self.pending_entries)
    }

    /// Check if has pending entries
    pub fn has_pending(&self) -> bool {
        !self.pending_entries.is_empty()
    }
}

impl Default for ResizeObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of feeding one batch of entries to the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Heights written to the registry
    pub recorded: usize,
    /// Heights rejected as invalid
    pub rejected: usize,
}

impl BatchReport {
    /// Whether the batch changed anything the stacking pass reads
    pub fn needs_restack(&self) -> bool {
        self.recorded > 0
    }
}

/// Bridges resize entries to header registry updates
///
/// Each container is measured through one node: the header's content
/// wrapper, or the anchor cell for table headers. Several containers may
/// share a measured node (two table headers in one cell).
#[derive(Debug, Default)]
pub struct SizeObserverAdapter {
    observer: ResizeObserver,
    measured: HashMap<NodeId, NodeId>,
    owners: HashMap<NodeId, Vec<NodeId>>,
}

impl SizeObserverAdapter {
    pub fn new(epsilon: f32) -> Self {
        Self {
            observer: ResizeObserver::with_epsilon(epsilon),
            measured: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Start measuring `container` through `measured`
    ///
    /// Returns false for a duplicate subscription. Re-subscribing with a
    /// different node moves the subscription.
    pub fn observe(&mut self, container: NodeId, measured: NodeId) -> bool {
        if let Some(&current) = self.measured.get(&container) {
            if current == measured {
                return false;
            }
            self.unobserve(container);
        }

        self.measured.insert(container, measured);
        self.owners.entry(measured).or_default().push(container);
        // A node already measured for another header would not report its
        // unchanged size to the newcomer
        if !self.observer.observe(measured) {
            self.observer.reset(measured);
        }
        tracing::trace!("Observing {} for header {}", measured, container);
        true
    }

    /// Stop measuring `container`; no-op when not subscribed
    pub fn unobserve(&mut self, container: NodeId) -> bool {
        let Some(measured) = self.measured.remove(&container) else {
            return false;
        };
        if let Some(owners) = self.owners.get_mut(&measured) {
            owners.retain(|&c| c != container);
            if owners.is_empty() {
                self.owners.remove(&measured);
                self.observer.unobserve(measured);
            }
        }
        true
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.observer.disconnect();
        self.measured.clear();
        self.owners.clear();
    }

    /// Node measured on behalf of `container`
    pub fn measured_node(&self, container: NodeId) -> Option<NodeId> {
        self.measured.get(&container).copied()
    }

    pub fn is_observing(&self, container: NodeId) -> bool {
        self.measured.contains_key(&container)
    }

    pub fn observer(&self) -> &ResizeObserver {
        &self.observer
    }

    /// Compare host sizes against the last seen ones and drain the changes
    pub fn collect(&mut self, sizes: &HashMap<NodeId, (f32, f32)>) -> Vec<ResizeObserverEntry> {
        self.observer.check_sizes(sizes);
        self.observer.take_entries()
    }

    /// Write a batch of entries into the registry
    ///
    /// Every entry is recorded before the caller restacks, so a batch never
    /// produces a pass over partially updated heights.
    pub fn record_batch(&self, entries: &[ResizeObserverEntry], registry: &mut HeaderRegistry) -> BatchReport {
        let mut report = BatchReport::default();
        for entry in entries {
            let Some(containers) = self.owners.get(&entry.target) else {
                continue;
            };
            for &container in containers {
                match registry.record_height(container, entry.content_rect.height) {
                    Ok(()) => report.recorded += 1,
                    Err(err) => {
                        tracing::warn!("Rejecting size report: {}", err);
                        report.rejected += 1;
                    }
                }
            }
        }
        report
    }
}
