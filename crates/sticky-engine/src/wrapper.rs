//! Sticky wrapper
//!
//! State behind one `<sticky-wrapper>`: its scroll container, the registry of
//! headers it owns, and the resize subscriptions feeding that registry.
//!
//! Header lifecycle events arriving at the wrapper register/unregister the
//! header and (un)subscribe its measured node. Registration changes and
//! accepted size batches only mark the wrapper dirty; the page flushes dirty
//! wrappers once per host notification, so every trigger source funnels into
//! a single stacking pass.

use std::collections::HashMap;

use sticky_dom::{DomEvent, DomTree, NodeId};
use sticky_layout::{
    BatchReport, HeaderKind, HeaderRegistry, LayoutError, ScrollContainer, SizeObserverAdapter,
    StackingState, TableRunPolicy, collect_entries, compute_stacking,
};

use crate::{Config, EngineError, StickyEvent, force_sticky, is_table_cell};

/// Counters for one wrapper
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapperStats {
    /// Stacking passes run
    pub passes: u64,
    /// Non-empty resize batches received
    pub batches: u64,
}

/// One sticky scroll region
#[derive(Debug)]
pub struct StickyWrapper {
    host: NodeId,
    registry: HeaderRegistry,
    adapter: SizeObserverAdapter,
    scroll: ScrollContainer,
    policy: TableRunPolicy,
    z_index: i32,
    needs_restack: bool,
    state: StackingState,
    stats: WrapperStats,
}

impl StickyWrapper {
    /// Build the region for `host`, attaching its shadow tree
    pub fn new(tree: &mut DomTree, host: NodeId, config: &Config) -> Result<Self, EngineError> {
        let scroll = ScrollContainer::new(tree, host)?;
        Ok(Self {
            host,
            registry: HeaderRegistry::new(),
            adapter: SizeObserverAdapter::new(config.size_epsilon),
            scroll,
            policy: config.table_run_policy,
            z_index: config.z_index,
            needs_restack: false,
            state: StackingState::default(),
            stats: WrapperStats::default(),
        })
    }

    /// Handle a lifecycle event bubbling through the host
    ///
    /// Header events stop here so an enclosing wrapper never sees headers
    /// that belong to this one.
    pub fn handle_event(&mut self, tree: &DomTree, event: &mut DomEvent) {
        let Some(kind) = StickyEvent::from_type(&event.event_type) else {
            return;
        };
        let header = event.target;

        match kind {
            StickyEvent::HeaderConnected => {
                event.stop_propagation();
                self.attach_plain(tree, header);
            }
            StickyEvent::TableHeaderConnected => {
                event.stop_propagation();
                if let Err(err) = self.attach_table(tree, header) {
                    tracing::debug!("Ignoring table header: {}", err);
                }
            }
            StickyEvent::HeaderDisconnected | StickyEvent::TableHeaderDisconnected => {
                event.stop_propagation();
                self.detach(header);
            }
            StickyEvent::WrapperConnected => {}
        }
    }

    fn attach_plain(&mut self, tree: &DomTree, header: NodeId) {
        self.registry.register(header, HeaderKind::Plain);
        self.adapter.observe(header, plain_measured_node(tree, header));
        tracing::debug!("Header {} attached to {}", header, self.host);
        self.invalidate();
    }

    /// Re-resolve the node measured for a registered plain header after its
    /// children changed; returns true if the subscription moved
    pub fn refresh_measured(&mut self, tree: &DomTree, header: NodeId) -> bool {
        let is_plain = self.registry.get(header).is_some_and(|e| e.kind == HeaderKind::Plain);
        if !is_plain {
            return false;
        }
        let measured = plain_measured_node(tree, header);
        if self.adapter.measured_node(header) == Some(measured) {
            return false;
        }
        tracing::debug!("Header {} now measured through {}", header, measured);
        self.adapter.observe(header, measured)
    }

    /// Drop every header and subscription when the region leaves the document
    pub fn teardown(&mut self) {
        self.registry.clear();
        self.adapter.clear();
        self.state = StackingState::default();
        self.needs_restack = false;
        tracing::debug!("Region {} torn down", self.host);
    }

    fn attach_table(&mut self, tree: &DomTree, header: NodeId) -> Result<(), LayoutError> {
        let anchor = tree
            .parent(header)
            .filter(|&p| tree.element(p).is_some_and(is_table_cell))
            .ok_or(LayoutError::StructuralMismatch { header })?;

        self.registry.register(header, HeaderKind::Table { anchor });
        self.adapter.observe(header, anchor);
        tracing::debug!("Table header {} attached to {} via cell {}", header, self.host, anchor);
        self.invalidate();
        Ok(())
    }

    fn detach(&mut self, header: NodeId) {
        self.adapter.unobserve(header);
        if self.registry.unregister(header) {
            tracing::debug!("Header {} detached from {}", header, self.host);
            self.invalidate();
        }
    }

    /// Feed one frame of host measurements through the resize observer
    pub fn process_sizes(&mut self, sizes: &HashMap<NodeId, (f32, f32)>) -> BatchReport {
        let entries = self.adapter.collect(sizes);
        if entries.is_empty() {
            return BatchReport::default();
        }

        self.stats.batches += 1;
        let report = self.adapter.record_batch(&entries, &mut self.registry);
        tracing::trace!("Resize batch for {}: {:?}", self.host, report);
        if report.needs_restack() {
            self.invalidate();
        }
        report
    }

    /// Request a stacking pass at the next flush
    pub fn invalidate(&mut self) {
        self.needs_restack = true;
    }

    pub fn needs_restack(&self) -> bool {
        self.needs_restack
    }

    /// Run the stacking pass if anything changed since the last one
    pub fn restack_if_needed(&mut self, tree: &mut DomTree) -> bool {
        if !self.needs_restack {
            return false;
        }
        self.restack(tree);
        true
    }

    /// Recompute every offset and the reserved padding from scratch
    pub fn restack(&mut self, tree: &mut DomTree) -> &StackingState {
        let entries = collect_entries(tree, self.host, &self.registry);
        let state = compute_stacking(entries, self.policy);

        for pin in &state.pins {
            if let Some(style) = tree.style_mut(pin.target) {
                force_sticky(style, self.z_index);
            }
        }
        state.apply(tree);
        self.scroll.apply_reserved_padding(tree, state.total_reserved_height);

        self.needs_restack = false;
        self.stats.passes += 1;
        tracing::debug!(
            "Stacked {} headers in {}, reserved {}px",
            state.pins.len(),
            self.host,
            state.total_reserved_height
        );

        self.state = state;
        &self.state
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn registry(&self) -> &HeaderRegistry {
        &self.registry
    }

    pub fn adapter(&self) -> &SizeObserverAdapter {
        &self.adapter
    }

    pub fn scroll(&self) -> &ScrollContainer {
        &self.scroll
    }

    /// Result of the last stacking pass
    pub fn state(&self) -> &StackingState {
        &self.state
    }

    pub fn stats(&self) -> WrapperStats {
        self.stats
    }
}

/// The header itself is pinned, so its own box is only a fallback measure
fn plain_measured_node(tree: &DomTree, header: NodeId) -> NodeId {
    tree.first_element_child(header).unwrap_or(header)
}
