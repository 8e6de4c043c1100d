//! Page - host surface for sticky regions
//!
//! The page owns the document, the custom element registry and every
//! wrapper's state. The host drives it with tree mutations and measured
//! sizes; each entry point runs its lifecycle callbacks and events to
//! completion, then flushes dirty wrappers so each region restacks at most
//! once per call.

use std::collections::HashMap;

use sticky_dom::{
    CustomElementRegistry, Document, DomError, DomEvent, DomTree, EventDispatcher, InlineStyle,
    LifecycleCallback, NodeId,
};
use sticky_layout::StackingState;

use crate::{
    Config, EngineError, StickyElement, StickyWrapper, define_sticky_elements, force_sticky,
    is_table_cell,
};

/// A document hosting sticky regions
#[derive(Debug)]
pub struct Page {
    document: Document,
    elements: CustomElementRegistry<StickyElement>,
    wrappers: HashMap<NodeId, StickyWrapper>,
    config: Config,
}

impl Page {
    /// Create an empty page with the sticky elements defined
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let mut elements = CustomElementRegistry::new();
        define_sticky_elements(&mut elements)?;
        tracing::info!("Sticky engine {} initialized", crate::VERSION);

        Ok(Self {
            document: Document::new(),
            elements,
            wrappers: HashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    pub fn body(&self) -> NodeId {
        self.document.body()
    }

    /// Sticky behaviour of an element, if its tag is defined
    pub fn element_kind(&self, node: NodeId) -> Option<StickyElement> {
        let tag = self.document.tree.tag_name(node)?;
        self.elements.constructor(tag)
    }

    /// Create a detached element, running the constructor for sticky tags
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, EngineError> {
        let node = self.document.tree.create_element(tag);
        match self.element_kind(node) {
            Some(StickyElement::Wrapper) => {
                let wrapper = StickyWrapper::new(&mut self.document.tree, node, &self.config)?;
                self.wrappers.insert(node, wrapper);
            }
            Some(_) => self.restyle_header(node),
            None => {}
        }
        Ok(node)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.document.tree.create_text(content)
    }

    /// Set an attribute; `style` replaces the element's inline style
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), EngineError> {
        let elem = self.document.tree.element_mut(node).ok_or(DomError::NotAnElement(node))?;
        elem.set_attr(name, value);
        if !name.eq_ignore_ascii_case("style") {
            return Ok(());
        }
        elem.style = InlineStyle::parse(value);

        let observed = self
            .document
            .tree
            .tag_name(node)
            .is_some_and(|tag| self.elements.observes(tag, name));
        if observed {
            self.run_callback(node, LifecycleCallback::AttributeChanged);
        }

        // Offsets and sticky positioning of any target in the region must survive
        if let Some(host) = self.closest_wrapper(node) {
            if let Some(wrapper) = self.wrappers.get_mut(&host) {
                wrapper.invalidate();
            }
        }
        self.flush();
        Ok(())
    }

    /// Append `child` to `parent`, running connected callbacks when it joins
    /// the document
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), EngineError> {
        self.document.tree.check_append(parent, child)?;

        if self.document.tree.is_connected(child) {
            self.run_callbacks(child, LifecycleCallback::Disconnected);
        }
        let old_parent = self.document.tree.parent(child);
        self.document.tree.append_child(parent, child)?;
        if self.document.tree.is_connected(child) {
            self.run_callbacks(child, LifecycleCallback::Connected);
        }

        if let Some(old_parent) = old_parent {
            self.refresh_header(old_parent);
        }
        self.refresh_header(parent);
        self.flush();
        Ok(())
    }

    /// Remove a node from its parent; no-op when already detached
    ///
    /// Disconnected callbacks run before the node is unlinked so their
    /// events still reach the wrapper that owns the removed headers.
    pub fn remove(&mut self, node: NodeId) -> Result<(), EngineError> {
        if self.document.tree.get(node).is_none() {
            return Err(DomError::NotFound(node).into());
        }
        let Some(parent) = self.document.tree.parent(node) else {
            return Ok(());
        };

        if self.document.tree.is_connected(node) {
            self.run_callbacks(node, LifecycleCallback::Disconnected);
        }
        self.document.tree.detach(node);

        self.refresh_header(parent);
        self.flush();
        Ok(())
    }

    /// Deliver one frame of measured boxes (`node → (width, height)`)
    ///
    /// Regions outside the document are skipped.
    pub fn report_sizes(&mut self, sizes: &HashMap<NodeId, (f32, f32)>) {
        let tree = &self.document.tree;
        for (&host, wrapper) in self.wrappers.iter_mut() {
            if tree.is_connected(host) {
                wrapper.process_sizes(sizes);
            }
        }
        self.flush();
    }

    /// Run the stacking pass of every dirty wrapper
    pub fn flush(&mut self) {
        for wrapper in self.wrappers.values_mut() {
            wrapper.restack_if_needed(&mut self.document.tree);
        }
    }

    /// Force a stacking pass for one region
    pub fn restack(&mut self, host: NodeId) -> Option<StackingState> {
        let wrapper = self.wrappers.get_mut(&host)?;
        Some(wrapper.restack(&mut self.document.tree).clone())
    }

    /// Wrapper state for a `<sticky-wrapper>` host
    pub fn wrapper(&self, host: NodeId) -> Option<&StickyWrapper> {
        self.wrappers.get(&host)
    }

    /// Nearest inclusive ancestor that hosts a sticky region
    pub fn closest_wrapper(&self, node: NodeId) -> Option<NodeId> {
        let tree = &self.document.tree;
        std::iter::once(node)
            .chain(tree.ancestors(node))
            .find(|n| self.wrappers.contains_key(n))
    }

    /// Current `top` of a header or anchor cell, in px
    pub fn pinning_offset(&self, node: NodeId) -> Option<f32> {
        self.document.tree.style(node)?.px("top")
    }

    /// Current `scroll-padding-top` of a region, in px
    pub fn reserved_padding(&self, host: NodeId) -> Option<f32> {
        let region = self.wrappers.get(&host)?.scroll().region();
        self.document.tree.style(region)?.px("scroll-padding-top")
    }

    fn run_callbacks(&mut self, root: NodeId, callback: LifecycleCallback) {
        let tree = &self.document.tree;
        let nodes: Vec<NodeId> = std::iter::once(root).chain(tree.descendants(root)).collect();
        for node in nodes {
            self.run_callback(node, callback);
        }
    }

    fn run_callback(&mut self, node: NodeId, callback: LifecycleCallback) {
        let Some(kind) = self.element_kind(node) else {
            return;
        };

        match callback {
            LifecycleCallback::Connected => self.connected(node, kind),
            LifecycleCallback::Disconnected => match kind.disconnected_event() {
                Some(event) => {
                    self.dispatch_event(event.to_event(node));
                }
                None => {
                    if let Some(wrapper) = self.wrappers.get_mut(&node) {
                        wrapper.teardown();
                    }
                }
            },
            LifecycleCallback::AttributeChanged => {
                if kind.is_header() {
                    self.restyle_header(node);
                }
            }
        }
    }

    fn connected(&mut self, node: NodeId, kind: StickyElement) {
        if kind == StickyElement::TableHeader {
            let tree = &mut self.document.tree;
            let cell = tree.parent(node).filter(|&p| tree.element(p).is_some_and(is_table_cell));
            let Some(cell) = cell else {
                tracing::debug!("Table header {} is not inside a table cell, staying inert", node);
                return;
            };
            if let Some(style) = tree.style_mut(cell) {
                force_sticky(style, self.config.z_index);
            }
        }
        self.dispatch_event(kind.connected_event().to_event(node));
    }

    /// Keep a plain header measuring its first element child
    fn refresh_header(&mut self, node: NodeId) {
        if self.element_kind(node) != Some(StickyElement::Header) {
            return;
        }
        let Some(host) = self.closest_wrapper(node) else {
            return;
        };
        if let Some(wrapper) = self.wrappers.get_mut(&host) {
            wrapper.refresh_measured(&self.document.tree, node);
        }
    }

    /// Re-parse the author style and force sticky positioning on top
    fn restyle_header(&mut self, node: NodeId) {
        let z_index = self.config.z_index;
        if let Some(elem) = self.document.tree.element_mut(node) {
            if let Some(css_text) = elem.get_attr("style") {
                elem.style = InlineStyle::parse(css_text);
            }
            force_sticky(&mut elem.style, z_index);
        }
    }
}

impl EventDispatcher for Page {
    fn dispatch_event(&mut self, mut event: DomEvent) -> bool {
        let path = self.document.tree.event_path(event.target);
        for node in path {
            event.current_target = Some(node);
            if let Some(wrapper) = self.wrappers.get_mut(&node) {
                wrapper.handle_event(&self.document.tree, &mut event);
            }
            if event.is_propagation_stopped() || !event.bubbles {
                break;
            }
        }

        let stopped = event.is_propagation_stopped();
        if !stopped {
            tracing::trace!("{} from {} was not consumed", event.event_type, event.target);
        }
        stopped
    }
}
