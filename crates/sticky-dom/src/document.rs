//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
///
/// Owns the tree and caches the `<html>` and `<body>` elements.
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    html_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");

        // Fresh nodes under the root cannot violate hierarchy rules
        let linked = tree
            .append_child(tree.root(), html)
            .and_then(|()| tree.append_child(html, body));
        debug_assert!(linked.is_ok());

        Self {
            tree,
            html_element: html,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
