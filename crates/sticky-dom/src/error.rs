//! DOM errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g. inserting an ancestor into its descendant)
    #[error("cannot insert {child} into {parent}: hierarchy request error")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Operation requires an element
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    /// Element already hosts a shadow root
    #[error("element {0} already has a shadow root")]
    ShadowRootExists(NodeId),
}
