//! Layout errors

use sticky_dom::{DomError, NodeId};

/// Errors raised while tracking or stacking headers
///
/// None of these escape to the page: callers log them and carry on with
/// the previous (or zero) offsets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A reported height was negative or not a number
    #[error("invalid measurement {height} for header {container}")]
    InvalidMeasurement { container: NodeId, height: f32 },
    /// A table header was attached outside a table cell
    #[error("table header {header} is not inside a table cell")]
    StructuralMismatch { header: NodeId },
    #[error(transparent)]
    Dom(#[from] DomError),
}
