//! Engine errors

use sticky_dom::{CustomElementError, DomError};
use sticky_layout::LayoutError;

/// Errors from building or mutating a page
///
/// Lifecycle and resize notifications never surface errors; these only come
/// back from tree construction calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    CustomElement(#[from] CustomElementError),
}
