//! Sticky Layout Engine
//!
//! Computes pinning offsets for stacked sticky headers inside one vertical
//! scroll region.
//!
//! This crate implements:
//! - Header registry (container identity → last measured height)
//! - Resize observation and the adapter feeding measurements to the registry
//! - The stacking pass assigning each header its `top` offset
//! - The scroll container whose `scroll-padding-top` reserves room for
//!   the stacked headers

mod error;
mod registry;
mod resize;
mod scroll;
mod stacking;

pub use error::LayoutError;
pub use registry::{HeaderRegistry, RegistryEntry};
pub use resize::{
    BatchReport, ContentRect, DEFAULT_SIZE_EPSILON, ResizeObserver, ResizeObserverEntry,
    ResizeObserverSize, SizeObserverAdapter,
};
pub use scroll::ScrollContainer;
pub use stacking::{
    HeaderKind, Pin, StackEntry, StackingState, TableRunPolicy, collect_entries, compute_stacking,
};
