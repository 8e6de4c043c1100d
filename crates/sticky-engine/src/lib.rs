//! Sticky Engine
//!
//! Scroll regions whose headers stay pinned while content scrolls beneath
//! them. Nested headers stack without overlapping, table header cells pin as
//! one row, and the region reserves scroll padding so anchor navigation lands
//! below the stacked headers.
//!
//! # Example
//! ```rust,ignore
//! use sticky_engine::{Config, Page};
//!
//! let mut page = Page::new(Config::default())?;
//! let wrapper = page.create_element("sticky-wrapper")?;
//! let header = page.create_element("sticky-header")?;
//! let title = page.create_element("h2")?;
//! page.append_child(header, title)?;
//! page.append_child(wrapper, header)?;
//! page.append_child(page.body(), wrapper)?;
//!
//! // The host reports measured boxes after layout
//! page.report_sizes(&[(title, (640.0, 48.0))].into_iter().collect());
//! assert_eq!(page.reserved_padding(wrapper), Some(48.0));
//! ```

mod config;
mod elements;
mod error;
mod events;
mod page;
mod wrapper;

pub use config::Config;
pub use elements::{StickyElement, define_sticky_elements, force_sticky, is_table_cell};
pub use error::EngineError;
pub use events::StickyEvent;
pub use page::Page;
pub use wrapper::{StickyWrapper, WrapperStats};

// Re-export sub-crates for advanced usage
pub use sticky_dom as dom;
pub use sticky_layout as layout;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
