//! Sticky element definitions
//!
//! The three declarable tags and what their constructors force onto the
//! element's inline style.

use sticky_dom::{CustomElementError, CustomElementRegistry, ElementData, InlineStyle};

use crate::StickyEvent;

/// Behaviour attached to a defined sticky tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickyElement {
    /// `<sticky-wrapper>`: owns a scroll region and its header registry
    Wrapper,
    /// `<sticky-header>`: pins itself
    Header,
    /// `<sticky-table-header>`: pins its parent cell
    TableHeader,
}

impl StickyElement {
    pub const ALL: [StickyElement; 3] = [Self::Wrapper, Self::Header, Self::TableHeader];

    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Wrapper => "sticky-wrapper",
            Self::Header => "sticky-header",
            Self::TableHeader => "sticky-table-header",
        }
    }

    /// Whether the constructor forces sticky positioning on the element
    pub fn is_header(self) -> bool {
        matches!(self, Self::Header | Self::TableHeader)
    }

    /// Event announcing the element joined the document
    pub fn connected_event(self) -> StickyEvent {
        match self {
            Self::Wrapper => StickyEvent::WrapperConnected,
            Self::Header => StickyEvent::HeaderConnected,
            Self::TableHeader => StickyEvent::TableHeaderConnected,
        }
    }

    /// Event announcing the element left the document
    pub fn disconnected_event(self) -> Option<StickyEvent> {
        match self {
            Self::Wrapper => None,
            Self::Header => Some(StickyEvent::HeaderDisconnected),
            Self::TableHeader => Some(StickyEvent::TableHeaderDisconnected),
        }
    }
}

/// Register the sticky tags
pub fn define_sticky_elements(
    registry: &mut CustomElementRegistry<StickyElement>,
) -> Result<(), CustomElementError> {
    for element in StickyElement::ALL {
        let observed: &[&str] = if element.is_header() { &["style"] } else { &[] };
        registry.define(element.tag_name(), element, observed)?;
    }
    Ok(())
}

/// Table cells are the only valid parents of a table header
pub fn is_table_cell(element: &ElementData) -> bool {
    element.is("th") || element.is("td")
}

/// Force sticky positioning over whatever the author wrote
pub fn force_sticky(style: &mut InlineStyle, z_index: i32) {
    style.set("position", "sticky");
    style.set("top", "0");
    style.set("z-index", z_index.to_string());
}
