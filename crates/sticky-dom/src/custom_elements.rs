//! Custom Elements
//!
//! Custom element registry and lifecycle callbacks.
//!
//! The registry is generic over the constructor handle so the embedder can
//! map a tag name to whatever describes the element's behaviour.

use std::collections::HashMap;

/// Custom elements registry
#[derive(Debug)]
pub struct CustomElementRegistry<C> {
    definitions: HashMap<String, CustomElementDefinition<C>>,
}

/// Custom element definition
#[derive(Debug, Clone)]
pub struct CustomElementDefinition<C> {
    pub name: String,
    pub constructor: C,
    pub observed_attributes: Vec<String>,
}

/// Custom element lifecycle callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCallback {
    Connected,
    Disconnected,
    AttributeChanged,
}

/// Custom element errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomElementError {
    #[error("'{0}' is not a valid custom element name")]
    InvalidName(String),
    #[error("custom element '{0}' is already defined")]
    AlreadyDefined(String),
}

impl<C: Copy> CustomElementRegistry<C> {
    pub fn new() -> Self {
        Self { definitions: HashMap::new() }
    }

    /// Define a custom element
    pub fn define(
        &mut self,
        name: &str,
        constructor: C,
        observed_attributes: &[&str],
    ) -> Result<(), CustomElementError> {
        if !Self::is_valid_name(name) {
            return Err(CustomElementError::InvalidName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(CustomElementError::AlreadyDefined(name.to_string()));
        }

        tracing::debug!("Defining custom element <{}>", name);
        self.definitions.insert(
            name.to_string(),
            CustomElementDefinition {
                name: name.to_string(),
                constructor,
                observed_attributes: observed_attributes.iter().map(|a| a.to_string()).collect(),
            },
        );
        Ok(())
    }

    /// Get element definition
    pub fn get(&self, name: &str) -> Option<&CustomElementDefinition<C>> {
        self.definitions.get(name)
    }

    /// Constructor for a tag name, if defined
    pub fn constructor(&self, name: &str) -> Option<C> {
        self.get(name).map(|d| d.constructor)
    }

    /// Check if element is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Whether `attribute` changes on `name` should run the attribute callback
    pub fn observes(&self, name: &str, attribute: &str) -> bool {
        self.get(name)
            .is_some_and(|d| d.observed_attributes.iter().any(|a| a.eq_ignore_ascii_case(attribute)))
    }

    /// Validate custom element name
    fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter
        if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return false;
        }

        if name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace()) {
            return false;
        }

        let reserved = ["annotation-xml", "color-profile", "font-face",
                       "font-face-src", "font-face-uri", "font-face-format",
                       "font-face-name", "missing-glyph"];
        !reserved.contains(&name)
    }
}

impl<C: Copy> Default for CustomElementRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
