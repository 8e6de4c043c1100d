//! Inline style declarations
//!
//! The `style` attribute and programmatic `element.style` writes land here.
//! Declarations keep their insertion order; property names are lowercased.

/// Ordered list of `property: value` declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value (`prop: value; prop: value`)
    ///
    /// Malformed declarations are skipped; later duplicates win.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            let Some((prop, value)) = decl.split_once(':') else { continue };
            let (prop, value) = (prop.trim(), value.trim());
            if prop.is_empty() || value.is_empty() {
                continue;
            }
            style.set(prop, value);
        }
        style
    }

    /// Get a property value
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, replacing an existing value in place
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| p.eq_ignore_ascii_case(property)) {
            Some((_, v)) => *v = value,
            None => self.declarations.push((property.to_ascii_lowercase(), value)),
        }
    }

    /// Remove a property, returning its old value
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self.declarations.iter().position(|(p, _)| p.eq_ignore_ascii_case(property))?;
        Some(self.declarations.remove(pos).1)
    }

    /// Set a pixel length (`12.5px`)
    pub fn set_px(&mut self, property: &str, value: f32) {
        self.set(property, format!("{value}px"));
    }

    /// Read a pixel length; bare `0` counts as zero pixels
    pub fn px(&self, property: &str) -> Option<f32> {
        let value = self.get(property)?;
        if value == "0" {
            return Some(0.0);
        }
        value.strip_suffix("px")?.trim().parse().ok()
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate declarations in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Serialize back to `style` attribute syntax
    pub fn to_css_text(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
