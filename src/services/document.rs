// Document Service
// The parts of a page the theme controller reads and writes

use thiserror::Error;

/// Attribute holding the active theme on the root (and body) element
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Selector matching theme-selection controls in markup
pub const THEME_CONTROL_SELECTOR: &str = "input.theme-controller";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Document rejected update: {0}")]
    Rejected(String),
}

/// An interactive element letting the user pick a theme directly
pub trait ThemeControl {
    fn value(&self) -> String;

    fn is_checked(&self) -> bool;

    fn set_checked(&mut self, checked: bool);
}

/// The page the controller applies themes to
pub trait ThemeDocument {
    /// Current value of the root presentation attribute
    fn theme_attribute(&self) -> Option<String>;

    fn set_theme_attribute(&mut self, theme: &str) -> Result<(), DocumentError>;

    fn set_body_theme_attribute(&mut self, theme: &str) -> Result<(), DocumentError>;

    /// Visit every theme-selection control currently in the document
    fn for_each_theme_control(
        &mut self,
        visit: &mut dyn FnMut(&mut dyn ThemeControl),
    ) -> Result<(), DocumentError>;
}

/// A radio/checkbox style control identified by its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeInput {
    pub value: String,
    pub checked: bool,
}

impl ThemeInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }
}

impl ThemeControl for ThemeInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn is_checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// Headless document holding attributes and controls in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    root_theme: Option<String>,
    body_theme: Option<String>,
    controls: Vec<ThemeInput>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controls<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            controls: values.into_iter().map(ThemeInput::new).collect(),
            ..Self::default()
        }
    }

    pub fn body_theme_attribute(&self) -> Option<&str> {
        self.body_theme.as_deref()
    }

    pub fn controls(&self) -> &[ThemeInput] {
        &self.controls
    }

    /// Value of the checked control, if any
    pub fn checked_value(&self) -> Option<&str> {
        self.controls
            .iter()
            .find(|control| control.checked)
            .map(|control| control.value.as_str())
    }

    /// Write the root attribute directly, bypassing any controller
    pub fn set_raw_theme_attribute(&mut self, value: Option<&str>) {
        self.root_theme = value.map(str::to_string);
    }
}

impl ThemeDocument for MemoryDocument {
    fn theme_attribute(&self) -> Option<String> {
        self.root_theme.clone()
    }

    fn set_theme_attribute(&mut self, theme: &str) -> Result<(), DocumentError> {
        self.root_theme = Some(theme.to_string());
        Ok(())
    }

    fn set_body_theme_attribute(&mut self, theme: &str) -> Result<(), DocumentError> {
        self.body_theme = Some(theme.to_string());
        Ok(())
    }

    fn for_each_theme_control(
        &mut self,
        visit: &mut dyn FnMut(&mut dyn ThemeControl),
    ) -> Result<(), DocumentError> {
        for control in self.controls.iter_mut() {
            visit(control);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_document_attributes() {
        let mut doc = MemoryDocument::new();
        assert_eq!(doc.theme_attribute(), None);

        doc.set_theme_attribute("dark").unwrap();
        doc.set_body_theme_attribute("dark").unwrap();
        assert_eq!(doc.theme_attribute().as_deref(), Some("dark"));
        assert_eq!(doc.body_theme_attribute(), Some("dark"));

        doc.set_raw_theme_attribute(None);
        assert_eq!(doc.theme_attribute(), None);
    }

    #[test]
    fn test_memory_document_visits_controls() {
        let mut doc = MemoryDocument::with_controls(["light", "dark"]);
        let mut seen = Vec::new();
        doc.for_each_theme_control(&mut |control| {
            seen.push(control.value());
            control.set_checked(true);
        })
        .unwrap();

        assert_eq!(seen, vec!["light".to_string(), "dark".to_string()]);
        assert!(doc.controls().iter().all(|c| c.checked));
        assert_eq!(doc.checked_value(), Some("light"));
    }
}
