//! Template loading for container markup.
//!
//! Supports a YAML file with:
//! - Multiple named templates
//! - Handlebars syntax
//! - Optional example data and expected output per template

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;

use crate::MarkupError;

/// Templates shipped with the crate: `fieldset` and `form`.
pub const BUILTIN_TEMPLATES: &str = include_str!("../templates/containers.yaml");

static BUILTIN: OnceCell<TemplatesFile> = OnceCell::new();

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
    #[serde(default)]
    pub example: Option<serde_json::Value>,
    #[serde(default)]
    pub output: Option<String>,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, MarkupError> {
        let content = std::fs::read_to_string(path).map_err(|e| MarkupError::Load {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, MarkupError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The built-in templates, parsed once.
    pub fn builtin() -> Result<Self, MarkupError> {
        BUILTIN
            .get_or_try_init(|| Self::from_yaml(BUILTIN_TEMPLATES))
            .cloned()
    }

    /// Overlays `other` on top of these templates.
    pub fn merge(mut self, other: TemplatesFile) -> Self {
        self.templates.extend(other.templates);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// List all template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let file = TemplatesFile::builtin().unwrap();
        assert_eq!(file.version, "1.0");
        assert_eq!(file.list_templates(), vec!["fieldset", "form"]);
        assert!(file.get("fieldset").unwrap().output.is_some());
    }

    #[test]
    fn test_merge_overrides_by_name() {
        let custom = TemplatesFile::from_yaml(
            r#"
version: "1.0"
templates:
  fieldset:
    description: Bare fieldset
    template: "<fieldset>{{{body}}}</fieldset>"
"#,
        )
        .unwrap();
        let merged = TemplatesFile::builtin().unwrap().merge(custom);
        assert_eq!(
            merged.get("fieldset").unwrap().template,
            "<fieldset>{{{body}}}</fieldset>"
        );
        assert!(merged.get("form").is_some());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            TemplatesFile::from_yaml("templates: [unclosed"),
            Err(MarkupError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TemplatesFile::load("/nonexistent/containers.yaml"),
            Err(MarkupError::Load { .. })
        ));
    }
}
