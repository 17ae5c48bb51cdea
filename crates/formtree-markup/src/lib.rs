//! Formtree Markup: container tags for compound widgets
//!
//! Renders the wrapper markup (`<fieldset>`, `<form>`) around the output of
//! already-rendered child widgets. Templates are Handlebars strings loaded
//! from YAML; the crate ships a built-in set.
//!
//! # Example
//!
//! ```
//! use formtree_markup::MarkupRenderer;
//! use serde_json::json;
//!
//! let renderer = MarkupRenderer::builtin().unwrap();
//! let out = renderer
//!     .render("fieldset", &json!({ "id": "fieldset-f", "body": "<input />" }))
//!     .unwrap();
//! assert_eq!(out, "<fieldset id=\"fieldset-f\"><input /></fieldset>");
//! ```

pub mod renderer;
pub mod templates;

pub use renderer::{cssid, MarkupRenderer};
pub use templates::{Template, TemplatesFile, BUILTIN_TEMPLATES};

use thiserror::Error;

/// Errors that can occur while loading or rendering markup templates
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Template file `{path}` could not be read: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Template file parse failed: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Template `{name}` failed to compile: {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },
    #[error("Template `{name}` failed to render: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
