//! Container markup rendering.
//!
//! Uses Handlebars with one custom helper:
//! - attr: write ` name="value"` (escaped), or nothing for an empty value

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};
use serde::Serialize;
use serde_json::Value;

use crate::templates::TemplatesFile;
use crate::MarkupError;

/// Compiled renderer with registered helpers
pub struct MarkupRenderer {
    handlebars: Handlebars<'static>,
    templates: TemplatesFile,
}

impl MarkupRenderer {
    /// Create a new renderer from a templates file
    pub fn new(templates: TemplatesFile) -> Result<Self, MarkupError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_helper("attr", Box::new(AttrHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| MarkupError::Template {
                    name: name.clone(),
                    source: Box::new(e),
                })?;
        }

        Ok(MarkupRenderer {
            handlebars,
            templates,
        })
    }

    /// Renderer over the built-in `fieldset` and `form` templates.
    pub fn builtin() -> Result<Self, MarkupError> {
        Self::new(TemplatesFile::builtin()?)
    }

    /// Load from a file path, layered over the built-in templates
    pub fn load(path: &str) -> Result<Self, MarkupError> {
        let templates = TemplatesFile::builtin()?.merge(TemplatesFile::load(path)?);
        Self::new(templates)
    }

    /// Render a named template with data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String, MarkupError> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| MarkupError::Render {
                name: template_name.to_string(),
                source: Box::new(e),
            })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// List available template names
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}

/// Writes an HTML attribute, skipping null, false and empty values.
struct AttrHelper;

impl HelperDef for AttrHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let name = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
        let value = match h.param(1).map(|v| v.value()) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(()),
            Some(Value::String(s)) if s.is_empty() => return Ok(()),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        if name.is_empty() {
            return Ok(());
        }
        out.write(&format!(
            " {}=\"{}\"",
            name,
            handlebars::html_escape(&value)
        ))?;
        Ok(())
    }
}

/// CSS id for a widget: `prefix` plus its dotted path with dots as dashes.
pub fn cssid(dotted_path: &str, prefix: &str) -> String {
    format!("{}-{}", prefix, dotted_path.replace('.', "-"))
}
