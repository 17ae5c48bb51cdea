//! Container renderers wrapping compound output in `<fieldset>` / `<form>`
use anyhow::anyhow;
use serde_json::{json, Value};
use std::sync::Arc;

use formtree_core::{Renderer, RuntimeData, Widget};
use formtree_markup::{cssid, MarkupRenderer};

/// Wraps the rendered children in a fieldset.
///
/// Reads `id.fieldset`, `class.fieldset` and `legend` from the widget
/// attributes. The id defaults to the widget's css id.
pub struct FieldsetRenderer {
    markup: Arc<MarkupRenderer>,
}

impl FieldsetRenderer {
    pub fn new(markup: Arc<MarkupRenderer>) -> Self {
        Self { markup }
    }
}

impl Renderer for FieldsetRenderer {
    fn name(&self) -> &str {
        "fieldset_renderer"
    }

    fn render(&self, widget: &mut Widget, data: &RuntimeData) -> anyhow::Result<String> {
        let id = widget
            .nested_attribute("id", "fieldset")
            .cloned()
            .unwrap_or_else(|| Value::String(cssid(&widget.dotted_path(), "fieldset")));
        let legend = if widget.flag("legend") {
            widget.attribute("legend").cloned()
        } else {
            None
        };
        let context = json!({
            "id": id,
            "class": widget.nested_attribute("class", "fieldset"),
            "legend": legend,
            "body": data.last_rendered(),
        });
        Ok(self.markup.render("fieldset", &context)?)
    }
}

/// Wraps the rendered children in a form.
///
/// `action` is required. `enctype` defaults to `multipart/form-data` for
/// `post` forms, the id to `form-<name>`.
pub struct FormRenderer {
    markup: Arc<MarkupRenderer>,
}

impl FormRenderer {
    pub fn new(markup: Arc<MarkupRenderer>) -> Self {
        Self { markup }
    }
}

impl Renderer for FormRenderer {
    fn name(&self) -> &str {
        "form_renderer"
    }

    fn render(&self, widget: &mut Widget, data: &RuntimeData) -> anyhow::Result<String> {
        let action = widget
            .attribute("action")
            .cloned()
            .ok_or_else(|| anyhow!("form requires an `action` property"))?;
        let method = widget.attribute("method").cloned().unwrap_or(Value::Null);
        let enctype = match widget.attribute("enctype") {
            Some(enctype) => enctype.clone(),
            None if method.as_str() == Some("post") => json!("multipart/form-data"),
            None => Value::Null,
        };
        let id = widget
            .nested_attribute("id", "form")
            .cloned()
            .unwrap_or_else(|| json!(format!("form-{}", widget.name().unwrap_or_default())));
        let context = json!({
            "action": action,
            "method": method,
            "enctype": enctype,
            "class": widget.nested_attribute("class", "form"),
            "id": id,
            "body": data.last_rendered(),
        });
        Ok(self.markup.render("form", &context)?)
    }
}
