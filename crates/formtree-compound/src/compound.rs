//! Compound protocol: fan extraction and rendering out to named children
use anyhow::anyhow;
use indexmap::IndexMap;

use formtree_core::{Datum, Getter, RuntimeData, StageError, Widget};

/// Extracts every child from the parent's request.
///
/// Produces a `Map` from child name to that child's own record, in child
/// order. Child errors stay on the child records.
pub fn compound_extractor(widget: &mut Widget, data: &RuntimeData) -> Result<Datum, StageError> {
    let request = data.request.clone().unwrap_or_default();
    let mut records = IndexMap::new();
    for (name, child) in widget.children_mut() {
        let record = child.extract(&request).map_err(anyhow::Error::from)?;
        records.insert(name.to_string(), Datum::from(record));
    }
    Ok(Datum::Map(records))
}

/// Renders every child and concatenates the output in child order.
///
/// When the parent has extracted, each child renders the record found
/// under its name in the parent's first extraction result; otherwise the
/// child is rendered against the parent's request.
pub fn compound_renderer(widget: &mut Widget, data: &RuntimeData) -> anyhow::Result<String> {
    let first = data.extracted.first();
    let mut rendered = String::new();
    for (name, child) in widget.children_mut() {
        let child_data = match first {
            Some(extracted) => match extracted.get(name) {
                Some(Datum::Record(record)) => Some(*record),
                _ => {
                    return Err(anyhow!(
                        "first extraction result holds no record for child `{}`",
                        name
                    ))
                }
            },
            None => None,
        };
        rendered.push_str(&child.render(data.request.as_ref(), child_data)?);
    }
    Ok(rendered)
}

/// In delegation mode, hands `value[child]` down as each child's getter.
pub fn compound_preprocessor(widget: &mut Widget, data: RuntimeData) -> anyhow::Result<RuntimeData> {
    if widget.flag("delegation") {
        let value = data.value();
        tracing::debug!(widget = %widget.dotted_path(), children = widget.len(), "delegate value");
        for (name, child) in widget.children_mut() {
            child.getter = Getter::Value(value.get(name).unwrap_or_else(Datum::null));
        }
    }
    Ok(data)
}
