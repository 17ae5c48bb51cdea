//! Widget: a tree node owning extract/render/preprocess chains
//!
//! # Pipeline
//!
//! ```text
//! request → preprocess (once per record) → extractors → renderers → markup
//!                  ↓                            ↓            ↓
//!            data.value                 data.extracted  data.rendered
//! ```
//!
//! Extraction errors are recorded in-band on the record. Any other failure
//! from a stage is annotated with the stage's name and the widget path and
//! returned as [`WidgetError::Stage`].
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

use crate::datum::{json_truthy, Request};
use crate::error::{StageError, StageKind, WidgetError};
use crate::runtime::RuntimeData;
use crate::stage::{ExtractorChain, Getter, PreprocessorChain, RendererChain};

/// Opaque properties read by pluggable stages.
pub type Attributes = serde_json::Map<String, Value>;

pub struct Widget {
    pub(crate) name: Option<String>,
    pub(crate) parents: Vec<String>,
    pub(crate) children: IndexMap<String, Widget>,
    pub getter: Getter,
    pub extractors: ExtractorChain,
    pub renderers: RendererChain,
    pub preprocessors: PreprocessorChain,
    pub attributes: Attributes,
}

impl Widget {
    pub fn new(
        extractors: ExtractorChain,
        renderers: RendererChain,
        preprocessors: PreprocessorChain,
    ) -> Self {
        Self {
            name: None,
            parents: Vec::new(),
            children: IndexMap::new(),
            getter: Getter::default(),
            extractors,
            renderers,
            preprocessors,
            attributes: Attributes::new(),
        }
    }

    pub fn with_getter(mut self, getter: impl Into<Getter>) -> Self {
        self.getter = getter.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Nested attribute lookup, e.g. `("id", "fieldset")`.
    pub fn nested_attribute(&self, key: &str, inner: &str) -> Option<&Value> {
        self.attributes.get(key).and_then(|v| v.get(inner))
    }

    /// Whether an attribute is present and truthy.
    pub fn flag(&self, key: &str) -> bool {
        self.attributes.get(key).is_some_and(json_truthy)
    }

    /// Runs preprocessing, then every extractor in order.
    pub fn extract(&mut self, request: &Request) -> Result<RuntimeData, WidgetError> {
        tracing::debug!(widget = %self.dotted_path(), "extract");
        let mut data = self.preprocess(Some(request.clone()), RuntimeData::new())?;

        let extractors = self.extractors.clone();
        for extractor in &extractors {
            tracing::trace!(widget = %self.dotted_path(), stage = extractor.name(), "extractor");
            match extractor.extract(self, &data) {
                Ok(value) => data.extracted.push(value),
                Err(StageError::Extraction(err)) => {
                    tracing::debug!(
                        widget = %self.dotted_path(),
                        message = %err.message,
                        abort = err.abort,
                        "extraction error"
                    );
                    let abort = err.abort;
                    data.errors.push(err);
                    if abort {
                        break;
                    }
                }
                Err(StageError::Failed(source)) => {
                    return Err(self.stage_error(StageKind::Extractor, extractor.name(), source));
                }
            }
        }
        Ok(data)
    }

    /// Renders the widget and returns the last renderer output.
    ///
    /// - no `data`, no `request`: preprocess only and render the current value
    /// - no `data`, a `request`: run [`Widget::extract`] first
    /// - `data` given: use it as-is, extraction already happened upstream
    pub fn render(
        &mut self,
        request: Option<&Request>,
        data: Option<RuntimeData>,
    ) -> Result<String, WidgetError> {
        let data = self.run(request, data)?;
        Ok(data.last_rendered().to_string())
    }

    /// Same as [`Widget::render`] but hands back the whole record.
    pub fn run(
        &mut self,
        request: Option<&Request>,
        data: Option<RuntimeData>,
    ) -> Result<RuntimeData, WidgetError> {
        let mut data = match (data, request) {
            (Some(data), _) => data,
            (None, Some(request)) => self.extract(request)?,
            (None, None) => self.preprocess(None, RuntimeData::new())?,
        };
        tracing::debug!(widget = %self.dotted_path(), "render");

        let renderers = self.renderers.clone();
        for renderer in &renderers {
            tracing::trace!(widget = %self.dotted_path(), stage = renderer.name(), "renderer");
            let markup = renderer
                .render(self, &data)
                .map_err(|source| self.stage_error(StageKind::Renderer, renderer.name(), source))?;
            data.rendered.push(markup);
        }
        Ok(data)
    }

    /// Establishes `data.value` and runs the preprocessors, at most once per record.
    pub fn preprocess(
        &mut self,
        request: Option<Request>,
        data: RuntimeData,
    ) -> Result<RuntimeData, WidgetError> {
        if data.is_preprocessed() {
            tracing::debug!(widget = %self.dotted_path(), "already preprocessed");
            return Ok(data);
        }
        let mut data = data;
        data.request = request;
        let value = match self.getter.clone() {
            Getter::Value(value) => value,
            Getter::Func(getter) => getter(self, &data)
                .map_err(|source| self.stage_error(StageKind::Getter, "getter", source))?,
        };
        data.value = Some(value);

        let preprocessors = self.preprocessors.clone();
        for preprocessor in &preprocessors {
            tracing::trace!(widget = %self.dotted_path(), stage = preprocessor.name(), "preprocessor");
            data = preprocessor.preprocess(self, data).map_err(|source| {
                self.stage_error(StageKind::Preprocessor, preprocessor.name(), source)
            })?;
        }
        Ok(data)
    }

    fn stage_error(&self, stage: StageKind, callable: &str, source: anyhow::Error) -> WidgetError {
        WidgetError::stage(stage, callable, self.path(), source)
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("path", &self.path())
            .field("getter", &self.getter)
            .field("extractors", &self.extractors.len())
            .field("renderers", &self.renderers.len())
            .field("preprocessors", &self.preprocessors.len())
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::Datum;
    use crate::error::ExtractionError;
    use crate::stage::{extractor, preprocessor, renderer};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn request(value: Value) -> Request {
        value.as_object().cloned().unwrap_or_default()
    }

    fn push(label: &'static str) -> Arc<dyn crate::stage::Extractor> {
        extractor(move |_w: &mut Widget, _d: &RuntimeData| Ok(Datum::from(label)))
    }

    fn fail(message: &'static str, abort: bool) -> Arc<dyn crate::stage::Extractor> {
        extractor(move |_w: &mut Widget, _d: &RuntimeData| {
            Err(ExtractionError {
                message: message.to_string(),
                abort,
            }
            .into())
        })
    }

    #[test]
    fn test_aborting_error_stops_chain() {
        let mut widget = Widget::new(vec![fail("first", true), push("never")], vec![], vec![]);
        let data = widget.extract(&Request::new()).unwrap();
        assert!(data.extracted.is_empty());
        assert_eq!(data.errors, vec![ExtractionError::new("first")]);
    }

    #[test]
    fn test_non_aborting_errors_continue_chain() {
        let mut widget = Widget::new(
            vec![fail("a", false), push("one"), fail("b", false), push("two")],
            vec![],
            vec![],
        );
        let data = widget.extract(&Request::new()).unwrap();
        assert_eq!(data.extracted, vec![Datum::from("one"), Datum::from("two")]);
        let messages: Vec<&str> = data.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn test_fatal_extractor_failure_is_annotated() {
        let boom = extractor(|_w: &mut Widget, _d: &RuntimeData| {
            Err(anyhow::anyhow!("exploded").into())
        });
        let mut widget = Widget::new(vec![boom], vec![], vec![]);
        widget.set_name("field").unwrap();
        let err = widget.extract(&Request::new()).unwrap_err();
        match err {
            WidgetError::Stage { stage, path, .. } => {
                assert_eq!(stage, StageKind::Extractor);
                assert_eq!(path, vec!["field".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_without_request_skips_extraction() {
        let show_value = renderer(|_w: &mut Widget, d: &RuntimeData| Ok(d.value().to_string()));
        let mut widget = Widget::new(vec![push("extracted")], vec![show_value], vec![])
            .with_getter("current");
        let data = widget.run(None, None).unwrap();
        assert!(data.extracted.is_empty());
        assert_eq!(data.request, None);
        assert_eq!(data.last_rendered(), "current");
    }

    #[test]
    fn test_render_with_request_extracts_first() {
        let show_last = renderer(|_w: &mut Widget, d: &RuntimeData| {
            Ok(d.last_extracted().to_string())
        });
        let mut widget = Widget::new(vec![push("extracted")], vec![show_last], vec![]);
        let out = widget.render(Some(&request(json!({"k": "v"}))), None).unwrap();
        assert_eq!(out, "extracted");
    }

    #[test]
    fn test_render_chain_sees_previous_output() {
        let inner = renderer(|_w: &mut Widget, _d: &RuntimeData| Ok("inner".to_string()));
        let wrap = renderer(|_w: &mut Widget, d: &RuntimeData| {
            Ok(format!("<div>{}</div>", d.last_rendered()))
        });
        let mut widget = Widget::new(vec![], vec![inner, wrap], vec![]);
        let data = widget.run(None, None).unwrap();
        assert_eq!(data.rendered, vec!["inner", "<div>inner</div>"]);
        assert_eq!(data.last_rendered(), "<div>inner</div>");
    }

    #[test]
    fn test_preprocessing_runs_once_per_record() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let count = preprocessor(move |_w: &mut Widget, d: RuntimeData| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(d)
        });
        let mut widget = Widget::new(vec![push("x")], vec![], vec![count]);

        let data = widget.extract(&Request::new()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let data = widget.preprocess(Some(Request::new()), data).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        widget.run(None, Some(data)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_preprocessor_can_replace_value() {
        let upper = preprocessor(|_w: &mut Widget, mut d: RuntimeData| {
            let text = d.value().to_string().to_uppercase();
            d.value = Some(Datum::from(text));
            Ok(d)
        });
        let mut widget = Widget::new(vec![], vec![], vec![upper]).with_getter("abc");
        let data = widget.preprocess(None, RuntimeData::new()).unwrap();
        assert_eq!(data.value, Some(Datum::from("ABC")));
    }

    #[test]
    fn test_callable_getter_sees_request() {
        let mut widget = Widget::new(vec![], vec![], vec![]).with_getter(Getter::func(
            |_w: &Widget, d: &RuntimeData| {
                let seen = d.request.as_ref().map(|r| r.len()).unwrap_or(0) as i64;
                Ok(Datum::from(seen))
            },
        ));
        let data = widget.extract(&request(json!({"a": 1, "b": 2}))).unwrap();
        assert_eq!(data.value, Some(Datum::from(2i64)));
    }

    #[test]
    fn test_failing_getter_is_fatal() {
        let mut widget = Widget::new(vec![], vec![], vec![]).with_getter(Getter::func(
            |_w: &Widget, _d: &RuntimeData| Err(anyhow::anyhow!("no value")),
        ));
        let err = widget.render(None, None).unwrap_err();
        assert!(matches!(
            err,
            WidgetError::Stage {
                stage: StageKind::Getter,
                ..
            }
        ));
    }

    #[test]
    fn test_flag_attribute() {
        let mut attributes = Attributes::new();
        attributes.insert("delegation".to_string(), json!(true));
        attributes.insert("legend".to_string(), json!(""));
        let widget = Widget::new(vec![], vec![], vec![]).with_attributes(attributes);
        assert!(widget.flag("delegation"));
        assert!(!widget.flag("legend"));
        assert!(!widget.flag("missing"));
    }

    #[test]
    fn test_flag_uses_value_truthiness() {
        let mut attributes = Attributes::new();
        attributes.insert("delegation".to_string(), json!(0));
        attributes.insert("legend".to_string(), json!([]));
        attributes.insert("size".to_string(), json!(3));
        let widget = Widget::new(vec![], vec![], vec![]).with_attributes(attributes);
        assert!(!widget.flag("delegation"));
        assert!(!widget.flag("legend"));
        assert!(widget.flag("size"));
    }

    #[test]
    fn test_failing_preprocessor_is_annotated() {
        let mut parent = Widget::new(vec![], vec![], vec![]);
        parent.set_name("form").unwrap();
        let child = Widget::new(
            vec![],
            vec![],
            vec![preprocessor(|_w: &mut Widget, _d: RuntimeData| {
                Err(anyhow::anyhow!("broken setup"))
            })],
        );
        parent.insert("name", child).unwrap();

        let err = parent
            .child_mut("name")
            .unwrap()
            .extract(&Request::new())
            .unwrap_err();
        match err {
            WidgetError::Stage {
                stage,
                path,
                source,
                ..
            } => {
                assert_eq!(stage, StageKind::Preprocessor);
                assert_eq!(path, vec!["form", "name"]);
                assert_eq!(source.to_string(), "broken setup");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
