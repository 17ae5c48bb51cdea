//! Stage Traits: the pluggable callables a widget runs
//!
//! Every stage kind has exactly one operation. Plain `fn` items and closures
//! with the matching signature implement the traits; the helpers
//! [`extractor`], [`renderer`] and [`preprocessor`] box them into the shared
//! chain types.
use std::fmt;
use std::sync::Arc;

use crate::datum::Datum;
use crate::error::StageError;
use crate::runtime::RuntimeData;
use crate::widget::Widget;

/// Derives or validates a value from `data.request`.
pub trait Extractor: Send + Sync {
    /// Identity used when annotating failures.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn extract(&self, widget: &mut Widget, data: &RuntimeData) -> Result<Datum, StageError>;
}

/// Produces markup from the widget's value or extraction results.
pub trait Renderer: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn render(&self, widget: &mut Widget, data: &RuntimeData) -> anyhow::Result<String>;
}

/// Runs once per record before extraction or rendering.
pub trait Preprocessor: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn preprocess(&self, widget: &mut Widget, data: RuntimeData) -> anyhow::Result<RuntimeData>;
}

impl<F> Extractor for F
where
    F: Fn(&mut Widget, &RuntimeData) -> Result<Datum, StageError> + Send + Sync,
{
    fn extract(&self, widget: &mut Widget, data: &RuntimeData) -> Result<Datum, StageError> {
        self(widget, data)
    }
}

impl<F> Renderer for F
where
    F: Fn(&mut Widget, &RuntimeData) -> anyhow::Result<String> + Send + Sync,
{
    fn render(&self, widget: &mut Widget, data: &RuntimeData) -> anyhow::Result<String> {
        self(widget, data)
    }
}

impl<F> Preprocessor for F
where
    F: Fn(&mut Widget, RuntimeData) -> anyhow::Result<RuntimeData> + Send + Sync,
{
    fn preprocess(&self, widget: &mut Widget, data: RuntimeData) -> anyhow::Result<RuntimeData> {
        self(widget, data)
    }
}

pub type ExtractorChain = Vec<Arc<dyn Extractor>>;
pub type RendererChain = Vec<Arc<dyn Renderer>>;
pub type PreprocessorChain = Vec<Arc<dyn Preprocessor>>;

pub fn extractor<F>(f: F) -> Arc<dyn Extractor>
where
    F: Fn(&mut Widget, &RuntimeData) -> Result<Datum, StageError> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn renderer<F>(f: F) -> Arc<dyn Renderer>
where
    F: Fn(&mut Widget, &RuntimeData) -> anyhow::Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn preprocessor<F>(f: F) -> Arc<dyn Preprocessor>
where
    F: Fn(&mut Widget, RuntimeData) -> anyhow::Result<RuntimeData> + Send + Sync + 'static,
{
    Arc::new(f)
}

type GetterFn = dyn Fn(&Widget, &RuntimeData) -> anyhow::Result<Datum> + Send + Sync;

/// Source of a widget's working value: a literal or a callable.
#[derive(Clone)]
pub enum Getter {
    Value(Datum),
    Func(Arc<GetterFn>),
}

impl Getter {
    pub fn value(value: impl Into<Datum>) -> Self {
        Getter::Value(value.into())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Widget, &RuntimeData) -> anyhow::Result<Datum> + Send + Sync + 'static,
    {
        Getter::Func(Arc::new(f))
    }
}

impl Default for Getter {
    fn default() -> Self {
        Getter::Value(Datum::null())
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Getter::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Getter::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<Datum> for Getter {
    fn from(value: Datum) -> Self {
        Getter::Value(value)
    }
}

impl From<serde_json::Value> for Getter {
    fn from(value: serde_json::Value) -> Self {
        Getter::Value(Datum::Value(value))
    }
}

impl From<&str> for Getter {
    fn from(value: &str) -> Self {
        Getter::Value(Datum::from(value))
    }
}

impl From<String> for Getter {
    fn from(value: String) -> Self {
        Getter::Value(Datum::from(value))
    }
}

impl From<i64> for Getter {
    fn from(value: i64) -> Self {
        Getter::Value(Datum::from(value))
    }
}
