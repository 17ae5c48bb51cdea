//! Formtree Core: Widget tree, RuntimeData and the pipeline engine
//!
//! A [`Widget`] owns three ordered chains of pluggable stages and a getter
//! for its working value. One invocation of a widget accumulates its state
//! in a [`RuntimeData`] record.
//!
//! # Example
//!
//! ```
//! use formtree_core::{extractor, renderer, Datum, Request, RuntimeData, Widget};
//!
//! let mut widget = Widget::new(
//!     vec![extractor(|_w: &mut Widget, d: &RuntimeData| Ok(d.value()))],
//!     vec![renderer(|_w: &mut Widget, d: &RuntimeData| Ok(d.last_extracted().to_string()))],
//!     vec![],
//! )
//! .with_getter("hello");
//!
//! let out = widget.render(Some(&Request::new()), None).unwrap();
//! assert_eq!(out, "hello");
//! ```

pub mod datum;
pub mod error;
pub mod runtime;
pub mod stage;
pub mod tree;
pub mod widget;

pub use datum::{Datum, Request};
pub use error::{ExtractionError, StageError, StageKind, WidgetError};
pub use runtime::RuntimeData;
pub use stage::{
    extractor, preprocessor, renderer, Extractor, ExtractorChain, Getter, Preprocessor,
    PreprocessorChain, Renderer, RendererChain,
};
pub use tree::is_valid_name;
pub use widget::{Attributes, Widget};
