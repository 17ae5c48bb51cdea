//! Formtree Compound: parent/children widgets and their container blueprints
//!
//! Registers three blueprints on a [`Factory`]:
//!
//! ```text
//! compound  extract children → render children (concatenated) → delegate values
//! fieldset  compound chains  + fieldset_renderer
//! form      compound chains  + form_renderer
//! ```
//!
//! # Example
//!
//! ```
//! use formtree_compound::default_factory;
//! use formtree_core::{renderer, RuntimeData, Widget};
//! use formtree_factory::{Blueprint, ComposeOptions};
//!
//! let mut factory = default_factory().unwrap();
//! factory
//!     .register(
//!         "echo",
//!         Blueprint::new(
//!             vec![],
//!             vec![renderer(|_w: &mut Widget, d: &RuntimeData| Ok(d.value().to_string()))],
//!         ),
//!     )
//!     .unwrap();
//!
//! let mut fieldset = factory
//!     .compose("fieldset", ComposeOptions::new().name("contact"))
//!     .unwrap();
//! fieldset
//!     .insert("email", factory.compose("echo", ComposeOptions::new().value("a@b.c")).unwrap())
//!     .unwrap();
//!
//! assert_eq!(
//!     fieldset.render(None, None).unwrap(),
//!     "<fieldset id=\"fieldset-contact\">a@b.c</fieldset>"
//! );
//! ```

mod compound;
mod containers;

pub use compound::{compound_extractor, compound_preprocessor, compound_renderer};
pub use containers::{FieldsetRenderer, FormRenderer};

use formtree_core::{extractor, preprocessor, renderer, Renderer};
use formtree_factory::{Blueprint, Factory, FactoryError};
use formtree_markup::{MarkupError, MarkupRenderer};
use std::sync::Arc;
use thiserror::Error;

pub const COMPOUND: &str = "compound";
pub const FIELDSET: &str = "fieldset";
pub const FORM: &str = "form";

/// Errors raised while setting up the compound blueprints
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

/// Registers `compound`, `fieldset` and `form` on `factory`.
///
/// The container blueprints reuse the compound chains as registered at
/// this point, plus one wrapping renderer each.
pub fn register(factory: &mut Factory, markup: Arc<MarkupRenderer>) -> Result<(), FactoryError> {
    factory.register(
        COMPOUND,
        Blueprint::new(
            vec![extractor(compound_extractor)],
            vec![renderer(compound_renderer)],
        )
        .with_preprocessors(vec![preprocessor(compound_preprocessor)]),
    )?;

    let containers: [(&str, Arc<dyn Renderer>); 2] = [
        (FIELDSET, Arc::new(FieldsetRenderer::new(markup.clone()))),
        (FORM, Arc::new(FormRenderer::new(markup))),
    ];
    for (name, wrapper) in containers {
        let extractors = factory.extractors(COMPOUND)?;
        let mut renderers = factory.renderers(COMPOUND)?;
        renderers.push(wrapper);
        let preprocessors = factory.preprocessors(COMPOUND)?;
        factory.register(
            name,
            Blueprint::new(extractors, renderers).with_preprocessors(preprocessors),
        )?;
    }
    Ok(())
}

/// A factory with the compound blueprints over the built-in markup.
pub fn default_factory() -> Result<Factory, SetupError> {
    let mut factory = Factory::new();
    register(&mut factory, Arc::new(MarkupRenderer::builtin()?))?;
    Ok(factory)
}
