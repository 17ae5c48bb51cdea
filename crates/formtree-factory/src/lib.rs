//! Formtree Factory: blueprint registry and widget composition
//!
//! Blueprints are registered once during setup and composed into widgets
//! by colon-separated name lists:
//!
//! ```text
//! "text:label"  →  extractors: label + text
//!                  renderers:  label + text
//!                  preprocessors: global + text + label
//! ```
//!
//! # Example
//!
//! ```
//! use formtree_core::{renderer, RuntimeData, Widget};
//! use formtree_factory::{Blueprint, ComposeOptions, Factory};
//!
//! let mut factory = Factory::new();
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
//! let mut widget = factory
//!     .compose("echo", ComposeOptions::new().name("greeting").value("hi"))
//!     .unwrap();
//! assert_eq!(widget.render(None, None).unwrap(), "hi");
//! ```

pub mod blueprint;
pub mod error;
pub mod factory;

pub use blueprint::{child_builder, Blueprint, ChildBuilder, ChildBuilderChain};
pub use error::FactoryError;
pub use factory::{ComposeOptions, Factory};
