//! Factory errors
use formtree_core::WidgetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("REGISTRY/`*` as first character is reserved for custom blueprints: `{0}`")]
    ReservedName(String),

    #[error("REGISTRY/unknown blueprint `{0}`")]
    UnknownBlueprint(String),

    #[error("REGISTRY/unknown custom blueprint `*{0}`")]
    UnknownCustomBlueprint(String),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}
