//! Factory: blueprint registry and widget composition
use std::collections::HashMap;

use formtree_core::{
    Attributes, ExtractorChain, Getter, PreprocessorChain, RendererChain, StageKind, Widget,
    WidgetError,
};
use serde_json::Value;

use crate::blueprint::{Blueprint, ChildBuilderChain};
use crate::error::FactoryError;

/// Caller-supplied inputs to [`Factory::compose`].
#[derive(Clone, Default)]
pub struct ComposeOptions {
    pub name: Option<String>,
    pub value: Getter,
    pub properties: Attributes,
    /// Ad-hoc blueprints addressed as `*name` in the blueprint list.
    pub custom: HashMap<String, Blueprint>,
}

impl ComposeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<Getter>) -> Self {
        self.value = value.into();
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: Attributes) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn custom(mut self, name: impl Into<String>, blueprint: Blueprint) -> Self {
        self.custom.insert(name.into(), blueprint);
        self
    }
}

/// Registry of blueprints, composed into widgets on demand.
///
/// Registration happens during setup; composing only reads the registry.
#[derive(Default)]
pub struct Factory {
    blueprints: HashMap<String, Blueprint>,
    global_preprocessors: PreprocessorChain,
}

impl Factory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `blueprint` under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        blueprint: Blueprint,
    ) -> Result<(), FactoryError> {
        let name = name.into();
        if name.starts_with('*') {
            return Err(FactoryError::ReservedName(name));
        }
        tracing::debug!(blueprint = %name, ?blueprint, "register");
        self.blueprints.insert(name, blueprint);
        Ok(())
    }

    /// Preprocessors prefixed onto every widget composed from now on.
    pub fn register_global_preprocessors(&mut self, preprocessors: PreprocessorChain) {
        self.global_preprocessors.extend(preprocessors);
    }

    /// Builds a widget from a colon-separated list of blueprint names.
    ///
    /// Extractors and renderers of a later blueprint are placed before the
    /// ones accumulated so far, so the last listed blueprint runs first.
    /// Preprocessors and child builders accumulate in listed order.
    pub fn compose(&self, names: &str, options: ComposeOptions) -> Result<Widget, FactoryError> {
        let mut extractors = ExtractorChain::new();
        let mut renderers = RendererChain::new();
        let mut preprocessors = PreprocessorChain::new();
        let mut child_builders = ChildBuilderChain::new();

        for name in names.split(':') {
            let blueprint = match name.strip_prefix('*') {
                Some(custom) => options
                    .custom
                    .get(custom)
                    .ok_or_else(|| FactoryError::UnknownCustomBlueprint(custom.to_string()))?,
                None => self.blueprint(name)?,
            };
            extractors = blueprint.extractors.iter().cloned().chain(extractors).collect();
            renderers = blueprint.renderers.iter().cloned().chain(renderers).collect();
            preprocessors.extend(blueprint.preprocessors.iter().cloned());
            child_builders.extend(blueprint.child_builders.iter().cloned());
        }

        let mut all_preprocessors = self.global_preprocessors.clone();
        all_preprocessors.extend(preprocessors);

        let mut widget = Widget::new(extractors, renderers, all_preprocessors)
            .with_getter(options.value)
            .with_attributes(options.properties);
        if let Some(name) = options.name {
            widget.set_name(name)?;
        }
        tracing::debug!(blueprints = names, widget = %widget.dotted_path(), "compose");

        for builder in &child_builders {
            builder.build(&mut widget, self).map_err(|source| {
                WidgetError::stage(StageKind::ChildBuilder, builder.name(), widget.path(), source)
            })?;
        }
        Ok(widget)
    }

    pub fn blueprint(&self, name: &str) -> Result<&Blueprint, FactoryError> {
        self.blueprints
            .get(name)
            .ok_or_else(|| FactoryError::UnknownBlueprint(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    /// Registered blueprint names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blueprints.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn extractors(&self, name: &str) -> Result<ExtractorChain, FactoryError> {
        Ok(self.blueprint(name)?.extractors.clone())
    }

    pub fn renderers(&self, name: &str) -> Result<RendererChain, FactoryError> {
        Ok(self.blueprint(name)?.renderers.clone())
    }

    /// Global preprocessors followed by the blueprint's own.
    pub fn preprocessors(&self, name: &str) -> Result<PreprocessorChain, FactoryError> {
        let mut chain = self.global_preprocessors.clone();
        chain.extend(self.blueprint(name)?.preprocessors.iter().cloned());
        Ok(chain)
    }

    pub fn child_builders(&self, name: &str) -> Result<ChildBuilderChain, FactoryError> {
        Ok(self.blueprint(name)?.child_builders.clone())
    }
}
