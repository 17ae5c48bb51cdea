//! Blueprints: named, reusable pipeline fragments
use std::fmt;
use std::sync::Arc;

use formtree_core::{ExtractorChain, PreprocessorChain, RendererChain, Widget};

use crate::factory::Factory;

/// Attaches children to a freshly composed widget.
pub trait ChildBuilder: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn build(&self, widget: &mut Widget, factory: &Factory) -> anyhow::Result<()>;
}

impl<F> ChildBuilder for F
where
    F: Fn(&mut Widget, &Factory) -> anyhow::Result<()> + Send + Sync,
{
    fn build(&self, widget: &mut Widget, factory: &Factory) -> anyhow::Result<()> {
        self(widget, factory)
    }
}

pub type ChildBuilderChain = Vec<Arc<dyn ChildBuilder>>;

pub fn child_builder<F>(f: F) -> Arc<dyn ChildBuilder>
where
    F: Fn(&mut Widget, &Factory) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The four chains a factory entry contributes to a composed widget.
#[derive(Clone, Default)]
pub struct Blueprint {
    pub extractors: ExtractorChain,
    pub renderers: RendererChain,
    pub preprocessors: PreprocessorChain,
    pub child_builders: ChildBuilderChain,
}

impl Blueprint {
    pub fn new(extractors: ExtractorChain, renderers: RendererChain) -> Self {
        Self {
            extractors,
            renderers,
            ..Self::default()
        }
    }

    pub fn with_preprocessors(mut self, preprocessors: PreprocessorChain) -> Self {
        self.preprocessors = preprocessors;
        self
    }

    pub fn with_child_builders(mut self, child_builders: ChildBuilderChain) -> Self {
        self.child_builders = child_builders;
        self
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |stages: Vec<&str>| stages.join(", ");
        f.debug_struct("Blueprint")
            .field("extractors", &names(self.extractors.iter().map(|s| s.name()).collect()))
            .field("renderers", &names(self.renderers.iter().map(|s| s.name()).collect()))
            .field(
                "preprocessors",
                &names(self.preprocessors.iter().map(|s| s.name()).collect()),
            )
            .field(
                "child_builders",
                &names(self.child_builders.iter().map(|s| s.name()).collect()),
            )
            .finish()
    }
}
