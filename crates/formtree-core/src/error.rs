//! Error Model: recoverable extraction errors vs fatal widget errors
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Recoverable problem found while extracting, e.g. a failed validation.
///
/// Recorded on [`crate::RuntimeData::errors`]. When `abort` is set the
/// remaining extractors of the widget are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ExtractionError {
    pub message: String,
    pub abort: bool,
}

impl ExtractionError {
    /// Aborting error, the default.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            abort: true,
        }
    }

    /// Error that lets the extractor chain continue.
    pub fn non_aborting(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            abort: false,
        }
    }
}

/// Failure returned by an extractor.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Kind of pluggable callable, used to annotate fatal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Getter,
    Preprocessor,
    Extractor,
    Renderer,
    ChildBuilder,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Getter => "getter",
            Self::Preprocessor => "preprocessor",
            Self::Extractor => "extractor",
            Self::Renderer => "renderer",
            Self::ChildBuilder => "child builder",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum WidgetError {
    /// A pluggable callable failed unexpectedly.
    #[error("{stage} `{callable}` failed at /{}: {source}", .path.join("/"))]
    Stage {
        stage: StageKind,
        callable: String,
        path: Vec<String>,
        #[source]
        source: anyhow::Error,
    },

    #[error("INTEGRITY/{0}")]
    Integrity(String),

    #[error("NAME/invalid widget name `{0}`: alphanumerics only, not starting with a digit")]
    InvalidName(String),

    #[error("TREE/no child `{child}` at /{}", .path.join("/"))]
    MissingChild { path: Vec<String>, child: String },
}

impl WidgetError {
    /// Annotates a failed stage with its identity and the widget path.
    pub fn stage(
        stage: StageKind,
        callable: &str,
        path: Vec<String>,
        source: anyhow::Error,
    ) -> Self {
        tracing::error!(%stage, callable, path = %path.join("/"), error = %source, "stage failed");
        WidgetError::Stage {
            stage,
            callable: callable.to_string(),
            path,
            source,
        }
    }
}
