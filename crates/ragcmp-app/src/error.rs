//! Error types for the application layer.

use ragcmp_core::enums::EventKind;
use ragcmp_core::errors::CoreError;
use ragcmp_prompts::PromptError;
use thiserror::Error;

/// Failure reported by an external collaborator.
///
/// Collaborator failures are opaque: the variant records which family of
/// service failed and the message is shown verbatim. A failing collaborator's
/// text is what ends up in `Document::error` or a comparison branch error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Prompt(String),

    #[error("{0}")]
    Completion(String),

    #[error("{0}")]
    Embedding(String),

    #[error("{0}")]
    Repository(String),

    #[error("{0}")]
    Index(String),
}

impl CollaboratorError {
    /// The message carried by any variant.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Extraction(m)
            | Self::Prompt(m)
            | Self::Completion(m)
            | Self::Embedding(m)
            | Self::Repository(m)
            | Self::Index(m) => m,
        }
    }
}

impl From<PromptError> for CollaboratorError {
    fn from(error: PromptError) -> Self {
        Self::Prompt(error.to_string())
    }
}

/// Errors returned by [`EventDispatcher::dispatch`](crate::EventDispatcher::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed; handlers registered after it were not invoked.
    #[error("handler #{position} for {kind} event failed: {source}")]
    HandlerFailed {
        kind: EventKind,
        /// Zero-based position of the handler in registration order.
        position: usize,
        #[source]
        source: anyhow::Error,
    },
}

/// Anything that can stop the document pipeline.
///
/// Never escapes [`DocumentProcessor::execute`](crate::DocumentProcessor::execute);
/// its message becomes the failed document's error.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors that abort a comparison before either search branch starts.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Embedding the query text failed.
    #[error(transparent)]
    Embedding(#[from] CollaboratorError),

    /// The embedding service answered with no vector for the query.
    #[error("embedding service returned no vector for the query")]
    MissingQueryEmbedding,
}
