//! Prompt loading error types.

use std::path::PathBuf;

use ragcmp_core::enums::PromptKind;
use ragcmp_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// No definition file exists for the requested kind.
    #[error("Prompt file not found for {kind}: {}", path.display())]
    NotFound { kind: PromptKind, path: PathBuf },

    /// The file is not a record, or a required field is missing or mistyped.
    #[error("Invalid prompt file {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: figment::Error,
    },

    /// The definition parsed but violates a template invariant (empty name or template).
    #[error(transparent)]
    Core(#[from] CoreError),
}
