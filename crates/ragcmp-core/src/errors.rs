//! Cross-cutting error types for ragcmp.
//!
//! This module defines errors raised by the domain types themselves.
//! Collaborator, dispatch, and pipeline errors live in `ragcmp-app`; prompt
//! file errors live in `ragcmp-prompts`.

use thiserror::Error;

/// Errors that can be raised by any ragcmp domain type.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (empty names, out-of-range scores, missing
    /// template variables, inconsistent persisted state).
    #[error("Validation error: {0}")]
    Validation(String),
}
