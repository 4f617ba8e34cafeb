//! Status enums, prompt kinds, retrieval approaches, and event kinds for ragcmp.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`DocumentStatus`] carries the document lifecycle state machine through
//! `allowed_next_states()`, which every transition on
//! [`Document`](crate::entities::Document) checks before mutating.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

/// Status of a document through its processing lifecycle.
///
/// ```text
/// uploaded → processing → parsed → indexed
///     ↘          ↘           ↘        ↘
///                    failed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Parsed,
    Indexed,
    Failed,
}

impl DocumentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Uploaded,
        Self::Processing,
        Self::Parsed,
        Self::Indexed,
        Self::Failed,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Uploaded => &[Self::Processing, Self::Failed],
            Self::Processing => &[Self::Parsed, Self::Failed],
            Self::Parsed => &[Self::Indexed, Self::Failed],
            Self::Indexed => &[Self::Failed],
            Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Parsed => "parsed",
            Self::Indexed => "indexed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PromptKind
// ---------------------------------------------------------------------------

/// Category of prompt template the pipeline can request.
///
/// The string form doubles as the file stem of the persisted prompt
/// definition (`entity_extraction.yaml`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    EntityExtraction,
    SearchQuery,
    Summarization,
}

impl PromptKind {
    pub const ALL: [Self; 3] = [Self::EntityExtraction, Self::SearchQuery, Self::Summarization];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EntityExtraction => "entity_extraction",
            Self::SearchQuery => "search_query",
            Self::Summarization => "summarization",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RagType
// ---------------------------------------------------------------------------

/// Retrieval approach that produced a [`QueryResult`](crate::entities::QueryResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RagType {
    Vector,
    Graph,
}

impl RagType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for RagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RagType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector" => Ok(Self::Vector),
            "graph" => Ok(Self::Graph),
            other => Err(CoreError::Validation(format!(
                "rag_type must be 'vector' or 'graph', got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Exact variant tag of a [`DomainEvent`](crate::events::DomainEvent).
///
/// The dispatcher keys its handler registry on this tag. There is no
/// hierarchy between kinds: a handler registered for `Generic` never sees a
/// `DocumentUploaded` event and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Generic,
    DocumentUploaded,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::DocumentUploaded => "document_uploaded",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
