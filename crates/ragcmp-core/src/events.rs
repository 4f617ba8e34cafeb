//! Domain events.
//!
//! Events are immutable once built: every field is private and only exposed
//! through accessors. [`DomainEvent`] is the closed set of variants the
//! dispatcher understands; [`DomainEvent::kind`] is the exact tag handlers are
//! registered under.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventKind;

/// An event that carries nothing but its occurrence time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenericEvent {
    occurred_at: DateTime<Utc>,
}

impl GenericEvent {
    /// An event that occurred now.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    #[must_use]
    pub const fn at(occurred_at: DateTime<Utc>) -> Self {
        Self { occurred_at }
    }

    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Default for GenericEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Raised once a document has been written to both indexes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentUploadedEvent {
    document_id: String,
    filename: String,
    occurred_at: DateTime<Utc>,
}

impl DocumentUploadedEvent {
    /// An event that occurred now.
    #[must_use]
    pub fn new(document_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::at(document_id, filename, Utc::now())
    }

    #[must_use]
    pub fn at(
        document_id: impl Into<String>,
        filename: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            filename: filename.into(),
            occurred_at,
        }
    }

    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Every event the dispatcher can route.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainEvent {
    Generic(GenericEvent),
    DocumentUploaded(DocumentUploadedEvent),
}

impl DomainEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Generic(_) => EventKind::Generic,
            Self::DocumentUploaded(_) => EventKind::DocumentUploaded,
        }
    }

    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Generic(e) => e.occurred_at(),
            Self::DocumentUploaded(e) => e.occurred_at(),
        }
    }
}

impl From<GenericEvent> for DomainEvent {
    fn from(event: GenericEvent) -> Self {
        Self::Generic(event)
    }
}

impl From<DocumentUploadedEvent> for DomainEvent {
    fn from(event: DocumentUploadedEvent) -> Self {
        Self::DocumentUploaded(event)
    }
}
