use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::DocumentStatus;
use crate::errors::CoreError;
use crate::ids::{PREFIX_DOCUMENT, generate_id};

const ENTITY_TYPE: &str = "document";

/// A file submitted for indexing into both retrieval indexes.
///
/// The document is the aggregate root of the processing pipeline. Its status
/// only moves through the transition methods below, each of which checks
/// [`DocumentStatus::allowed_next_states`] first and leaves the document
/// untouched when the move is rejected.
///
/// Invariants:
/// - `filename` is never empty.
/// - `error` is set iff `status == Failed`.
/// - `parsed_content` is only set once the document has reached `Parsed`.
///
/// Deserialization checks the same invariants and rejects records that
/// break them.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct Document {
    id: String,
    filename: String,
    content: String,
    status: DocumentStatus,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
    created_at: DateTime<Utc>,
    parsed_content: Option<String>,
    error: Option<String>,
}

impl Document {
    /// Create a new document in the `Uploaded` state with empty content.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `filename` is empty.
    pub fn new(filename: impl Into<String>) -> Result<Self, CoreError> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(CoreError::Validation(
                "Document filename cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: generate_id(PREFIX_DOCUMENT),
            filename,
            content: String::new(),
            status: DocumentStatus::Uploaded,
            metadata: BTreeMap::new(),
            created_at: Utc::now(),
            parsed_content: None,
            error: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Raw text extracted from the source file.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn status(&self) -> DocumentStatus {
        self.status
    }

    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Text produced by the entity-extraction step.
    #[must_use]
    pub fn parsed_content(&self) -> Option<&str> {
        self.parsed_content.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record the raw text extracted from the source file.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Attach an opaque metadata entry. The core never interprets metadata.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }

    /// `uploaded → processing`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the document is `Uploaded`.
    pub fn start_processing(&mut self) -> Result<(), CoreError> {
        self.transition_to(DocumentStatus::Processing)
    }

    /// `processing → parsed`, recording the extraction output.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the document is `Processing`.
    pub fn mark_parsed(&mut self, parsed_content: impl Into<String>) -> Result<(), CoreError> {
        self.transition_to(DocumentStatus::Parsed)?;
        self.parsed_content = Some(parsed_content.into());
        Ok(())
    }

    /// `parsed → indexed`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the document is `Parsed`.
    pub fn mark_indexed(&mut self) -> Result<(), CoreError> {
        self.transition_to(DocumentStatus::Indexed)
    }

    /// Move to the terminal `Failed` state from any other state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the document already failed.
    pub fn mark_failed(&mut self, error: impl Into<String>) -> Result<(), CoreError> {
        if self.status == DocumentStatus::Failed {
            return Err(self.invalid_transition(DocumentStatus::Failed));
        }
        self.transition_to(DocumentStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    fn transition_to(&mut self, next: DocumentStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(self.invalid_transition(next));
        }
        self.status = next;
        Ok(())
    }

    fn invalid_transition(&self, next: DocumentStatus) -> CoreError {
        CoreError::InvalidTransition {
            entity_type: ENTITY_TYPE.to_string(),
            id: self.id.clone(),
            from: self.status.as_str().to_string(),
            to: next.as_str().to_string(),
        }
    }
}

#[derive(Deserialize)]
struct DocumentRecord {
    id: String,
    filename: String,
    #[serde(default)]
    content: String,
    status: DocumentStatus,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    parsed_content: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<DocumentRecord> for Document {
    type Error = CoreError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        if record.id.is_empty() {
            return Err(CoreError::Validation("Document id cannot be empty".to_string()));
        }
        if record.filename.is_empty() {
            return Err(CoreError::Validation(
                "Document filename cannot be empty".to_string(),
            ));
        }

        let failed = record.status == DocumentStatus::Failed;
        if failed != record.error.is_some() {
            return Err(CoreError::Validation(format!(
                "document {} has status {} but error is {}",
                record.id,
                record.status,
                if record.error.is_some() { "set" } else { "missing" }
            )));
        }

        let parsed_allowed = matches!(
            record.status,
            DocumentStatus::Parsed | DocumentStatus::Indexed | DocumentStatus::Failed
        );
        if record.parsed_content.is_some() && !parsed_allowed {
            return Err(CoreError::Validation(format!(
                "document {} has parsed content before reaching parsed (status {})",
                record.id, record.status
            )));
        }

        Ok(Self {
            id: record.id,
            filename: record.filename,
            content: record.content,
            status: record.status,
            metadata: record.metadata,
            created_at: record.created_at,
            parsed_content: record.parsed_content,
            error: record.error,
        })
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = DocumentRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}
