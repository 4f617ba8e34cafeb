//! Contracts for the external collaborators the pipeline and comparator call.
//!
//! Every trait is object safe and `Send + Sync` so implementations can be
//! shared as `Arc<dyn Trait>` across tasks. None of them retry. A failure is
//! reported once as a [`CollaboratorError`] and the caller decides what it
//! means.

use async_trait::async_trait;
use ragcmp_core::entities::{Document, GraphData, PromptTemplate, QueryResult};
use ragcmp_core::enums::PromptKind;
use ragcmp_core::events::DomainEvent;
use ragcmp_prompts::PromptLoader;

use crate::error::{CollaboratorError, DispatchError};

/// Extracts raw text from a file.
#[async_trait]
pub trait FileParser: Send + Sync {
    /// Fails with [`CollaboratorError::Extraction`] on unreadable or
    /// unsupported input.
    async fn parse(&self, path: &str) -> Result<String, CollaboratorError>;
}

/// Source of prompt templates, one per [`PromptKind`].
#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn load(&self, kind: PromptKind) -> Result<PromptTemplate, CollaboratorError>;
}

/// Text-completion (LLM) service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// Embedding service.
///
/// Returns exactly one vector per input text, in input order.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn create_embeddings(&self, texts: &[String])
    -> Result<Vec<Vec<f32>>, CollaboratorError>;
}

/// Nearest-neighbour index over chunk embeddings.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Store `chunks[i]` with `embeddings[i]` under `document_id`.
    async fn store_embeddings(
        &self,
        document_id: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<(), CollaboratorError>;

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, CollaboratorError>;
}

/// Knowledge-graph store.
#[async_trait]
pub trait GraphIndex: Send + Sync {
    async fn store_graph(&self, document_id: &str, graph: &GraphData)
    -> Result<(), CollaboratorError>;

    async fn search(&self, query: &str) -> Result<Vec<QueryResult>, CollaboratorError>;

    async fn get_graph_data(&self, document_id: &str)
    -> Result<Option<GraphData>, CollaboratorError>;
}

/// Persistence for [`Document`]s.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert or replace the document with the same id.
    async fn save(&self, document: &Document) -> Result<(), CollaboratorError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, CollaboratorError>;

    async fn find_all(&self) -> Result<Vec<Document>, CollaboratorError>;
}

/// Where the pipeline announces completed documents.
///
/// [`EventDispatcher`](crate::EventDispatcher) is the in-process implementation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &DomainEvent) -> Result<(), DispatchError>;
}

#[async_trait]
impl PromptRepository for PromptLoader {
    async fn load(&self, kind: PromptKind) -> Result<PromptTemplate, CollaboratorError> {
        Ok(Self::load(self, kind)?)
    }
}
