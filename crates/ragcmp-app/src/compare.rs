//! Side-by-side vector RAG vs graph RAG comparison.

use std::sync::Arc;

use ragcmp_config::CompareConfig;
use ragcmp_core::entities::{ComparisonResult, QueryResult};
use ragcmp_core::enums::RagType;

use crate::error::{CollaboratorError, CompareError};
use crate::ports::{EmbeddingService, GraphIndex, VectorIndex};

/// Number of vector hits requested when nothing else is configured.
pub const DEFAULT_TOP_K: usize = 5;

/// Queries both indexes for the same question.
///
/// The query is embedded first; a failure there aborts the comparison. The
/// vector search and the graph search then run concurrently and both always
/// run to completion. A failing branch contributes an empty result list and
/// its error message. It never affects the other branch.
pub struct RagComparator {
    vector_index: Arc<dyn VectorIndex>,
    graph_index: Arc<dyn GraphIndex>,
    embeddings: Arc<dyn EmbeddingService>,
    top_k: usize,
}

impl RagComparator {
    #[must_use]
    pub fn new(
        vector_index: Arc<dyn VectorIndex>,
        graph_index: Arc<dyn GraphIndex>,
        embeddings: Arc<dyn EmbeddingService>,
    ) -> Self {
        Self {
            vector_index,
            graph_index,
            embeddings,
            top_k: DEFAULT_TOP_K,
        }
    }

    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    #[must_use]
    pub fn from_config(
        vector_index: Arc<dyn VectorIndex>,
        graph_index: Arc<dyn GraphIndex>,
        embeddings: Arc<dyn EmbeddingService>,
        config: &CompareConfig,
    ) -> Self {
        Self::new(vector_index, graph_index, embeddings).with_top_k(config.top_k)
    }

    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Compare using the configured `top_k`.
    ///
    /// # Errors
    ///
    /// See [`execute_with_top_k`](Self::execute_with_top_k).
    pub async fn execute(&self, query: &str) -> Result<ComparisonResult, CompareError> {
        self.execute_with_top_k(query, self.top_k).await
    }

    /// # Errors
    ///
    /// Returns [`CompareError::Embedding`] if the query cannot be embedded and
    /// [`CompareError::MissingQueryEmbedding`] if the embedding service
    /// returns no vector. Search failures are never returned as errors.
    pub async fn execute_with_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<ComparisonResult, CompareError> {
        let query_embedding = self.embed_query(query).await?;

        let (vector, graph) = tokio::join!(
            self.vector_index.search(&query_embedding, top_k),
            self.graph_index.search(query),
        );

        let result = ComparisonResult::new(
            query,
            settle(RagType::Vector, vector),
            settle(RagType::Graph, graph),
        );

        tracing::info!(
            query,
            vector_hits = result.vector_results().len(),
            graph_hits = result.graph_results().len(),
            vector_failed = result.vector_error().is_some(),
            graph_failed = result.graph_error().is_some(),
            "comparison complete"
        );

        Ok(result)
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, CompareError> {
        let mut vectors = self
            .embeddings
            .create_embeddings(&[query.to_string()])
            .await?;
        if vectors.is_empty() {
            return Err(CompareError::MissingQueryEmbedding);
        }
        Ok(vectors.swap_remove(0))
    }
}

/// Reduce a branch failure to its message, logging it.
fn settle(
    branch: RagType,
    outcome: Result<Vec<QueryResult>, CollaboratorError>,
) -> Result<Vec<QueryResult>, String> {
    outcome.map_err(|error| {
        tracing::warn!(%branch, %error, "search branch failed");
        error.to_string()
    })
}
