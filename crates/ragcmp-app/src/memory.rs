//! In-memory [`DocumentRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use ragcmp_core::entities::Document;
use tokio::sync::RwLock;

use crate::error::CollaboratorError;
use crate::ports::DocumentRepository;

#[derive(Debug, Default)]
struct Store {
    /// Document ids in first-save order.
    order: Vec<String>,
    documents: HashMap<String, Document>,
}

/// Keeps documents in process memory.
///
/// `save` upserts by id; `find_all` lists documents in the order they were
/// first saved. Useful for embedding the pipeline without a database and as
/// the checkpoint log in tests.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    store: RwLock<Store>,
}

impl InMemoryDocumentRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.order.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), CollaboratorError> {
        let mut store = self.store.write().await;
        let previous = store
            .documents
            .insert(document.id().to_string(), document.clone());
        if previous.is_none() {
            store.order.push(document.id().to_string());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, CollaboratorError> {
        Ok(self.store.read().await.documents.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Document>, CollaboratorError> {
        let store = self.store.read().await;
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.documents.get(id).cloned())
            .collect())
    }
}
