//! Collaborator fakes shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use ragcmp_app::ports::{
    CompletionService, DocumentRepository, EmbeddingService, FileParser, GraphIndex,
    PromptRepository, VectorIndex,
};
use ragcmp_app::{CollaboratorError, DocumentProcessorDeps, EventDispatcher};
use ragcmp_core::entities::{Document, GraphData, PromptTemplate, QueryResult};
use ragcmp_core::enums::{EventKind, PromptKind};
use ragcmp_core::events::DomainEvent;

/// Install a fmt subscriber once per test binary, filtered by `RAGCMP_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_env("RAGCMP_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub const EXTRACTION_JSON: &str = r#"{"entities": [{"name": "hello", "type": "Greeting", "description": ""}], "relationships": []}"#;

// ---------------------------------------------------------------------------
// File parser
// ---------------------------------------------------------------------------

pub struct StubParser {
    outcome: Result<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl StubParser {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FileParser for StubParser {
    async fn parse(&self, path: &str) -> Result<String, CollaboratorError> {
        self.calls.lock().unwrap().push(path.to_string());
        self.outcome.clone().map_err(CollaboratorError::Extraction)
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Serves one template for `EntityExtraction` and nothing else.
pub struct StaticPrompts {
    template: Option<PromptTemplate>,
}

impl StaticPrompts {
    pub fn extraction() -> Self {
        let template = PromptTemplate::new(
            "entity_extraction",
            "Extract entities ({{language}}):\n{{text}}",
            "1.0",
            vec!["text".to_string(), "language".to_string()],
        )
        .unwrap();
        Self {
            template: Some(template),
        }
    }

    /// Extraction template that also requires an `audience` variable,
    /// which the pipeline never supplies.
    pub fn requiring_audience() -> Self {
        let template = PromptTemplate::new(
            "entity_extraction",
            "Extract entities for {{audience}} ({{language}}):\n{{text}}",
            "1.0",
            vec![
                "text".to_string(),
                "language".to_string(),
                "audience".to_string(),
            ],
        )
        .unwrap();
        Self {
            template: Some(template),
        }
    }

    pub fn empty() -> Self {
        Self { template: None }
    }
}

#[async_trait]
impl PromptRepository for StaticPrompts {
    async fn load(&self, kind: PromptKind) -> Result<PromptTemplate, CollaboratorError> {
        match (&self.template, kind) {
            (Some(template), PromptKind::EntityExtraction) => Ok(template.clone()),
            _ => Err(CollaboratorError::Prompt(format!(
                "no prompt registered for {kind}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

pub struct StubCompletion {
    outcome: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.clone().map_err(CollaboratorError::Completion)
    }
}

// ---------------------------------------------------------------------------
// Embeddings
// ---------------------------------------------------------------------------

enum EmbeddingMode {
    /// One vector of this many dimensions per input.
    PerInput(usize),
    /// The same fixed vector list regardless of input.
    Fixed(Vec<Vec<f32>>),
    Failing(String),
}

pub struct StubEmbeddings {
    mode: EmbeddingMode,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl StubEmbeddings {
    pub fn per_input(dims: usize) -> Self {
        Self::with_mode(EmbeddingMode::PerInput(dims))
    }

    pub fn fixed(vectors: Vec<Vec<f32>>) -> Self {
        Self::with_mode(EmbeddingMode::Fixed(vectors))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_mode(EmbeddingMode::Failing(message.to_string()))
    }

    fn with_mode(mode: EmbeddingMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmbeddingService for StubEmbeddings {
    async fn create_embeddings(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, CollaboratorError> {
        self.calls.lock().unwrap().push(texts.to_vec());
        match &self.mode {
            EmbeddingMode::PerInput(dims) => Ok(texts.iter().map(|_| vec![0.5; *dims]).collect()),
            EmbeddingMode::Fixed(vectors) => Ok(vectors.clone()),
            EmbeddingMode::Failing(message) => Err(CollaboratorError::Embedding(message.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Indexes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StoredEmbeddings {
    pub document_id: String,
    pub chunks: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
}

#[derive(Default)]
pub struct FakeVectorIndex {
    pub stored: Mutex<Vec<StoredEmbeddings>>,
    pub searches: Mutex<Vec<(Vec<f32>, usize)>>,
    pub store_error: Option<String>,
    pub search_outcome: Option<Result<Vec<QueryResult>, String>>,
}

impl FakeVectorIndex {
    pub fn searching(outcome: Result<Vec<QueryResult>, String>) -> Self {
        Self {
            search_outcome: Some(outcome),
            ..Self::default()
        }
    }

    pub fn failing_store(message: &str) -> Self {
        Self {
            store_error: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl VectorIndex for FakeVectorIndex {
    async fn store_embeddings(
        &self,
        document_id: &str,
        chunks: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<(), CollaboratorError> {
        if let Some(message) = &self.store_error {
            return Err(CollaboratorError::Index(message.clone()));
        }
        self.stored.lock().unwrap().push(StoredEmbeddings {
            document_id: document_id.to_string(),
            chunks: chunks.to_vec(),
            embeddings: embeddings.to_vec(),
        });
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, CollaboratorError> {
        self.searches
            .lock()
            .unwrap()
            .push((query_embedding.to_vec(), top_k));
        self.search_outcome
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map_err(CollaboratorError::Index)
    }
}

#[derive(Default)]
pub struct FakeGraphIndex {
    pub stored: Mutex<Vec<(String, GraphData)>>,
    pub queries: Mutex<Vec<String>>,
    pub store_error: Option<String>,
    pub search_outcome: Option<Result<Vec<QueryResult>, String>>,
}

impl FakeGraphIndex {
    pub fn searching(outcome: Result<Vec<QueryResult>, String>) -> Self {
        Self {
            search_outcome: Some(outcome),
            ..Self::default()
        }
    }

    pub fn failing_store(message: &str) -> Self {
        Self {
            store_error: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl GraphIndex for FakeGraphIndex {
    async fn store_graph(
        &self,
        document_id: &str,
        graph: &GraphData,
    ) -> Result<(), CollaboratorError> {
        if let Some(message) = &self.store_error {
            return Err(CollaboratorError::Index(message.clone()));
        }
        self.stored
            .lock()
            .unwrap()
            .push((document_id.to_string(), graph.clone()));
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<QueryResult>, CollaboratorError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.search_outcome
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map_err(CollaboratorError::Index)
    }

    async fn get_graph_data(
        &self,
        document_id: &str,
    ) -> Result<Option<GraphData>, CollaboratorError> {
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _)| id == document_id)
            .map(|(_, graph)| graph.clone()))
    }
}

// ---------------------------------------------------------------------------
// Document repository
// ---------------------------------------------------------------------------

/// Records a snapshot of every save, optionally failing from the n-th save on.
#[derive(Default)]
pub struct CheckpointLog {
    pub saves: Mutex<Vec<Document>>,
    pub fail_from: Option<usize>,
}

impl CheckpointLog {
    pub fn failing_from(save_index: usize) -> Self {
        Self {
            fail_from: Some(save_index),
            ..Self::default()
        }
    }

    pub fn snapshots(&self) -> Vec<Document> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRepository for CheckpointLog {
    async fn save(&self, document: &Document) -> Result<(), CollaboratorError> {
        let mut saves = self.saves.lock().unwrap();
        if self.fail_from.is_some_and(|n| saves.len() >= n) {
            return Err(CollaboratorError::Repository("database is locked".into()));
        }
        saves.push(document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, CollaboratorError> {
        Ok(self
            .saves
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|d| d.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Document>, CollaboratorError> {
        Ok(self.snapshots())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// All pipeline collaborators, kept concrete so tests can inspect them.
pub struct Harness {
    pub repo: Arc<CheckpointLog>,
    pub prompts: Arc<StaticPrompts>,
    pub vector: Arc<FakeVectorIndex>,
    pub graph: Arc<FakeGraphIndex>,
    pub dispatcher: Arc<EventDispatcher>,
    pub completion: Arc<StubCompletion>,
    pub embeddings: Arc<StubEmbeddings>,
    pub parser: Arc<StubParser>,
    pub events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl Harness {
    /// Every collaborator succeeds: text `"hello world"`, the extraction JSON
    /// completion, and 3-dimensional embeddings.
    pub fn happy() -> Self {
        let dispatcher = Arc::new(EventDispatcher::new());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        dispatcher.register_fn(EventKind::DocumentUploaded, move |event| {
            sink.lock().unwrap().push(event.clone());
            Ok(())
        });

        Self {
            repo: Arc::new(CheckpointLog::default()),
            prompts: Arc::new(StaticPrompts::extraction()),
            vector: Arc::new(FakeVectorIndex::default()),
            graph: Arc::new(FakeGraphIndex::default()),
            dispatcher,
            completion: Arc::new(StubCompletion::returning(EXTRACTION_JSON)),
            embeddings: Arc::new(StubEmbeddings::per_input(3)),
            parser: Arc::new(StubParser::returning("hello world")),
            events,
        }
    }

    pub fn deps(&self) -> DocumentProcessorDeps {
        DocumentProcessorDeps {
            document_repo: self.repo.clone(),
            prompt_repo: self.prompts.clone(),
            vector_index: self.vector.clone(),
            graph_index: self.graph.clone(),
            events: self.dispatcher.clone(),
            completion: self.completion.clone(),
            embeddings: self.embeddings.clone(),
            file_parser: self.parser.clone(),
        }
    }

    pub fn published(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}
