//! The document indexing pipeline.
//!
//! [`DocumentProcessor::execute`] runs these phases in order. A checkpoint
//! means the document is saved to the repository before the next phase starts.
//!
//! | # | phase | checkpoint status |
//! |---|-------|-------------------|
//! | 1 | extract raw text from the file | `uploaded` |
//! | 2 | start processing | `processing` |
//! | 3 | load and render the entity-extraction prompt | |
//! | 4 | request a completion | |
//! | 5 | record the completion as parsed content | `parsed` |
//! | 6 | split the raw text into chunks | |
//! | 7 | embed the chunks and store them in the vector index | |
//! | 8 | parse the completion as graph data and store it in the graph index | |
//! | 9 | mark indexed | `indexed` |
//! | 10 | publish a `DocumentUploadedEvent` | |
//!
//! The first error from any phase stops the run. The document is marked
//! failed with that error's message, saved, and returned. No event is
//! published for a failed document. Vector and graph writes are not
//! coordinated, so a failure after phase 7 can leave embeddings stored for a
//! document that never reaches `indexed`.

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use ragcmp_config::{ConfigError, PipelineConfig};
use ragcmp_core::entities::Document;
use ragcmp_core::enums::PromptKind;
use ragcmp_core::events::DocumentUploadedEvent;

use crate::chunker::{DEFAULT_CHUNK_SIZE, split_text};
use crate::error::{CollaboratorError, PipelineError};
use crate::extraction::parse_graph_data;
use crate::ports::{
    CompletionService, DocumentRepository, EmbeddingService, EventPublisher, FileParser,
    GraphIndex, PromptRepository, VectorIndex,
};

/// Filename given to a document whose path is empty.
const UNNAMED: &str = "unnamed";

/// Collaborators the pipeline calls, injected at construction.
#[derive(Clone)]
pub struct DocumentProcessorDeps {
    pub document_repo: Arc<dyn DocumentRepository>,
    pub prompt_repo: Arc<dyn PromptRepository>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub graph_index: Arc<dyn GraphIndex>,
    pub events: Arc<dyn EventPublisher>,
    pub completion: Arc<dyn CompletionService>,
    pub embeddings: Arc<dyn EmbeddingService>,
    pub file_parser: Arc<dyn FileParser>,
}

/// Tunables for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorSettings {
    pub chunk_size: NonZeroUsize,
    /// Value bound to `{{language}}` in the extraction prompt.
    pub target_language: String,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            target_language: "ja".to_string(),
        }
    }
}

impl TryFrom<&PipelineConfig> for ProcessorSettings {
    type Error = ConfigError;

    fn try_from(config: &PipelineConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_window()?,
            target_language: config.target_language.clone(),
        })
    }
}

pub struct DocumentProcessor {
    deps: DocumentProcessorDeps,
    settings: ProcessorSettings,
}

impl DocumentProcessor {
    /// A processor with [`ProcessorSettings::default`].
    #[must_use]
    pub fn new(deps: DocumentProcessorDeps) -> Self {
        Self::with_settings(deps, ProcessorSettings::default())
    }

    #[must_use]
    pub const fn with_settings(deps: DocumentProcessorDeps, settings: ProcessorSettings) -> Self {
        Self { deps, settings }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the pipeline section is invalid.
    pub fn from_config(
        deps: DocumentProcessorDeps,
        config: &PipelineConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_settings(deps, ProcessorSettings::try_from(config)?))
    }

    #[must_use]
    pub const fn settings(&self) -> &ProcessorSettings {
        &self.settings
    }

    /// Index the file at `file_path` and return the resulting document.
    ///
    /// Never fails. The returned document is either `Indexed` or `Failed`
    /// with [`Document::error`] holding the reason.
    ///
    /// # Panics
    ///
    /// Panics if the operating system's random source is unavailable when
    /// generating the document id.
    pub async fn execute(&self, file_path: &str) -> Document {
        let mut document = Document::new(document_filename(file_path))
            .expect("document_filename never returns an empty name");

        match self.run(&mut document, file_path).await {
            Ok(()) => tracing::info!(
                document_id = %document.id(),
                filename = %document.filename(),
                "document indexed"
            ),
            Err(error) => self.fail(&mut document, &error).await,
        }

        document
    }

    async fn run(&self, document: &mut Document, file_path: &str) -> Result<(), PipelineError> {
        tracing::debug!(document_id = %document.id(), phase = "extract", file_path);
        let raw_text = self.deps.file_parser.parse(file_path).await?;
        document.set_content(raw_text);
        self.checkpoint(document).await?;

        document.start_processing()?;
        self.checkpoint(document).await?;

        tracing::debug!(document_id = %document.id(), phase = "prompt");
        let template = self
            .deps
            .prompt_repo
            .load(PromptKind::EntityExtraction)
            .await?;
        let prompt = template.render([
            ("text", document.content()),
            ("language", self.settings.target_language.as_str()),
        ])?;

        tracing::debug!(document_id = %document.id(), phase = "complete");
        let completion = self.deps.completion.generate(&prompt).await?;

        document.mark_parsed(completion.as_str())?;
        self.checkpoint(document).await?;

        let chunks = split_text(document.content(), self.settings.chunk_size);
        tracing::debug!(document_id = %document.id(), phase = "embed", chunks = chunks.len());
        let embeddings = self.deps.embeddings.create_embeddings(&chunks).await?;
        if embeddings.len() != chunks.len() {
            return Err(CollaboratorError::Embedding(format!(
                "embedding service returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            ))
            .into());
        }
        self.deps
            .vector_index
            .store_embeddings(document.id(), &chunks, &embeddings)
            .await?;

        let graph = parse_graph_data(&completion);
        tracing::debug!(
            document_id = %document.id(),
            phase = "graph",
            entities = graph.entity_count(),
            relationships = graph.relationship_count()
        );
        self.deps
            .graph_index
            .store_graph(document.id(), &graph)
            .await?;

        document.mark_indexed()?;
        self.checkpoint(document).await?;

        tracing::debug!(document_id = %document.id(), phase = "publish");
        let event = DocumentUploadedEvent::new(document.id(), document.filename());
        self.deps.events.publish(&event.into()).await?;

        Ok(())
    }

    async fn checkpoint(&self, document: &Document) -> Result<(), PipelineError> {
        tracing::debug!(document_id = %document.id(), status = %document.status(), "checkpoint");
        self.deps.document_repo.save(document).await?;
        Ok(())
    }

    async fn fail(&self, document: &mut Document, error: &PipelineError) {
        tracing::error!(
            document_id = %document.id(),
            status = %document.status(),
            %error,
            "document processing failed"
        );

        if let Err(transition) = document.mark_failed(error.to_string()) {
            tracing::error!(document_id = %document.id(), error = %transition, "could not mark document failed");
            return;
        }
        if let Err(save) = self.deps.document_repo.save(document).await {
            tracing::error!(document_id = %document.id(), error = %save, "could not persist failed document");
        }
    }
}

/// Final path segment, or the whole path when there is none.
fn document_filename(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            if file_path.is_empty() {
                UNNAMED.to_string()
            } else {
                file_path.to_string()
            }
        })
}
