//! # ragcmp-app
//!
//! Application layer for ragcmp.
//!
//! - [`DocumentProcessor`] drives a file through extraction, completion,
//!   embedding and indexing, persisting the [`Document`](ragcmp_core::entities::Document)
//!   after every phase and turning any failure into a terminal `Failed` state.
//! - [`RagComparator`] answers one query from the vector and graph indexes
//!   concurrently and records each branch's failure separately.
//! - [`EventDispatcher`] routes [`DomainEvent`](ragcmp_core::events::DomainEvent)s
//!   to handlers registered for their exact kind.
//!
//! Every external service is reached through the async traits in [`ports`].
//! Callers inject implementations as `Arc<dyn Trait>`.

pub mod chunker;
pub mod compare;
pub mod dispatcher;
pub mod error;
pub mod extraction;
pub mod memory;
pub mod ports;
pub mod processor;

pub use compare::RagComparator;
pub use dispatcher::{EventDispatcher, EventHandler};
pub use error::{CollaboratorError, CompareError, DispatchError, PipelineError};
pub use memory::InMemoryDocumentRepository;
pub use processor::{DocumentProcessor, DocumentProcessorDeps, ProcessorSettings};
