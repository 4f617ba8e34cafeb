//! Entity and value types for the ragcmp domain.
//!
//! [`Document`] is the only mutable aggregate. Everything else is an
//! immutable value: fields are either private behind accessors or the type is
//! handed out by value once built. All types derive `Serialize`,
//! `Deserialize`, and `JsonSchema` so the transport layer can render them.

mod comparison;
mod document;
mod graph;
mod prompt;
mod query_result;

pub use comparison::ComparisonResult;
pub use document::Document;
pub use graph::{Entity, GraphData, Relationship};
pub use prompt::PromptTemplate;
pub use query_result::QueryResult;
