//! # ragcmp-prompts
//!
//! File-backed prompt templates for ragcmp.
//!
//! Each [`PromptKind`](ragcmp_core::enums::PromptKind) maps to one YAML file
//! named after the kind (`entity_extraction.yaml`, `search_query.yaml`,
//! `summarization.yaml`) inside the configured prompts directory:
//!
//! ```yaml
//! name: entity_extraction
//! version: "1.0"
//! variables: [text, language]
//! template: |
//!   Extract entities from {{text}} and answer in {{language}}.
//! ```
//!
//! `name`, `template`, and `version` are required; `variables` defaults to an
//! empty list. Parsing goes through figment's YAML provider.

mod error;
mod loader;

pub use error::PromptError;
pub use loader::PromptLoader;
