use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Yaml};
use ragcmp_config::PromptsConfig;
use ragcmp_core::entities::PromptTemplate;
use ragcmp_core::enums::PromptKind;
use serde::Deserialize;

use crate::error::PromptError;

/// On-disk shape of a prompt definition.
#[derive(Debug, Deserialize)]
struct PromptDefinition {
    name: String,
    template: String,
    version: String,
    #[serde(default)]
    variables: Vec<String>,
}

/// Loads [`PromptTemplate`]s from `<dir>/<kind>.yaml`.
///
/// Files are read on every call; edits on disk take effect on the next load.
#[derive(Debug, Clone)]
pub struct PromptLoader {
    dir: PathBuf,
}

impl PromptLoader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn from_config(config: &PromptsConfig) -> Self {
        Self::new(config.dir.clone())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the definition file for `kind`.
    #[must_use]
    pub fn path_for(&self, kind: PromptKind) -> PathBuf {
        self.dir.join(format!("{}.yaml", kind.as_str()))
    }

    /// Load and validate the template for `kind`.
    ///
    /// # Errors
    ///
    /// - [`PromptError::NotFound`] if the definition file does not exist.
    /// - [`PromptError::Invalid`] if the file is not a YAML record or misses
    ///   `name`, `template`, or `version`.
    /// - [`PromptError::Core`] if `name` or `template` is empty.
    pub fn load(&self, kind: PromptKind) -> Result<PromptTemplate, PromptError> {
        let path = self.path_for(kind);
        if !path.is_file() {
            return Err(PromptError::NotFound { kind, path });
        }

        let definition: PromptDefinition = Figment::from(Yaml::file(&path))
            .extract()
            .map_err(|source| PromptError::Invalid {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            %kind,
            name = %definition.name,
            version = %definition.version,
            "loaded prompt definition"
        );

        Ok(PromptTemplate::new(
            definition.name,
            definition.template,
            definition.version,
            definition.variables,
        )?)
    }
}
