//! Document-processing pipeline configuration.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default chunk window, in characters.
const fn default_chunk_size() -> usize {
    500
}

fn default_target_language() -> String {
    "ja".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Size of the fixed, non-overlapping chunk window used before embedding.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Language passed to the entity-extraction prompt as `{{language}}`.
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

impl PipelineConfig {
    /// The chunk window as a non-zero size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `chunk_size` is zero.
    pub fn chunk_window(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.chunk_size).ok_or_else(|| ConfigError::InvalidValue {
            field: "pipeline.chunk_size".to_string(),
            reason: "must be greater than zero".to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero chunk size or an empty
    /// target language.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk_window()?;
        if self.target_language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.target_language".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            target_language: default_target_language(),
        }
    }
}
