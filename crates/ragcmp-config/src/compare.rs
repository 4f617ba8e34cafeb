//! RAG comparison configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default number of vector hits requested per comparison.
const fn default_top_k() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompareConfig {
    /// Number of nearest neighbours requested from the vector index.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl CompareConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `top_k` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "compare.top_k".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}
