//! Prompt definition file location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_dir() -> PathBuf {
    PathBuf::from("prompts")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptsConfig {
    /// Directory holding one `<kind>.yaml` file per prompt kind.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl PromptsConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `dir` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "prompts.dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
