use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// An immutable prompt template with `{{variable}}` placeholders.
///
/// `variables` lists the names a caller must supply to [`render`](Self::render).
/// Placeholders for undeclared names are still substituted when a value is
/// given, and left verbatim otherwise.
///
/// Deserialization goes through [`new`](Self::new), so an empty name or
/// template is rejected there too.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    template: String,
    version: String,
    #[serde(default)]
    variables: Vec<String>,
}

impl PromptTemplate {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `name` or `template` is empty.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        version: impl Into<String>,
        variables: Vec<String>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        let template = template.into();
        if name.is_empty() {
            return Err(CoreError::Validation("Prompt name cannot be empty".to_string()));
        }
        if template.is_empty() {
            return Err(CoreError::Validation(
                "Prompt template cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            template,
            version: version.into(),
            variables,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Substitute every `{{key}}` placeholder with the `Display` form of its value.
    ///
    /// Values are applied in the order given. Values for names that are not
    /// declared in `variables` are still substituted and never cause an error.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] listing every declared variable that
    /// has no value.
    pub fn render<I, K, V>(&self, values: I) -> Result<String, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let values: Vec<(K, V)> = values.into_iter().collect();

        let missing: Vec<&str> = self
            .variables
            .iter()
            .map(String::as_str)
            .filter(|var| !values.iter().any(|(key, _)| key.as_ref() == *var))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required variables: [{}]",
                missing.join(", ")
            )));
        }

        let mut rendered = self.template.clone();
        for (key, value) in &values {
            let placeholder = format!("{{{{{}}}}}", key.as_ref());
            rendered = rendered.replace(&placeholder, &value.to_string());
        }
        Ok(rendered)
    }
}

#[derive(Deserialize)]
struct PromptTemplateRecord {
    name: String,
    template: String,
    version: String,
    #[serde(default)]
    variables: Vec<String>,
}

impl<'de> Deserialize<'de> for PromptTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = PromptTemplateRecord::deserialize(deserializer)?;
        Self::new(record.name, record.template, record.version, record.variables)
            .map_err(serde::de::Error::custom)
    }
}
