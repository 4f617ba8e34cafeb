use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::QueryResult;

/// Side-by-side outcome of querying the vector and graph indexes.
///
/// A branch that failed has an empty result list and its error message set.
/// A branch that succeeded has no error and holds whatever its index
/// returned, possibly nothing.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct ComparisonResult {
    query: String,
    #[serde(default)]
    vector_results: Vec<QueryResult>,
    #[serde(default)]
    graph_results: Vec<QueryResult>,
    vector_error: Option<String>,
    graph_error: Option<String>,
}

impl ComparisonResult {
    /// Build from the outcome of each branch: its results, or its error message.
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        vector: Result<Vec<QueryResult>, String>,
        graph: Result<Vec<QueryResult>, String>,
    ) -> Self {
        let (vector_results, vector_error) = split_branch(vector);
        let (graph_results, graph_error) = split_branch(graph);
        Self {
            query: query.into(),
            vector_results,
            graph_results,
            vector_error,
            graph_error,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn vector_results(&self) -> &[QueryResult] {
        &self.vector_results
    }

    #[must_use]
    pub fn graph_results(&self) -> &[QueryResult] {
        &self.graph_results
    }

    #[must_use]
    pub fn vector_error(&self) -> Option<&str> {
        self.vector_error.as_deref()
    }

    #[must_use]
    pub fn graph_error(&self) -> Option<&str> {
        self.graph_error.as_deref()
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.vector_error.is_some() || self.graph_error.is_some()
    }

    /// Both branches completed without error.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.has_errors()
    }
}

#[derive(Deserialize)]
struct ComparisonResultRecord {
    query: String,
    #[serde(default)]
    vector_results: Vec<QueryResult>,
    #[serde(default)]
    graph_results: Vec<QueryResult>,
    vector_error: Option<String>,
    graph_error: Option<String>,
}

impl<'de> Deserialize<'de> for ComparisonResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ComparisonResultRecord::deserialize(deserializer)?;
        let vector = join_branch("vector", record.vector_results, record.vector_error)
            .map_err(serde::de::Error::custom)?;
        let graph = join_branch("graph", record.graph_results, record.graph_error)
            .map_err(serde::de::Error::custom)?;
        Ok(Self::new(record.query, vector, graph))
    }
}

fn join_branch(
    branch: &str,
    results: Vec<QueryResult>,
    error: Option<String>,
) -> Result<Result<Vec<QueryResult>, String>, String> {
    match error {
        None => Ok(Ok(results)),
        Some(message) if results.is_empty() => Ok(Err(message)),
        Some(_) => Err(format!("{branch} branch has both results and an error")),
    }
}

fn split_branch(outcome: Result<Vec<QueryResult>, String>) -> (Vec<QueryResult>, Option<String>) {
    match outcome {
        Ok(results) => (results, None),
        Err(message) => (Vec::new(), Some(message)),
    }
}
