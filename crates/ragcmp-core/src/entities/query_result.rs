use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::RagType;
use crate::errors::CoreError;

/// One answer produced by a retrieval approach for a query.
///
/// Construction rejects scores outside `[0.0, 1.0]` (including NaN).
/// Deserialization runs the same check.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct QueryResult {
    query: String,
    answer: String,
    sources: Vec<String>,
    score: f64,
    rag_type: RagType,
}

impl QueryResult {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `score` is not within `[0.0, 1.0]`.
    pub fn new(
        query: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<String>,
        score: f64,
        rag_type: RagType,
    ) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&score) {
            return Err(CoreError::Validation(format!(
                "score must be between 0.0 and 1.0, got {score}"
            )));
        }

        Ok(Self {
            query: query.into(),
            answer: answer.into(),
            sources,
            score,
            rag_type,
        })
    }

    /// Build from an untyped retrieval tag such as `"vector"` or `"graph"`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an unknown tag or an out-of-range score.
    pub fn from_tagged(
        query: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<String>,
        score: f64,
        rag_type: &str,
    ) -> Result<Self, CoreError> {
        Self::new(query, answer, sources, score, rag_type.parse()?)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Source identifiers, in the order the retriever ranked them.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub const fn rag_type(&self) -> RagType {
        self.rag_type
    }
}

#[derive(Deserialize)]
struct QueryResultRecord {
    query: String,
    answer: String,
    #[serde(default)]
    sources: Vec<String>,
    score: f64,
    rag_type: RagType,
}

impl<'de> Deserialize<'de> for QueryResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = QueryResultRecord::deserialize(deserializer)?;
        Self::new(
            record.query,
            record.answer,
            record.sources,
            record.score,
            record.rag_type,
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn create_valid_result() {
        let qr = QueryResult::new(
            "What is Rust?",
            "A systems language.",
            vec!["doc-1".into(), "doc-2".into()],
            0.85,
            RagType::Vector,
        )
        .unwrap();
        assert_eq!(qr.query(), "What is Rust?");
        assert_eq!(qr.answer(), "A systems language.");
        assert_eq!(qr.sources(), ["doc-1".to_string(), "doc-2".to_string()]);
        assert!((qr.score() - 0.85).abs() < f64::EPSILON);
        assert_eq!(qr.rag_type(), RagType::Vector);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(0.5)]
    fn boundary_scores_are_accepted(#[case] score: f64) {
        assert!(QueryResult::new("q", "a", vec![], score, RagType::Graph).is_ok());
    }

    #[rstest]
    #[case(-0.01)]
    #[case(1.01)]
    #[case(f64::NAN)]
    fn out_of_range_scores_are_rejected(#[case] score: f64) {
        let err = QueryResult::new("q", "a", vec![], score, RagType::Graph).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = QueryResult::from_tagged("q", "a", vec![], 0.5, "keyword").unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }

    #[test]
    fn known_tag_is_accepted() {
        let qr = QueryResult::from_tagged("q", "a", vec![], 0.5, "graph").unwrap();
        assert_eq!(qr.rag_type(), RagType::Graph);
    }

    #[test]
    fn deserialize_validates_score() {
        let json = r#"{"query":"q","answer":"a","sources":[],"score":1.5,"rag_type":"vector"}"#;
        let err = serde_json::from_str::<QueryResult>(json).unwrap_err();
        assert!(err.to_string().contains("score"));
    }

    #[test]
    fn deserialize_rejects_unknown_tag() {
        let json = r#"{"query":"q","answer":"a","sources":[],"score":0.1,"rag_type":"hybrid"}"#;
        assert!(serde_json::from_str::<QueryResult>(json).is_err());
    }
}
