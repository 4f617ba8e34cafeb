//! Turning an entity-extraction completion into [`GraphData`].
//!
//! The model is asked for a JSON object with `entities` and `relationships`
//! arrays, but completions often wrap it in prose or a code fence. Parsing
//! first tries the whole response, then the outermost `{...}` span. A
//! response that still does not parse yields an empty graph.

use ragcmp_core::entities::GraphData;

/// Parse a completion into graph data, falling back to an empty graph.
#[must_use]
pub fn parse_graph_data(response: &str) -> GraphData {
    let trimmed = response.trim();

    if let Ok(graph) = serde_json::from_str::<GraphData>(trimmed) {
        return graph;
    }

    if let Some(graph) =
        outermost_object(trimmed).and_then(|span| serde_json::from_str::<GraphData>(span).ok())
    {
        return graph;
    }

    tracing::warn!(
        response_len = response.len(),
        "extraction response is not graph JSON, storing an empty graph"
    );
    GraphData::default()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
