//! Upstream chat responses: `{ "answer": ..., "contexts": [...] }`.

use serde::Deserialize;
use serde_json::Value;

/// Errors reading an upstream response.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Body returned by the upstream query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub answer: String,
    pub contexts: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawResponse {
    answer: String,
    #[serde(default)]
    contexts: Option<Vec<Value>>,
}

/// Parse a response body. Non-string context entries are kept as their JSON text.
pub fn parse_response(json: &str) -> Result<QueryResponse, ResponseError> {
    let raw: RawResponse = serde_json::from_str(json)?;
    let contexts = raw.contexts.map(|items| {
        items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    });
    Ok(QueryResponse {
        answer: raw.answer,
        contexts,
    })
}

/// Read answer input that is either a JSON response body or raw answer text.
pub fn read_answer(input: &str) -> QueryResponse {
    let looks_like_json = input.trim_start().starts_with('{');
    if looks_like_json {
        match parse_response(input) {
            Ok(resp) => return resp,
            Err(e) => log::debug!("input is not a response body ({}), using raw text", e),
        }
    }
    QueryResponse {
        answer: input.to_string(),
        contexts: None,
    }
}
