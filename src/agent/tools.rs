//! Retrieval tool schema and argument handling for the agent.

use crate::message::ToolSchema;
use serde_json::Value;

/// Arguments for one retrieval call, after fallbacks are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    /// Query to search with.
    pub query: String,
    /// Number of hits to request.
    pub top_k: usize,
}

/// Schema for the chunk-retrieval tool offered to the model.
pub fn retrieval_tool() -> ToolSchema {
    ToolSchema {
        name: "get_relevant_chunks".to_string(),
        description: "Perform semantic search over the current video's indexed transcript \
                      and return the top ranked text chunks for a query."
            .to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "user_query": {
                    "type": "string",
                    "description": "The search query, rewritten with full conversation context"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Maximum number of chunks to return (default: 3)",
                    "default": 3
                }
            },
            "required": ["user_query"]
        }),
    }
}

/// Extract retrieval arguments from a tool-call payload.
///
/// Returns `None` when the payload carries no usable arguments (not an
/// object, or an empty object) so the caller can stop the loop instead of
/// retrying a malformed call. Individual missing fields fall back to the
/// original query and the configured hit count.
pub fn extract_search_args(
    arguments: &Value,
    fallback_query: &str,
    default_top_k: usize,
) -> Option<SearchArgs> {
    let object = arguments.as_object()?;
    if object.is_empty() {
        return None;
    }

    let query = object
        .get("user_query")
        .and_then(|v| v.as_str())
        .unwrap_or(fallback_query)
        .to_string();

    let top_k = object
        .get("top_k")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(default_top_k);

    Some(SearchArgs { query, top_k })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_retrieval_tool_schema() {
        let tool = retrieval_tool();
        assert_eq!(tool.name, "get_relevant_chunks");
        assert_eq!(tool.parameters["required"][0], "user_query");
        assert_eq!(tool.parameters["properties"]["top_k"]["default"], 3);
    }

    #[test]
    fn test_extract_full_arguments() {
        let args = json!({"user_query": "sorting", "top_k": 5});
        assert_eq!(
            extract_search_args(&args, "fallback", 3),
            Some(SearchArgs {
                query: "sorting".to_string(),
                top_k: 5,
            })
        );
    }

    #[test]
    fn test_extract_applies_fallbacks() {
        let args = json!({"top_k": 7});
        assert_eq!(
            extract_search_args(&args, "original question", 3),
            Some(SearchArgs {
                query: "original question".to_string(),
                top_k: 7,
            })
        );

        let args = json!({"user_query": "q"});
        assert_eq!(
            extract_search_args(&args, "original question", 3),
            Some(SearchArgs {
                query: "q".to_string(),
                top_k: 3,
            })
        );
    }

    #[test]
    fn test_extract_rejects_unusable_payloads() {
        assert_eq!(extract_search_args(&Value::Null, "q", 3), None);
        assert_eq!(extract_search_args(&json!({}), "q", 3), None);
        assert_eq!(extract_search_args(&json!("a string"), "q", 3), None);
        assert_eq!(extract_search_args(&json!(42), "q", 3), None);
    }
}
