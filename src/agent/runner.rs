//! Agent answer loop.

use super::tools::{extract_search_args, retrieval_tool};
use crate::config::Prompts;
use crate::generation::{Completion, GenerationGateway};
use crate::message::{format_history, ConversationMessage};
use crate::retrieval::RetrievalGateway;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Returned when no usable answer came back within the call budget.
pub const FALLBACK_ANSWER: &str = "Unable to generate a response.";

/// Tool result when retrieval yields nothing usable.
pub const NO_CHUNKS_FOUND: &str = "No relevant chunks found.";

/// Tool-calling agent scoped to one video.
///
/// Each [`Agent::answer`] call runs a bounded loop: ask the model, and if
/// it requests the retrieval tool, fetch chunks and ask again. The budget
/// holds even against a model that never stops requesting tools.
pub struct Agent {
    generation: Arc<dyn GenerationGateway>,
    retrieval: Arc<dyn RetrievalGateway>,
    video_id: String,
    prompts: Prompts,
    max_tool_calls: usize,
    default_top_k: usize,
}

impl Agent {
    /// Create an agent for a video with default prompts and budget.
    pub fn new(
        generation: Arc<dyn GenerationGateway>,
        retrieval: Arc<dyn RetrievalGateway>,
        video_id: &str,
    ) -> Self {
        Self {
            generation,
            retrieval,
            video_id: video_id.to_string(),
            prompts: Prompts::default(),
            max_tool_calls: 3,
            default_top_k: 3,
        }
    }

    /// Set custom prompt templates.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the maximum generation round-trips per turn.
    pub fn with_max_tool_calls(mut self, max: usize) -> Self {
        self.max_tool_calls = max;
        self
    }

    /// Set the hit count used when the model does not request one.
    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Answer one user turn.
    ///
    /// Never fails: external errors and protocol anomalies resolve to the
    /// fixed fallback string rather than surfacing to the caller.
    #[instrument(skip(self, history, video_summary), fields(video_id = %self.video_id))]
    pub async fn answer(
        &self,
        user_query: &str,
        history: &[ConversationMessage],
        video_summary: &str,
    ) -> String {
        let mut vars = HashMap::new();
        vars.insert("video_summary".to_string(), video_summary.to_string());
        let system = self
            .prompts
            .render_with_custom(&self.prompts.agent.system, &vars);

        let mut vars = HashMap::new();
        vars.insert("user_query".to_string(), user_query.to_string());
        vars.insert("history".to_string(), format_history(history));
        let user = self
            .prompts
            .render_with_custom(&self.prompts.agent.user, &vars);

        // Fresh message sequence per turn; nothing is shared across calls.
        let mut messages = vec![
            ConversationMessage::System { content: system },
            ConversationMessage::User { content: user },
        ];
        let tools = [retrieval_tool()];

        let mut calls = 0;
        while calls < self.max_tool_calls {
            calls += 1;
            debug!("Generation call {}/{}", calls, self.max_tool_calls);

            let completion = match self.generation.complete(&messages, &tools).await {
                Ok(completion) => completion,
                Err(e) => {
                    warn!("Generation call failed: {}", e);
                    break;
                }
            };

            match completion {
                Completion::Text(content) => return content,
                Completion::ToolCall(request) => {
                    let Some(args) =
                        extract_search_args(&request.arguments, user_query, self.default_top_k)
                    else {
                        warn!("Tool call carried no usable arguments, stopping");
                        break;
                    };

                    messages.push(ConversationMessage::AssistantToolCall {
                        name: request.name.clone(),
                        arguments: request.arguments,
                    });

                    let result = self.relevant_chunks(&args.query, args.top_k).await;
                    messages.push(ConversationMessage::ToolResult {
                        name: request.name,
                        content: result,
                    });
                }
            }
        }

        FALLBACK_ANSWER.to_string()
    }

    /// Fetch relevant chunks for the model, as a tool-result string.
    ///
    /// Retrieval failures and empty results both collapse to the sentinel;
    /// a bad search never fails the turn.
    async fn relevant_chunks(&self, query: &str, top_k: usize) -> String {
        debug!("Searching chunks: query={:?} top_k={}", query, top_k);

        let hits = match self.retrieval.search(query, top_k, &self.video_id).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Retrieval failed: {}", e);
                return NO_CHUNKS_FOUND.to_string();
            }
        };

        if hits.is_empty() {
            return NO_CHUNKS_FOUND.to_string();
        }

        let texts: Vec<String> = hits
            .into_iter()
            .map(|hit| hit.text.unwrap_or_default())
            .collect();
        serde_json::to_string(&texts).unwrap_or_else(|_| NO_CHUNKS_FOUND.to_string())
    }
}
