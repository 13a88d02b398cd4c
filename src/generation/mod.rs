//! Generation gateway abstraction.
//!
//! Provides a trait-based interface over the LLM completion service. The
//! rest of the crate only ever sees the tagged [`Completion`] result, so
//! deciding between "plain answer" and "wants to call a tool" never means
//! inspecting optional provider fields.

mod openai;

pub use openai::OpenAiGeneration;

use crate::config::{Prompts, Settings};
use crate::error::{Result, SvarError};
use crate::message::{ConversationMessage, ToolCallRequest, ToolSchema};
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of one completion request.
#[derive(Debug, Clone)]
pub enum Completion {
    /// The model produced a final text answer.
    Text(String),
    /// The model asked for a tool invocation before answering.
    ToolCall(ToolCallRequest),
}

/// Trait for generation service implementations.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Run one chat completion over the message history.
    ///
    /// An empty `tools` slice offers the model no tools.
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSchema],
    ) -> Result<Completion>;

    /// Produce a bounded summary of a single transcript chunk.
    async fn summarize_chunk(&self, chunk_text: &str) -> Result<String>;

    /// Combine ordered per-chunk summaries into one video-level summary.
    async fn reduce_summaries(
        &self,
        summaries: &[String],
        video_title: &str,
        max_words: u32,
    ) -> Result<String>;
}

/// Create a generation gateway based on the configured provider.
pub fn create_generation(
    settings: &Settings,
    prompts: &Prompts,
) -> Result<Arc<dyn GenerationGateway>> {
    match settings.generation.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiGeneration::new(
            &settings.generation,
            settings.summary.map_max_words,
            prompts.clone(),
        ))),
        other => Err(SvarError::Config(format!(
            "Unknown generation provider: {}",
            other
        ))),
    }
}
