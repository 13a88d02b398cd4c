//! OpenAI-backed generation gateway.

use super::{Completion, GenerationGateway};
use crate::config::{GenerationSettings, Prompts};
use crate::error::{Result, SvarError};
use crate::message::{ConversationMessage, ToolCallRequest, ToolSchema};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
    FunctionObject,
};
use async_openai::Client;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// OpenAI chat-completion adapter.
pub struct OpenAiGeneration {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    map_max_words: u32,
    prompts: Prompts,
}

impl OpenAiGeneration {
    /// Create an adapter from generation settings.
    ///
    /// The HTTP client carries the configured per-request timeout.
    pub fn new(settings: &GenerationSettings, map_max_words: u32, prompts: Prompts) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        let client = Client::with_config(OpenAIConfig::default()).with_http_client(http_client);

        Self {
            client,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            map_max_words,
            prompts,
        }
    }

    /// Run a plain system+user completion and return its text content.
    async fn complete_text(&self, system: String, user: String) -> Result<Option<String>> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| SvarError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| SvarError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| SvarError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SvarError::OpenAI(format!("Completion failed: {}", e)))?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

#[async_trait]
impl GenerationGateway for OpenAiGeneration {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSchema],
    ) -> Result<Completion> {
        let request_messages = convert_messages(messages)?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(request_messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens);
        if !tools.is_empty() {
            builder.tools(convert_tools(tools));
        }
        let request = builder
            .build()
            .map_err(|e| SvarError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SvarError::OpenAI(format!("Completion failed: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SvarError::Generation("No response from model".to_string()))?;

        if let Some(call) = choice
            .message
            .tool_calls
            .as_ref()
            .and_then(|calls| calls.first())
        {
            debug!("Model requested tool: {}", call.function.name);
            // Unparseable argument JSON becomes Null so the caller's
            // malformed-arguments guard handles it instead of failing
            // the whole turn.
            let arguments: Value =
                serde_json::from_str(&call.function.arguments).unwrap_or(Value::Null);
            return Ok(Completion::ToolCall(ToolCallRequest {
                name: call.function.name.clone(),
                arguments,
            }));
        }

        Ok(Completion::Text(
            choice.message.content.unwrap_or_default(),
        ))
    }

    async fn summarize_chunk(&self, chunk_text: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("max_words".to_string(), self.map_max_words.to_string());
        let system = self
            .prompts
            .render_with_custom(&self.prompts.summary.map, &vars);

        // An empty summary is a valid outcome for a low-content chunk.
        let content = self.complete_text(system, chunk_text.to_string()).await?;
        Ok(content.unwrap_or_default())
    }

    async fn reduce_summaries(
        &self,
        summaries: &[String],
        video_title: &str,
        max_words: u32,
    ) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("video_title".to_string(), video_title.to_string());
        vars.insert("max_words".to_string(), max_words.to_string());
        let system = self
            .prompts
            .render_with_custom(&self.prompts.summary.reduce, &vars);

        let content = self.complete_text(system, summaries.join("\n")).await?;
        content.ok_or_else(|| SvarError::Generation("Empty reduce response".to_string()))
    }
}

/// Convert gateway messages to the OpenAI request format.
///
/// The wire protocol needs tool-call ids that our role union does not
/// carry; ids are synthesized from message position, and each tool result
/// reuses the id of the assistant call before it.
fn convert_messages(
    messages: &[ConversationMessage],
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut converted = Vec::with_capacity(messages.len());
    let mut last_call_id = String::new();

    for (index, message) in messages.iter().enumerate() {
        let request_message: ChatCompletionRequestMessage = match message {
            ConversationMessage::System { content } => {
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(content.clone())
                    .build()
                    .map_err(|e| SvarError::Generation(e.to_string()))?
                    .into()
            }
            ConversationMessage::User { content } => {
                ChatCompletionRequestUserMessageArgs::default()
                    .content(content.clone())
                    .build()
                    .map_err(|e| SvarError::Generation(e.to_string()))?
                    .into()
            }
            ConversationMessage::Assistant { content } => {
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content.clone())
                    .build()
                    .map_err(|e| SvarError::Generation(e.to_string()))?
                    .into()
            }
            ConversationMessage::AssistantToolCall { name, arguments } => {
                last_call_id = format!("call_{}", index);
                let call = ChatCompletionMessageToolCall {
                    id: last_call_id.clone(),
                    r#type: ChatCompletionToolType::Function,
                    function: FunctionCall {
                        name: name.clone(),
                        arguments: arguments.to_string(),
                    },
                };
                ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(vec![call])
                    .build()
                    .map_err(|e| SvarError::Generation(e.to_string()))?
                    .into()
            }
            ConversationMessage::ToolResult { content, .. } => {
                ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(last_call_id.clone())
                    .content(content.clone())
                    .build()
                    .map_err(|e| SvarError::Generation(e.to_string()))?
                    .into()
            }
        };
        converted.push(request_message);
    }

    Ok(converted)
}

/// Convert tool schemas to the OpenAI tool format.
fn convert_tools(tools: &[ToolSchema]) -> Vec<ChatCompletionTool> {
    tools
        .iter()
        .map(|tool| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                parameters: Some(tool.parameters.clone()),
                strict: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_messages_pairs_tool_ids() {
        let messages = vec![
            ConversationMessage::System {
                content: "sys".to_string(),
            },
            ConversationMessage::User {
                content: "hi".to_string(),
            },
            ConversationMessage::AssistantToolCall {
                name: "get_relevant_chunks".to_string(),
                arguments: json!({"user_query": "q"}),
            },
            ConversationMessage::ToolResult {
                name: "get_relevant_chunks".to_string(),
                content: "hits".to_string(),
            },
        ];

        let converted = convert_messages(&messages).unwrap();
        assert_eq!(converted.len(), 4);

        let value = serde_json::to_value(&converted).unwrap();
        let call_id = value[2]["tool_calls"][0]["id"].as_str().unwrap();
        assert_eq!(value[3]["tool_call_id"].as_str().unwrap(), call_id);
    }

    #[test]
    fn test_convert_tools_shape() {
        let tools = vec![ToolSchema {
            name: "get_relevant_chunks".to_string(),
            description: "search".to_string(),
            parameters: json!({"type": "object"}),
        }];

        let converted = convert_tools(&tools);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].function.name, "get_relevant_chunks");
    }
}
