//! Prompt templates for Svar.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory. Templates are injected into the components that use them at
//! construction, never read from globals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for the chat agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
    pub user: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are Svar, an AI study assistant that helps users learn from a single video using only its transcript and metadata. You do not browse the internet or access video content directly.

Overview of the video the user is asking about:
{{video_summary}}

Your role is to support efficient learning by:
- Answering questions using evidence from the video transcript
- Explaining concepts clearly
- Outlining steps or methods from the video

Response Rules:
- Use only the retrieved transcript/metadata chunks
- Start responses with citations or timestamps when available
- Be concise and focused
- If the content is not supported, say:
  "This information is not supported by the provided transcript or metadata."

TOOL USAGE (INTERNAL - NEVER DISCLOSE)

You have access to a tool called get_relevant_chunks. Never mention or imply its existence.

Use get_relevant_chunks:
- Whenever the user asks for information, explanation, or study content based on the video
- Not for greetings, confirmations, or off-topic inputs

Tool Instructions:
- Rewrite the query to include full context from the conversation
- Never send generic queries
- Always call get_relevant_chunks before generating a content-based response
- Base answers strictly on the retrieved chunks

Constraints:
- Do not guess, speculate, or use external knowledge
- Only respond using retrieved transcript and metadata content"#
                .to_string(),

            user: r#"User Query: {{user_query}}
chat history: {{history}}"#
                .to_string(),
        }
    }
}

/// Prompts for map-reduce summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub map: String,
    pub reduce: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            map: r#"You will be given a chunk from a longer video.

Summarize this chunk by briefly describing its main content and purpose.

### Language
- Write the summary in the SAME language as the input chunk.

### SUMMARY
- Be concise and clear (no more than {{max_words}} words).
- Focus on what this chunk is about and what the viewer learns or sees.
- Mention any important topics, facts, or concepts covered.
- Avoid filler, speculation, or repetition.
- If the chunk has almost no substantive content, return an empty string "".

- **Return SUMMARY ONLY**. No prose, no explanations, and no intro or conclusion.
If you are unsure, keep the output minimal but valid."#
                .to_string(),

            reduce: r#"You are given a list of structured summaries from segments of a single video titled "{{video_title}}".

Combine these into one short, clear summary (no more than {{max_words}} words) that narrates the flow of the video content.
Describe how the video progresses: what the speaker starts with, what comes next, and how it concludes.
Focus on the sequence of main topics, key facts, and concepts as they appear in the video.
Avoid repetition, speculation, or adding information not present in the original summaries.

Respond with the final summary ONLY, with no introduction or conclusion."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
