//! Configuration module for Svar.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts, SummaryPrompts};
pub use settings::{
    AgentSettings, ChunkingSettings, GeneralSettings, GenerationSettings, PromptSettings,
    RetrievalSettings, Settings, SummarySettings,
};
