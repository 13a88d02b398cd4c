//! Configuration settings for Svar.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
    pub summary: SummarySettings,
    pub generation: GenerationSettings,
    pub retrieval: RetrievalSettings,
    pub agent: AgentSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Target chunk duration in seconds.
    pub chunk_duration_seconds: f64,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_duration_seconds: 600.0,
        }
    }
}

/// Map-reduce summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Number of per-chunk summary requests issued concurrently.
    pub batch_size: usize,
    /// Pause between batches in seconds. Rate-limit policy, not tuning.
    pub batch_pause_seconds: f64,
    /// Word cap for each per-chunk summary.
    pub map_max_words: u32,
    /// Word cap for the final combined summary.
    pub reduce_max_words: u32,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            batch_size: 6,
            batch_pause_seconds: 1.5,
            map_max_words: 360,
            reduce_max_words: 360,
        }
    }
}

/// Generation gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Generation provider (openai).
    pub provider: String,
    /// Chat model to use.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens per completion.
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_tokens: 2048,
            timeout_seconds: 300,
        }
    }
}

/// Retrieval gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Retrieval provider (memory).
    pub provider: String,
    /// Default number of hits when the model does not ask for a count.
    pub default_top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
            default_top_k: 3,
        }
    }
}

/// Chat agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Maximum generation round-trips per answer turn.
    pub max_tool_calls: usize,
    /// Number of prior messages carried into each turn.
    pub history_window: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_tool_calls: 3,
            history_window: 10,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SvarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("svar")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let settings = Settings::default();
        assert_eq!(settings.summary.batch_size, 6);
        assert_eq!(settings.summary.batch_pause_seconds, 1.5);
        assert_eq!(settings.summary.reduce_max_words, 360);
        assert_eq!(settings.agent.max_tool_calls, 3);
        assert_eq!(settings.retrieval.default_top_k, 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [summary]
            batch_size = 4
            "#,
        )
        .unwrap();
        assert_eq!(settings.summary.batch_size, 4);
        assert_eq!(settings.summary.batch_pause_seconds, 1.5);
        assert_eq!(settings.generation.model, "gpt-4o-mini");
    }
}
