//! Transcript input types.
//!
//! A transcript is an ordered list of time-coded snippets, fetched by an
//! external transcript provider and handed to Svar as JSON.

use crate::error::{Result, SvarError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single time-coded snippet of transcript text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSnippet {
    /// Spoken text of this snippet.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TranscriptSnippet {
    /// Create a new snippet.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds, derived from start and duration.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Load transcript snippets from a JSON file.
///
/// The file holds a JSON array of `{text, start, duration}` objects in
/// temporal order, the format transcript providers emit.
pub fn load_snippets(path: &Path) -> Result<Vec<TranscriptSnippet>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SvarError::Transcript(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let snippets: Vec<TranscriptSnippet> = serde_json::from_str(&content)?;
    Ok(snippets)
}
