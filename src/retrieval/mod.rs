//! Retrieval gateway abstraction.
//!
//! Provides a trait-based interface over the vector-search service that
//! indexes and ranks transcript chunks, scoped to a single video.

mod memory;

pub use memory::MemoryRetrieval;

use crate::chunking::Chunk;
use crate::config::Settings;
use crate::error::{Result, SvarError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One chunk prepared for indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Record ID, unique within the index.
    pub id: String,
    /// Searchable text, prefixed with the chunk's time span.
    pub text: String,
    /// Video ID this record belongs to.
    pub source: String,
}

/// A ranked search hit.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Hit text; a backend may omit the field.
    pub text: Option<String>,
    /// Relevance score (higher is better).
    pub score: f32,
}

/// Build indexing records for a video's chunks.
pub fn prepare_chunk_records(chunks: &[Chunk], video_id: &str) -> Vec<ChunkRecord> {
    chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| ChunkRecord {
            id: format!("{}_chunk_{}", video_id, index),
            text: format!("From {} to {}: {}", chunk.start, chunk.end, chunk.text),
            source: video_id.to_string(),
        })
        .collect()
}

/// Trait for retrieval service implementations.
#[async_trait]
pub trait RetrievalGateway: Send + Sync {
    /// Index chunk records for later search.
    async fn index(&self, records: &[ChunkRecord]) -> Result<()>;

    /// Rank indexed records against a query, scoped to one video.
    ///
    /// Implementations normalize a missing result object to an empty
    /// vector; they never signal "nothing found" as an error.
    async fn search(&self, query: &str, top_k: usize, video_id: &str) -> Result<Vec<SearchHit>>;

    /// Delete all records for a video. Returns the number removed.
    async fn delete(&self, video_id: &str) -> Result<usize>;
}

/// Create a retrieval gateway based on the configured provider.
pub fn create_retrieval(settings: &Settings) -> Result<Arc<dyn RetrievalGateway>> {
    match settings.retrieval.provider.as_str() {
        "memory" => Ok(Arc::new(MemoryRetrieval::new())),
        other => Err(SvarError::Config(format!(
            "Unknown retrieval provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_chunk_records() {
        let chunks = vec![
            Chunk {
                text: "intro".to_string(),
                start: 0.0,
                end: 25.0,
            },
            Chunk {
                text: "details".to_string(),
                start: 25.0,
                end: 45.0,
            },
        ];

        let records = prepare_chunk_records(&chunks, "vid123");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "vid123_chunk_0");
        assert_eq!(records[1].id, "vid123_chunk_1");
        assert_eq!(records[0].text, "From 0 to 25: intro");
        assert_eq!(records[1].source, "vid123");
    }

    #[test]
    fn test_prepare_chunk_records_empty() {
        assert!(prepare_chunk_records(&[], "vid").is_empty());
    }
}
