//! In-memory retrieval implementation.
//!
//! Ranks records by query-term overlap. Useful for testing and for running
//! the CLI without a remote vector service.

use super::{ChunkRecord, RetrievalGateway, SearchHit};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory retrieval gateway.
pub struct MemoryRetrieval {
    records: RwLock<HashMap<String, ChunkRecord>>,
}

impl MemoryRetrieval {
    /// Create a new empty in-memory index.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryRetrieval {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalGateway for MemoryRetrieval {
    async fn index(&self, records: &[ChunkRecord]) -> Result<()> {
        let mut store = self.records.write().unwrap();
        for record in records {
            store.insert(record.id.clone(), record.clone());
        }
        Ok(())
    }

    async fn search(&self, query: &str, top_k: usize, video_id: &str) -> Result<Vec<SearchHit>> {
        let store = self.records.read().unwrap();

        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.to_string())
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = store
            .values()
            .filter(|record| record.source == video_id)
            .filter_map(|record| {
                let haystack = record.text.to_lowercase();
                let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
                if matched == 0 {
                    return None;
                }
                Some(SearchHit {
                    text: Some(record.text.clone()),
                    score: matched as f32 / terms.len() as f32,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);

        Ok(hits)
    }

    async fn delete(&self, video_id: &str) -> Result<usize> {
        let mut store = self.records.write().unwrap();
        let before = store.len();
        store.retain(|_, record| record.source != video_id);
        Ok(before - store.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, text: &str, source: &str) -> ChunkRecord {
        ChunkRecord {
            id: id.to_string(),
            text: text.to_string(),
            source: source.to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_scoped_to_video() {
        let store = MemoryRetrieval::new();
        store
            .index(&[
                record("a_chunk_0", "rust ownership rules", "a"),
                record("b_chunk_0", "rust borrowing rules", "b"),
            ])
            .await
            .unwrap();

        let hits = store.search("rust rules", 5, "a").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.as_deref().unwrap().contains("ownership"));
    }

    #[tokio::test]
    async fn test_search_ranks_by_overlap() {
        let store = MemoryRetrieval::new();
        store
            .index(&[
                record("v_chunk_0", "sorting algorithms overview", "v"),
                record("v_chunk_1", "sorting with quicksort partitions", "v"),
                record("v_chunk_2", "unrelated cooking segment", "v"),
            ])
            .await
            .unwrap();

        let hits = store.search("quicksort sorting", 2, "v").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].text.as_deref().unwrap().contains("quicksort"));
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty() {
        let store = MemoryRetrieval::new();
        store
            .index(&[record("v_chunk_0", "graph traversal", "v")])
            .await
            .unwrap();

        let hits = store.search("quantum chemistry", 3, "v").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_video() {
        let store = MemoryRetrieval::new();
        store
            .index(&[
                record("a_chunk_0", "one", "a"),
                record("a_chunk_1", "two", "a"),
                record("b_chunk_0", "three", "b"),
            ])
            .await
            .unwrap();

        let removed = store.delete("a").await.unwrap();
        assert_eq!(removed, 2);
        let hits = store.search("three", 3, "b").await.unwrap();
        assert_eq!(hits.len(), 1);
    }
}
