//! Map-reduce video summarization.
//!
//! Produces one video-level summary from an ordered chunk list in two
//! stages: independent per-chunk summaries (map), then a single combining
//! pass (reduce).

use crate::chunking::Chunk;
use crate::error::{Result, SvarError};
use crate::generation::GenerationGateway;
use futures::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Map-reduce summarizer over a generation gateway.
///
/// Chunks are summarized in fixed-size batches. Requests within a batch run
/// concurrently; batches run strictly in sequence with a rate-limit pause
/// between them.
pub struct Summarizer {
    generation: Arc<dyn GenerationGateway>,
    batch_size: usize,
    batch_pause: Duration,
    reduce_max_words: u32,
}

impl Summarizer {
    /// Create a summarizer with default batching policy.
    pub fn new(generation: Arc<dyn GenerationGateway>) -> Self {
        Self {
            generation,
            batch_size: 6,
            batch_pause: Duration::from_millis(1500),
            reduce_max_words: 360,
        }
    }

    /// Set how many per-chunk requests run concurrently.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the pause between batches.
    pub fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    /// Set the word cap handed to the reduce stage.
    pub fn with_reduce_max_words(mut self, max_words: u32) -> Self {
        self.reduce_max_words = max_words;
        self
    }

    /// Summarize a video's chunks into a single summary string.
    ///
    /// Per-chunk summaries are accumulated in chunk order: a batch's
    /// results are appended before the next batch is issued, and within a
    /// batch results come back position-matched regardless of completion
    /// timing. Any map or reduce failure aborts the whole run.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len(), video_title = %video_title))]
    pub async fn summarize(&self, chunks: &[Chunk], video_title: &str) -> Result<String> {
        if chunks.is_empty() {
            return Err(SvarError::InvalidInput(
                "no chunks to summarize".to_string(),
            ));
        }

        let batch_size = self.batch_size.max(1);
        let mut summaries: Vec<String> = Vec::with_capacity(chunks.len());

        for (batch_index, batch) in chunks.chunks(batch_size).enumerate() {
            if batch_index > 0 {
                sleep(self.batch_pause).await;
            }

            debug!(
                "Summarizing batch {} ({} chunks)",
                batch_index,
                batch.len()
            );

            let requests = batch
                .iter()
                .map(|chunk| self.generation.summarize_chunk(&chunk.text));
            let batch_summaries = future::try_join_all(requests).await?;
            summaries.extend(batch_summaries);
        }

        debug!("Reducing {} chunk summaries", summaries.len());
        self.generation
            .reduce_summaries(&summaries, video_title, self.reduce_max_words)
            .await
    }
}
