//! Video processing pipeline.
//!
//! Coordinates the path from raw transcript to a chat-ready video:
//! chunk, summarize, then index for retrieval.

use crate::chunking::{Chunk, TemporalChunker};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SvarError};
use crate::generation::{create_generation, GenerationGateway};
use crate::retrieval::{create_retrieval, prepare_chunk_records, RetrievalGateway};
use crate::summary::Summarizer;
use crate::transcript::TranscriptSnippet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// The main orchestrator for the Svar pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    generation: Arc<dyn GenerationGateway>,
    retrieval: Arc<dyn RetrievalGateway>,
}

impl Orchestrator {
    /// Create an orchestrator with providers chosen from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let generation = create_generation(&settings, &prompts)?;
        let retrieval = create_retrieval(&settings)?;

        Ok(Self {
            settings,
            prompts,
            generation,
            retrieval,
        })
    }

    /// Create an orchestrator with custom gateways.
    pub fn with_gateways(
        settings: Settings,
        generation: Arc<dyn GenerationGateway>,
        retrieval: Arc<dyn RetrievalGateway>,
    ) -> Self {
        Self {
            settings,
            prompts: Prompts::default(),
            generation,
            retrieval,
        }
    }

    /// Get the loaded prompt templates.
    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// Get the generation gateway.
    pub fn generation(&self) -> Arc<dyn GenerationGateway> {
        self.generation.clone()
    }

    /// Get the retrieval gateway.
    pub fn retrieval(&self) -> Arc<dyn RetrievalGateway> {
        self.retrieval.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Chunk a transcript with the configured duration.
    pub fn chunk_transcript(&self, snippets: &[TranscriptSnippet]) -> Result<Vec<Chunk>> {
        let chunker = TemporalChunker::new(self.settings.chunking.chunk_duration_seconds)?;
        Ok(chunker.chunk(snippets))
    }

    /// Process a video transcript: chunk, summarize, and index.
    ///
    /// The first failure aborts the run so the caller can mark the video
    /// failed; nothing is retried.
    #[instrument(skip(self, snippets), fields(video_id = %video_id, snippets = snippets.len()))]
    pub async fn process_transcript(
        &self,
        video_id: &str,
        video_title: &str,
        snippets: &[TranscriptSnippet],
    ) -> Result<ProcessResult> {
        let chunks = self.chunk_transcript(snippets)?;
        if chunks.is_empty() {
            return Err(SvarError::Transcript(format!(
                "transcript for {} produced no chunks",
                video_id
            )));
        }
        info!("Chunked transcript into {} chunks", chunks.len());

        let summarizer = Summarizer::new(self.generation.clone())
            .with_batch_size(self.settings.summary.batch_size)
            .with_batch_pause(Duration::from_secs_f64(
                self.settings.summary.batch_pause_seconds,
            ))
            .with_reduce_max_words(self.settings.summary.reduce_max_words);
        let summary = summarizer.summarize(&chunks, video_title).await?;
        info!("Generated video summary ({} chars)", summary.len());

        // Re-indexing a video replaces its previous records.
        self.retrieval.delete(video_id).await?;
        let records = prepare_chunk_records(&chunks, video_id);
        self.retrieval.index(&records).await?;
        info!("Indexed {} chunk records", records.len());

        Ok(ProcessResult {
            video_id: video_id.to_string(),
            title: video_title.to_string(),
            chunks_indexed: records.len(),
            summary,
        })
    }
}

/// Result of processing a transcript.
#[derive(Debug)]
pub struct ProcessResult {
    /// Video ID.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Number of chunk records indexed.
    pub chunks_indexed: usize,
    /// Generated video summary.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Completion;
    use crate::message::{ConversationMessage, ToolSchema};
    use crate::retrieval::MemoryRetrieval;
    use async_trait::async_trait;

    struct EchoGeneration;

    #[async_trait]
    impl GenerationGateway for EchoGeneration {
        async fn complete(
            &self,
            _messages: &[ConversationMessage],
            _tools: &[ToolSchema],
        ) -> crate::error::Result<Completion> {
            Ok(Completion::Text("unused".to_string()))
        }

        async fn summarize_chunk(&self, chunk_text: &str) -> crate::error::Result<String> {
            Ok(format!("summary of {}", chunk_text))
        }

        async fn reduce_summaries(
            &self,
            summaries: &[String],
            video_title: &str,
            _max_words: u32,
        ) -> crate::error::Result<String> {
            Ok(format!("{}: {} parts", video_title, summaries.len()))
        }
    }

    fn snippets() -> Vec<TranscriptSnippet> {
        (0..6)
            .map(|i| TranscriptSnippet::new(format!("part{}", i), i as f64 * 30.0, 30.0))
            .collect()
    }

    #[tokio::test]
    async fn test_process_transcript_end_to_end() {
        let mut settings = Settings::default();
        settings.chunking.chunk_duration_seconds = 60.0;
        settings.summary.batch_pause_seconds = 0.0;

        let retrieval = Arc::new(MemoryRetrieval::new());
        let orchestrator = Orchestrator::with_gateways(
            settings,
            Arc::new(EchoGeneration),
            retrieval.clone(),
        );

        let result = orchestrator
            .process_transcript("vid1", "Test Video", &snippets())
            .await
            .unwrap();

        assert_eq!(result.chunks_indexed, 3);
        assert_eq!(result.summary, "Test Video: 3 parts");

        let hits = retrieval.search("part0", 5, "vid1").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.as_deref().unwrap().contains("part0"));
    }

    #[tokio::test]
    async fn test_empty_transcript_is_an_error() {
        let orchestrator = Orchestrator::with_gateways(
            Settings::default(),
            Arc::new(EchoGeneration),
            Arc::new(MemoryRetrieval::new()),
        );

        let result = orchestrator.process_transcript("vid", "t", &[]).await;
        assert!(result.is_err());
    }
}
