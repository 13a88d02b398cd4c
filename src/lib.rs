//! Svar - Video Transcript RAG
//!
//! A conversational retrieval-augmented-generation engine for time-coded
//! video transcripts.
//!
//! The name "Svar" comes from the Norwegian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Split a time-coded transcript into duration-bounded chunks
//! - Generate one holistic video summary via map-reduce over those chunks
//! - Index the chunks for semantic retrieval, scoped to their video
//! - Chat about a video with an agent that fetches chunks on demand
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt-template management
//! - `transcript` - Transcript snippet input
//! - `video` - Video ID extraction
//! - `chunking` - Duration-bounded transcript chunking
//! - `message` - Conversation message and tool types
//! - `generation` - LLM completion gateway abstraction
//! - `retrieval` - Vector-search gateway abstraction
//! - `summary` - Map-reduce summarization
//! - `agent` - Tool-calling chat agent
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use svar::config::Settings;
//! use svar::orchestrator::Orchestrator;
//! use svar::transcript::TranscriptSnippet;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let snippets = vec![TranscriptSnippet::new("hello and welcome", 0.0, 4.0)];
//!     let result = orchestrator
//!         .process_transcript("dQw4w9WgXcQ", "My Video", &snippets)
//!         .await?;
//!     println!("Indexed {} chunks", result.chunks_indexed);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod message;
pub mod orchestrator;
pub mod retrieval;
pub mod summary;
pub mod transcript;
pub mod video;

pub use error::{Result, SvarError};
