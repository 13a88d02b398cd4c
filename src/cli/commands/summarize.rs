//! Summarize command: map-reduce summary of a transcript.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::summary::Summarizer;
use crate::transcript::load_snippets;
use std::path::Path;
use std::time::Duration;

/// Run the summarize command.
pub async fn run_summarize(transcript: &str, title: &str, settings: Settings) -> Result<()> {
    let snippets = load_snippets(Path::new(transcript))?;
    Output::info(&format!("Loaded {} snippets", snippets.len()));

    let orchestrator = Orchestrator::new(settings.clone())?;
    let chunks = orchestrator.chunk_transcript(&snippets)?;
    Output::info(&format!("Chunked into {} chunks", chunks.len()));

    let summarizer = Summarizer::new(orchestrator.generation())
        .with_batch_size(settings.summary.batch_size)
        .with_batch_pause(Duration::from_secs_f64(settings.summary.batch_pause_seconds))
        .with_reduce_max_words(settings.summary.reduce_max_words);

    let spinner = Output::spinner("Summarizing...");
    let summary = summarizer.summarize(&chunks, title).await?;
    spinner.finish_and_clear();

    Output::success("Summary:");
    println!("\n{}\n", summary);

    Ok(())
}
