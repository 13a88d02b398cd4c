//! Chunk command: split a transcript and print the chunks.

use crate::chunking::TemporalChunker;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::transcript::load_snippets;
use std::path::Path;

/// Run the chunk command.
pub fn run_chunk(transcript: &str, duration: Option<f64>, settings: Settings) -> Result<()> {
    let snippets = load_snippets(Path::new(transcript))?;
    Output::info(&format!("Loaded {} snippets", snippets.len()));

    let chunk_duration = duration.unwrap_or(settings.chunking.chunk_duration_seconds);
    let chunker = TemporalChunker::new(chunk_duration)?;
    let chunks = chunker.chunk(&snippets);

    Output::success(&format!(
        "Created {} chunks (target {:.0}s each)",
        chunks.len(),
        chunk_duration
    ));

    for (index, chunk) in chunks.iter().enumerate() {
        Output::chunk(index, &chunk.format_timestamp(), chunk.duration(), &chunk.text);
    }

    Ok(())
}
