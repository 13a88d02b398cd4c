//! Transcript chunking.
//!
//! Splits a time-coded transcript into duration-bounded chunks for
//! indexing and summarization.

use crate::error::{Result, SvarError};
use crate::transcript::TranscriptSnippet;
use serde::{Deserialize, Serialize};

/// A contiguous, duration-bounded span of transcript text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Space-joined text of the absorbed snippets.
    pub text: String,
    /// Start time of the first absorbed snippet, in seconds.
    pub start: f64,
    /// End time of the last absorbed snippet, in seconds.
    pub end: f64,
}

impl Chunk {
    /// Duration of this chunk in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Format the start time for display.
    pub fn format_timestamp(&self) -> String {
        let total_seconds = self.start as u32;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, secs)
        } else {
            format!("{:02}:{:02}", minutes, secs)
        }
    }
}

/// Time-based chunker.
///
/// Greedily accumulates snippets until adding the next one would push the
/// buffered duration past the target, then closes the buffer into a chunk.
pub struct TemporalChunker {
    chunk_duration: f64,
}

impl TemporalChunker {
    /// Create a chunker with the given target chunk duration in seconds.
    pub fn new(chunk_duration: f64) -> Result<Self> {
        if !chunk_duration.is_finite() || chunk_duration <= 0.0 {
            return Err(SvarError::InvalidInput(format!(
                "chunk duration must be positive, got {}",
                chunk_duration
            )));
        }
        Ok(Self { chunk_duration })
    }

    /// Split snippets into chunks.
    ///
    /// Every snippet lands in exactly one chunk, in input order. A single
    /// snippet longer than the target duration becomes a chunk of its own;
    /// the overflow check only fires on a non-empty buffer.
    pub fn chunk(&self, snippets: &[TranscriptSnippet]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer: Vec<&TranscriptSnippet> = Vec::new();
        let mut buffered_duration = 0.0_f64;

        for snippet in snippets {
            if buffered_duration + snippet.duration > self.chunk_duration && !buffer.is_empty() {
                chunks.push(close_chunk(&buffer));
                buffer.clear();
                buffered_duration = 0.0;
            }

            buffer.push(snippet);
            buffered_duration += snippet.duration;
        }

        if !buffer.is_empty() {
            chunks.push(close_chunk(&buffer));
        }

        chunks
    }
}

/// Close a non-empty snippet buffer into a chunk.
fn close_chunk(buffer: &[&TranscriptSnippet]) -> Chunk {
    let text = buffer
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Chunk {
        text,
        start: buffer[0].start,
        end: buffer[buffer.len() - 1].end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(text: &str, start: f64, duration: f64) -> TranscriptSnippet {
        TranscriptSnippet::new(text, start, duration)
    }

    #[test]
    fn test_chunk_boundary_split() {
        let chunker = TemporalChunker::new(30.0).unwrap();
        let snippets = vec![
            snippet("a", 0.0, 10.0),
            snippet("b", 10.0, 15.0),
            snippet("c", 25.0, 20.0),
        ];

        // Adding "c" would push the buffered duration to 45 > 30, so it
        // starts a new chunk.
        let chunks = chunker.chunk(&snippets);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a b");
        assert_eq!(chunks[0].start, 0.0);
        assert_eq!(chunks[0].end, 25.0);
        assert_eq!(chunks[1].text, "c");
        assert_eq!(chunks[1].start, 25.0);
        assert_eq!(chunks[1].end, 45.0);
    }

    #[test]
    fn test_empty_input() {
        let chunker = TemporalChunker::new(30.0).unwrap();
        assert!(chunker.chunk(&[]).is_empty());
    }

    #[test]
    fn test_oversized_single_snippet() {
        let chunker = TemporalChunker::new(30.0).unwrap();
        let snippets = vec![snippet("long monologue", 0.0, 90.0)];

        let chunks = chunker.chunk(&snippets);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "long monologue");
        assert_eq!(chunks[0].start, 0.0);
        assert_eq!(chunks[0].end, 90.0);
    }

    #[test]
    fn test_oversized_snippet_between_others() {
        let chunker = TemporalChunker::new(30.0).unwrap();
        let snippets = vec![
            snippet("a", 0.0, 10.0),
            snippet("b", 10.0, 90.0),
            snippet("c", 100.0, 10.0),
        ];

        let chunks = chunker.chunk(&snippets);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "a");
        assert_eq!(chunks[1].text, "b");
        assert_eq!(chunks[2].text, "c");
    }

    #[test]
    fn test_no_snippet_dropped_or_duplicated() {
        let chunker = TemporalChunker::new(25.0).unwrap();
        let snippets: Vec<TranscriptSnippet> = (0..17)
            .map(|i| snippet(&format!("s{}", i), i as f64 * 7.0, 7.0))
            .collect();

        let chunks = chunker.chunk(&snippets);
        let rejoined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let expected = snippets
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, expected);

        // 7s snippets against a 25s target: three per chunk at most.
        for chunk in &chunks {
            assert!(chunk.text.split(' ').count() <= 3);
        }
    }

    #[test]
    fn test_chunk_spans_are_ordered() {
        let chunker = TemporalChunker::new(20.0).unwrap();
        let snippets: Vec<TranscriptSnippet> = (0..10)
            .map(|i| snippet("x", i as f64 * 8.0, 8.0))
            .collect();

        let chunks = chunker.chunk(&snippets);
        for pair in chunks.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_invalid_chunk_duration_rejected() {
        assert!(TemporalChunker::new(0.0).is_err());
        assert!(TemporalChunker::new(-5.0).is_err());
        assert!(TemporalChunker::new(f64::NAN).is_err());
    }

    #[test]
    fn test_chunk_timestamp_format() {
        let chunk = Chunk {
            text: "x".to_string(),
            start: 125.0,
            end: 130.0,
        };
        assert_eq!(chunk.format_timestamp(), "02:05");

        let chunk = Chunk {
            text: "x".to_string(),
            start: 3665.0,
            end: 3700.0,
        };
        assert_eq!(chunk.format_timestamp(), "01:01:05");
    }
}
