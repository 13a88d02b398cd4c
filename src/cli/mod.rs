//! CLI module for Svar.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Svar - Video Transcript RAG
///
/// Turn a time-coded video transcript into retrievable chunks, a video
/// summary, and an interactive question-answering chat.
/// The name "Svar" comes from the Norwegian word for "answer."
#[derive(Parser, Debug)]
#[command(name = "svar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a transcript into duration-bounded chunks and print them
    Chunk {
        /// Path to a transcript JSON file ([{text, start, duration}, ...])
        transcript: String,

        /// Target chunk duration in seconds (overrides config)
        #[arg(short, long)]
        duration: Option<f64>,
    },

    /// Generate a map-reduce summary of a transcript
    Summarize {
        /// Path to a transcript JSON file
        transcript: String,

        /// Video title used in the reduce stage
        #[arg(short, long)]
        title: String,
    },

    /// Chat interactively about a video transcript
    Chat {
        /// Path to a transcript JSON file
        transcript: String,

        /// Video URL or ID the transcript belongs to
        #[arg(long)]
        video: String,

        /// Video title (defaults to the video ID)
        #[arg(short, long)]
        title: Option<String>,
    },
}
