//! Chat agent with retrieval tool calling.
//!
//! Answers user questions about one video by driving the generation
//! gateway through a bounded loop, fetching transcript chunks on demand
//! when the model asks for them.

mod runner;
mod tools;

pub use runner::{Agent, FALLBACK_ANSWER, NO_CHUNKS_FOUND};
pub use tools::{extract_search_args, retrieval_tool, SearchArgs};
