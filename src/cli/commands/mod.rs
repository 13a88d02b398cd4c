//! CLI command implementations.

mod chat;
mod chunk;
mod summarize;

pub use chat::run_chat;
pub use chunk::run_chunk;
pub use summarize::run_summarize;
