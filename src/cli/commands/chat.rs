//! Interactive chat command.

use crate::agent::Agent;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{Result, SvarError};
use crate::message::ConversationMessage;
use crate::orchestrator::Orchestrator;
use crate::transcript::load_snippets;
use crate::video::extract_video_id;
use console::style;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Run the interactive chat command.
///
/// Processes the transcript first (chunk, summarize, index), then answers
/// questions about it until the user exits.
pub async fn run_chat(
    transcript: &str,
    video: &str,
    title: Option<String>,
    settings: Settings,
) -> Result<()> {
    let video_id = extract_video_id(video).ok_or_else(|| {
        SvarError::InvalidInput(format!("Could not extract a video ID from: {}", video))
    })?;
    let video_title = title.unwrap_or_else(|| video_id.clone());

    let snippets = load_snippets(Path::new(transcript))?;
    Output::info(&format!("Loaded {} snippets", snippets.len()));

    let orchestrator = Orchestrator::new(settings.clone())?;

    let spinner = Output::spinner("Processing transcript (chunk, summarize, index)...");
    let processed = orchestrator
        .process_transcript(&video_id, &video_title, &snippets)
        .await?;
    spinner.finish_and_clear();

    Output::success(&format!(
        "Indexed {} chunks for {}",
        processed.chunks_indexed, processed.title
    ));
    Output::kv("Summary", &processed.summary);

    let agent = Agent::new(orchestrator.generation(), orchestrator.retrieval(), &video_id)
        .with_prompts(orchestrator.prompts().clone())
        .with_max_tool_calls(settings.agent.max_tool_calls)
        .with_default_top_k(settings.retrieval.default_top_k);

    println!("\n{}", style("Svar Chat").bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let mut history: Vec<ConversationMessage> = Vec::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            history.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        let answer = agent.answer(input, &history, &processed.summary).await;
        println!("\n{} {}\n", style("Svar:").cyan().bold(), answer);

        history.push(ConversationMessage::User {
            content: input.to_string(),
        });
        history.push(ConversationMessage::Assistant {
            content: answer,
        });

        // Keep only the most recent turns.
        let window = settings.agent.history_window;
        if history.len() > window {
            history = history.split_off(history.len() - window);
        }
    }

    Ok(())
}
