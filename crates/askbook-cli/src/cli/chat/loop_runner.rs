//! Main chat loop orchestration.
//!
//! Builds a `ChatSession` over the HTTP backend, prints the welcome
//! banner, then loops: read a line, handle slash commands, submit
//! everything else, and render the session's newest message. A spinner
//! runs while a request is in flight; submission is driven to completion
//! before the next line is read, so the session's mutual-exclusion gate
//! is never hit from here.

use console::style;

use askbook_core::session::{ChatSession, SessionSnapshot, SubmitOutcome};
use askbook_infra::http::HttpChatBackend;
use askbook_types::message::Sender;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{AnswerRenderer, format_confidence};

/// Spinner shown while a request is in flight.
fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Print the newest bot message from a snapshot, with its confidence
/// score and, after failures, the error banner.
fn render_latest(renderer: &AnswerRenderer, snapshot: &SessionSnapshot) {
    let Some(message) = snapshot.log.last() else {
        return;
    };

    println!("  {}", renderer.render(&message.text).trim_end());
    if let Some(confidence) = message.confidence {
        println!("  {}", style(format_confidence(confidence)).dim());
    }
    if let Some(error) = &snapshot.last_error {
        println!("  {}", style(format!("Error: {error}")).red().dim());
    }
    println!();
}

/// Print the whole conversation so far.
fn render_history(renderer: &AnswerRenderer, snapshot: &SessionSnapshot) {
    println!();
    if snapshot.log.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return;
    }
    for message in &snapshot.log {
        match message.sender {
            Sender::User => println!("  {} {}", style("You >").green().bold(), message.text),
            Sender::Bot => {
                println!("  {} {}", style("Bot >").cyan().bold(), renderer.render(&message.text).trim_end());
                if let Some(confidence) = message.confidence {
                    println!("        {}", style(format_confidence(confidence)).dim());
                }
            }
        }
    }
    println!();
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(backend: HttpChatBackend, top_k: Option<u32>) -> anyhow::Result<()> {
    print_welcome_banner(backend.base_url());

    let session = match top_k {
        Some(k) => ChatSession::with_top_k(backend, k),
        None => ChatSession::new(backend),
    };
    let renderer = AnswerRenderer::new();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("  {}", style("(Ctrl+D or /exit to leave)").dim());
            }
            InputEvent::Line(line) => {
                if let Some(command) = commands::parse(&line) {
                    match command {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::History => render_history(&renderer, &session.snapshot()),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(cmd) => {
                            println!(
                                "  {} unknown command: {cmd} (try /help)",
                                style("!").yellow().bold()
                            );
                        }
                    }
                    continue;
                }

                let spinner = thinking_spinner();
                let outcome = session.submit(&line).await;
                spinner.finish_and_clear();

                if outcome == SubmitOutcome::Ignored {
                    continue;
                }
                render_latest(&renderer, &session.snapshot());
            }
        }
    }

    Ok(())
}
