//! One-shot question command.
//!
//! Drives a throwaway `ChatSession` through a single submission and prints
//! the resulting answer. Failures are reported the same way the session
//! reports them to any view -- as the synthesized bot message -- with a
//! non-zero exit code for scripts.

use console::style;

use askbook_core::session::{ChatSession, SubmitOutcome};
use askbook_infra::http::HttpChatBackend;

use super::chat::renderer::{AnswerRenderer, format_confidence};

/// Ask a single question and print the answer.
pub async fn ask_once(
    backend: HttpChatBackend,
    question: &str,
    top_k: Option<u32>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let session = match top_k {
        Some(k) => ChatSession::with_top_k(backend, k),
        None => ChatSession::new(backend),
    };

    let spinner = if json || quiet {
        None
    } else {
        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(spinner)
    };

    let outcome = session.submit(question).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let snapshot = session.snapshot();
    let answer = snapshot
        .log
        .last()
        .ok_or_else(|| anyhow::anyhow!("session recorded no reply"))?;

    if json {
        let out = serde_json::json!({
            "question": question,
            "answer": answer.text,
            "confidence": answer.confidence,
            "error": snapshot.last_error,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let renderer = AnswerRenderer::new();
        println!("{}", renderer.render(&answer.text).trim_end());
        if let Some(confidence) = answer.confidence {
            println!("{}", style(format_confidence(confidence)).dim());
        }
    }

    if outcome == SubmitOutcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}
