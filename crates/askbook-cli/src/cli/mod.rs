//! CLI command definitions and dispatch for the `askbook` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod health;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Ask your documentation anything.
#[derive(Parser)]
#[command(name = "askbook", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend API base URL (overrides config.toml).
    #[arg(long, global = true, env = "ASKBOOK_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive chat with the documentation assistant.
    Chat {
        /// Retrieved chunks per question (overrides config default_top_k).
        #[arg(long)]
        top_k: Option<u32>,
    },

    /// Ask one question and print the answer.
    Ask {
        /// The question to send.
        question: String,

        /// Retrieved chunks for this question (overrides config default_top_k).
        #[arg(long)]
        top_k: Option<u32>,
    },

    /// Check the backend's health report.
    Health {
        /// Only probe readiness (GET /ready) instead of the full report.
        #[arg(long)]
        ready: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
