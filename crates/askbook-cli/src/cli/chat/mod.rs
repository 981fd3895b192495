//! Interactive chat command.
//!
//! The terminal presentation layer over the `ChatSession` state machine:
//! it only ever calls `submit`/`update_input` and renders read-only
//! snapshots. All request/error handling lives in the session.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;

pub use loop_runner::run_chat_loop;
