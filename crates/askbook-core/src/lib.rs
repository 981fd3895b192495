//! Conversation state machine and backend abstraction for Askbook.
//!
//! This crate defines the "port" ([`backend::ChatBackend`]) that the
//! infrastructure layer implements. It depends only on `askbook-types` --
//! never on `askbook-infra` or any HTTP crate.

pub mod backend;
pub mod session;
pub mod token;
