//! Shared domain types for Askbook.
//!
//! This crate contains the types used across the Askbook client:
//! conversation messages, the wire contract with the RAG backend,
//! client configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod wire;
