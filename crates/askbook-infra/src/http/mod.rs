//! HTTP implementation of the chat backend.
//!
//! This module provides the [`HttpChatBackend`] which implements the
//! [`ChatBackend`](askbook_core::backend::ChatBackend) trait over the RAG
//! backend's JSON API, plus the health/readiness probes.

pub mod client;

pub use client::HttpChatBackend;
