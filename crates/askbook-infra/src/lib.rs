//! Infrastructure implementations for Askbook.
//!
//! Contains the concrete [`http::HttpChatBackend`] implementation of the
//! `ChatBackend` trait defined in `askbook-core`, and the configuration
//! loader.

pub mod config;
pub mod http;
