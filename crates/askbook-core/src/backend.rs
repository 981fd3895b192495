//! ChatBackend trait definition.
//!
//! The one seam between the conversation state machine and the outside
//! world. Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! The concrete HTTP implementation lives in `askbook-infra`.

use askbook_types::error::ChatError;
use askbook_types::wire::{ChatReply, ChatRequest};

/// Trait for the remote question-answering backend.
///
/// One call per user question, running to completion with a single
/// success-or-failure outcome. Implementations must not retry: the session
/// relies on exactly one reply (or error) per request.
pub trait ChatBackend: Send + Sync {
    /// Human-readable backend name (e.g., "http").
    fn name(&self) -> &str;

    /// Send a question and receive the full reply.
    ///
    /// `top_k` selects the retrieval-depth variant of the endpoint when
    /// set; `None` uses the backend's default retrieval.
    fn ask(
        &self,
        request: &ChatRequest,
        top_k: Option<u32>,
    ) -> impl std::future::Future<Output = Result<ChatReply, ChatError>> + Send;
}
