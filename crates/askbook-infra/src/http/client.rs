//! HttpChatBackend -- concrete [`ChatBackend`] implementation over HTTP.
//!
//! Sends questions to the RAG backend's `/chat` endpoint (or
//! `/chat-with-context` when a retrieval depth is requested) as JSON and
//! parses the JSON reply. Also exposes the backend's `/health` and
//! `/ready` probes, which are not part of the `ChatBackend` trait.
//!
//! The client deliberately configures no request timeout: a hung backend
//! keeps the request (and the session's Submitting state) open until the
//! connection resolves. Adding a timeout here would silently change the
//! session's observable behavior.

use askbook_core::backend::ChatBackend;
use askbook_types::error::ChatError;
use askbook_types::wire::{ChatReply, ChatRequest, HealthReport, ReadyReply};

/// HTTP chat backend client.
///
/// Cheap to clone; the inner `reqwest::Client` is an `Arc` around a
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Create a backend client for the given API base URL
    /// (e.g., `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The API base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response status into a [`ChatError::Api`].
    fn status_error(status: reqwest::StatusCode) -> ChatError {
        ChatError::Api {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Issue a GET and parse the JSON reply, with the same error mapping
    /// as the chat path.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ChatError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ChatError::Deserialization(e.to_string()))
    }

    /// Query the backend's health report (`GET /health`).
    pub async fn health(&self) -> Result<HealthReport, ChatError> {
        self.get_json("/health").await
    }

    /// Query the backend's readiness probe (`GET /ready`).
    pub async fn ready(&self) -> Result<ReadyReply, ChatError> {
        self.get_json("/ready").await
    }
}

impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(
        &self,
        request: &ChatRequest,
        top_k: Option<u32>,
    ) -> Result<ChatReply, ChatError> {
        let builder = match top_k {
            None => self.client.post(self.url("/chat")),
            Some(k) => self
                .client
                .post(self.url("/chat-with-context"))
                .query(&[("top_k", k)]),
        };

        let response = builder
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "chat endpoint returned an error status");
            return Err(Self::status_error(status));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::Deserialization(e.to_string()))
    }
}
