//! Wire contract with the RAG backend.
//!
//! The backend exposes a small JSON-over-HTTP API: `POST /chat` (and its
//! `POST /chat-with-context?top_k=N` variant) for questions, `GET /health`
//! and `GET /ready` for service checks. These types model exactly the
//! fields the client consumes; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// Answer text shown when the backend's reply carries no usable `response`.
pub const FALLBACK_ANSWER: &str = "Sorry, I could not understand your question.";

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question, exactly as typed (no trimming).
    pub query: String,
    /// Opaque per-request token, format `web-session-<millis>`.
    pub session_id: String,
}

/// Reply body of `POST /chat`.
///
/// All fields are optional on the wire: the backend omits or nulls them in
/// refusal and degraded paths. Use [`ChatReply::answer`] and
/// [`ChatReply::confidence`] rather than the raw fields -- they apply the
/// fallback and falsy-is-absent rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// The backend echoes the session token back; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Retrieved source chunks. Opaque to the client; only the count is
    /// ever surfaced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retrieved_context: Vec<serde_json::Value>,
}

impl ChatReply {
    /// The answer text to display: `response` when present and non-empty,
    /// otherwise [`FALLBACK_ANSWER`].
    pub fn answer(&self) -> &str {
        self.response
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_ANSWER)
    }

    /// The confidence score to display.
    ///
    /// A score of exactly 0.0 is treated as "no confidence value", not as
    /// zero confidence. The backend sends 0.0 on refusal responses, where
    /// no score was computed.
    pub fn confidence(&self) -> Option<f64> {
        self.confidence.filter(|c| *c != 0.0)
    }

    /// Number of retrieved source chunks behind this answer.
    pub fn source_count(&self) -> usize {
        self.retrieved_context.len()
    }
}

/// Reply body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: String,
    /// Per-dependency status, `"healthy"` or `"unhealthy: <detail>"`.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl HealthReport {
    /// Whether the backend reported every dependency healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Reply body of `GET /ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyReply {
    pub status: String,
}
