//! Client configuration types for Askbook.
//!
//! `ClientConfig` represents the `config.toml` that points the client at
//! a RAG backend deployment.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Askbook client.
///
/// Loaded from `~/.askbook/config.toml`. All fields have sensible defaults,
/// so a missing file means "talk to a local backend".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the RAG backend API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Retrieval depth for `ask --top-k`-less context queries.
    /// When unset, the plain `/chat` endpoint's server-side default applies.
    #[serde(default)]
    pub default_top_k: Option<u32>,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_top_k: None,
        }
    }
}
