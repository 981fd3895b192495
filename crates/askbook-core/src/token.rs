//! Per-request session token generation.

use chrono::Utc;

/// Prefix of every session token sent to the backend.
pub const SESSION_TOKEN_PREFIX: &str = "web-session-";

/// Generate a session token for one outbound request.
///
/// Format: `web-session-<millisecond unix timestamp>`. A fresh token is
/// generated for every request, not once per conversation, so the backend
/// treats each question independently and cannot correlate turns. That
/// matches what the deployed backend expects today; change both sides
/// together if per-conversation tokens are ever introduced.
pub fn session_token() -> String {
    format!("{SESSION_TOKEN_PREFIX}{}", Utc::now().timestamp_millis())
}
