use thiserror::Error;

/// Errors from a single outbound chat request.
///
/// The taxonomy is flat and every variant is handled the same way: the
/// session catches the error at the `submit` boundary, records its display
/// string as `last_error`, and appends a synthesized bot message. Nothing
/// propagates past the session. The display strings matter -- they are shown
/// to the user verbatim inside the error message template.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request completed but the backend answered with a non-2xx status.
    #[error("API error: {status} {reason}")]
    Api { status: u16, reason: String },

    /// The request could not complete (connection refused, DNS, reset, ...).
    /// Carries the underlying failure's message.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be parsed as the expected reply shape.
    #[error("{0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ChatError::Api {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 Internal Server Error");
    }

    #[test]
    fn test_transport_error_display_is_bare_message() {
        let err = ChatError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_deserialization_error_display_is_bare_message() {
        let err = ChatError::Deserialization("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "expected value at line 1");
    }
}
