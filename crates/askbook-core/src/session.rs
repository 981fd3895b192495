//! Single-conversation chat session state machine.
//!
//! A [`ChatSession`] owns an append-only message log, the input buffer,
//! the in-flight flag, and the last failure description. Its one mutating
//! operation, [`ChatSession::submit`], runs a full request cycle:
//! Idle -> Submitting -> Idle, appending exactly one user message and one
//! bot message (answer or synthesized error) per accepted submission.
//!
//! Deliberately absent: retry, timeout, and cancellation. One outbound
//! call runs to completion per submission, and a hung backend leaves the
//! session in Submitting until it resolves. Callers must not work around
//! this with their own retries -- it would change the log's contract of
//! exactly two appended messages per accepted submit.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use askbook_types::message::Message;
use askbook_types::wire::ChatRequest;

use crate::backend::ChatBackend;
use crate::token::session_token;

/// Template for the bot message synthesized when a request fails.
fn error_reply(description: &str) -> String {
    format!("Error: {description}. Please make sure the backend server is running.")
}

/// Result of a [`ChatSession::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend answered; the answer was appended to the log.
    Answered,
    /// The request failed; a synthesized error message was appended and
    /// `last_error` records the failure description.
    Failed,
    /// The input was empty/whitespace or a request was already in flight.
    /// Nothing changed.
    Ignored,
}

/// Mutable session state, guarded by the session's mutex.
#[derive(Debug, Default)]
struct SessionState {
    log: Vec<Message>,
    pending_input: String,
    is_submitting: bool,
    last_error: Option<String>,
}

/// Read-only view of session state for rendering.
///
/// A cloned snapshot: the presentation layer never holds a reference into
/// live session state.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub log: Vec<Message>,
    pub pending_input: String,
    pub is_submitting: bool,
    pub last_error: Option<String>,
}

/// One open conversation with a RAG backend.
///
/// Generic over [`ChatBackend`] so the state machine can be driven by the
/// HTTP backend in production and by scripted backends in tests.
///
/// The `is_submitting` flag, not the mutex, is the mutual-exclusion gate:
/// the mutex is never held across the network await, and a `submit` issued
/// while a request is in flight is rejected by the flag check. The session
/// is `Sync`, so a presentation layer may poll snapshots from another task
/// while a request runs.
pub struct ChatSession<B: ChatBackend> {
    backend: B,
    /// Retrieval depth forwarded with every request, when configured.
    top_k: Option<u32>,
    state: Mutex<SessionState>,
}

impl<B: ChatBackend> ChatSession<B> {
    /// Create a session with an empty log, idle state, and no error.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            top_k: None,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Create a session that requests `top_k` retrieved chunks per question.
    pub fn with_top_k(backend: B, top_k: u32) -> Self {
        Self {
            backend,
            top_k: Some(top_k),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Access the backend driving this session.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state lock poisoned")
    }

    /// Cloned read-only view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock_state();
        SessionSnapshot {
            log: state.log.clone(),
            pending_input: state.pending_input.clone(),
            is_submitting: state.is_submitting,
            last_error: state.last_error.clone(),
        }
    }

    /// Set the input buffer. Allowed in any state; pure buffer mutation.
    pub fn update_input(&self, text: impl Into<String>) {
        self.lock_state().pending_input = text.into();
    }

    /// Submit a question and run one full request cycle.
    ///
    /// Rejected without any state change when the trimmed input is empty
    /// or a request is already in flight. An accepted submission appends
    /// the user message, clears the input buffer and the previous error,
    /// issues exactly one backend call, and appends exactly one bot
    /// message before returning to idle -- on failure a synthesized error
    /// message, never a propagated error.
    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        if raw_input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        {
            let mut state = self.lock_state();
            if state.is_submitting {
                debug!("submit ignored: a request is already in flight");
                return SubmitOutcome::Ignored;
            }
            // The query is sent exactly as typed; only the emptiness check
            // looks at the trimmed form.
            state.log.push(Message::user(raw_input));
            state.pending_input.clear();
            state.last_error = None;
            state.is_submitting = true;
        }

        let request = ChatRequest {
            query: raw_input.to_string(),
            session_id: session_token(),
        };
        debug!(
            backend = self.backend.name(),
            session_id = %request.session_id,
            "sending chat request"
        );

        // The single suspension point. The lock is not held here.
        let result = self.backend.ask(&request, self.top_k).await;

        let mut state = self.lock_state();
        state.is_submitting = false;
        match result {
            Ok(reply) => {
                let confidence = reply.confidence();
                debug!(
                    confidence = ?confidence,
                    sources = reply.source_count(),
                    "chat request answered"
                );
                state.log.push(Message::bot(reply.answer(), confidence));
                SubmitOutcome::Answered
            }
            Err(err) => {
                let description = err.to_string();
                warn!(error = %description, "chat request failed");
                state.log.push(Message::bot(error_reply(&description), None));
                state.last_error = Some(description);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Arc;

    use tokio::sync::Notify;

    use askbook_types::error::ChatError;
    use askbook_types::message::Sender;
    use askbook_types::wire::{ChatReply, FALLBACK_ANSWER};

    /// Backend that replays a fixed script of results, optionally parking
    /// on a gate before answering.
    struct ScriptBackend {
        gate: Option<Arc<Notify>>,
        script: Mutex<VecDeque<Result<ChatReply, ChatError>>>,
        seen_top_k: Mutex<Vec<Option<u32>>>,
    }

    impl ScriptBackend {
        fn new(script: Vec<Result<ChatReply, ChatError>>) -> Self {
            Self {
                gate: None,
                script: Mutex::new(script.into()),
                seen_top_k: Mutex::new(Vec::new()),
            }
        }

        fn gated(script: Vec<Result<ChatReply, ChatError>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                script: Mutex::new(script.into()),
                seen_top_k: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatBackend for ScriptBackend {
        fn name(&self) -> &str {
            "script"
        }

        async fn ask(
            &self,
            _request: &ChatRequest,
            top_k: Option<u32>,
        ) -> Result<ChatReply, ChatError> {
            self.seen_top_k.lock().unwrap().push(top_k);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn answer(text: &str, confidence: Option<f64>) -> Result<ChatReply, ChatError> {
        Ok(ChatReply {
            response: Some(text.to_string()),
            confidence,
            ..ChatReply::default()
        })
    }

    fn server_error() -> Result<ChatReply, ChatError> {
        Err(ChatError::Api {
            status: 500,
            reason: "Internal Server Error".to_string(),
        })
    }

    #[test]
    fn fresh_session_is_idle_and_empty() {
        let session = ChatSession::new(ScriptBackend::new(vec![]));
        let snap = session.snapshot();
        assert!(snap.log.is_empty());
        assert!(snap.pending_input.is_empty());
        assert!(!snap.is_submitting);
        assert!(snap.last_error.is_none());
    }

    #[tokio::test]
    async fn accepted_submit_appends_user_then_bot() {
        let session = ChatSession::new(ScriptBackend::new(vec![answer(
            "Robots use joints.",
            Some(0.87),
        )]));
        let outcome = session.submit("What is a joint?").await;
        assert_eq!(outcome, SubmitOutcome::Answered);

        let snap = session.snapshot();
        assert_eq!(snap.log.len(), 2);
        assert_eq!(snap.log[0].sender, Sender::User);
        assert_eq!(snap.log[0].text, "What is a joint?");
        assert_eq!(snap.log[1].sender, Sender::Bot);
        assert_eq!(snap.log[1].text, "Robots use joints.");
        assert_eq!(snap.log[1].confidence, Some(0.87));
        assert!(!snap.is_submitting);
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_is_rejected() {
        let session = ChatSession::new(ScriptBackend::new(vec![]));
        assert_eq!(session.submit("").await, SubmitOutcome::Ignored);
        assert_eq!(session.submit("   ").await, SubmitOutcome::Ignored);
        assert_eq!(session.submit("\t\n").await, SubmitOutcome::Ignored);

        let snap = session.snapshot();
        assert!(snap.log.is_empty());
        assert!(!snap.is_submitting);
        assert!(snap.last_error.is_none());
    }

    #[tokio::test]
    async fn submit_while_in_flight_leaves_log_untouched() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(ChatSession::new(ScriptBackend::gated(
            vec![answer("first answer", None)],
            gate.clone(),
        )));

        let background = {
            let session = session.clone();
            tokio::spawn(async move { session.submit("first question").await })
        };

        // Let the first submit park inside the backend call.
        while !session.snapshot().is_submitting {
            tokio::task::yield_now().await;
        }
        assert_eq!(session.snapshot().log.len(), 1);

        // A second submit during flight has no effect on the log.
        assert_eq!(
            session.submit("second question").await,
            SubmitOutcome::Ignored
        );
        assert_eq!(session.snapshot().log.len(), 1);

        gate.notify_one();
        assert_eq!(background.await.unwrap(), SubmitOutcome::Answered);

        let snap = session.snapshot();
        assert_eq!(snap.log.len(), 2);
        assert_eq!(snap.log[1].text, "first answer");
        assert!(!snap.is_submitting);
    }

    #[tokio::test]
    async fn missing_response_field_uses_fallback() {
        let session = ChatSession::new(ScriptBackend::new(vec![Ok(ChatReply::default())]));
        assert_eq!(session.submit("anything there?").await, SubmitOutcome::Answered);

        let snap = session.snapshot();
        assert_eq!(snap.log[1].text, FALLBACK_ANSWER);
        assert!(snap.log[1].confidence.is_none());
    }

    #[tokio::test]
    async fn http_failure_synthesizes_error_message() {
        let session = ChatSession::new(ScriptBackend::new(vec![server_error()]));
        assert_eq!(session.submit("What is a joint?").await, SubmitOutcome::Failed);

        let snap = session.snapshot();
        assert_eq!(snap.log.len(), 2);
        assert_eq!(
            snap.log[1].text,
            "Error: API error: 500 Internal Server Error. \
             Please make sure the backend server is running."
        );
        assert!(snap.log[1].confidence.is_none());
        assert_eq!(
            snap.last_error.as_deref(),
            Some("API error: 500 Internal Server Error")
        );
        assert!(!snap.is_submitting);
    }

    #[tokio::test]
    async fn transport_failure_uses_same_template() {
        let session = ChatSession::new(ScriptBackend::new(vec![Err(ChatError::Transport(
            "connection refused".to_string(),
        ))]));
        assert_eq!(session.submit("hello?").await, SubmitOutcome::Failed);

        let snap = session.snapshot();
        assert_eq!(
            snap.log[1].text,
            "Error: connection refused. Please make sure the backend server is running."
        );
        assert_eq!(snap.last_error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn next_submit_clears_previous_error_at_start() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(ChatSession::new(ScriptBackend::gated(
            vec![server_error(), answer("recovered", Some(0.5))],
            gate.clone(),
        )));

        gate.notify_one();
        assert_eq!(session.submit("first").await, SubmitOutcome::Failed);
        assert!(session.snapshot().last_error.is_some());

        // Second submission: the error must clear when it starts, before
        // the backend resolves.
        let background = {
            let session = session.clone();
            tokio::spawn(async move { session.submit("second").await })
        };
        while !session.snapshot().is_submitting {
            tokio::task::yield_now().await;
        }
        assert!(session.snapshot().last_error.is_none());

        gate.notify_one();
        assert_eq!(background.await.unwrap(), SubmitOutcome::Answered);

        let snap = session.snapshot();
        assert!(snap.last_error.is_none());
        assert_eq!(snap.log.len(), 4);
        assert_eq!(snap.log[3].text, "recovered");
    }

    #[tokio::test]
    async fn submit_clears_pending_input_and_keeps_raw_query() {
        let session = ChatSession::new(ScriptBackend::new(vec![answer("ok", None)]));
        session.update_input("  spaced question  ");
        assert_eq!(session.snapshot().pending_input, "  spaced question  ");

        // Whitespace-padded input is accepted and sent as typed.
        assert_eq!(
            session.submit("  spaced question  ").await,
            SubmitOutcome::Answered
        );
        let snap = session.snapshot();
        assert!(snap.pending_input.is_empty());
        assert_eq!(snap.log[0].text, "  spaced question  ");
    }

    #[tokio::test]
    async fn update_input_is_allowed_while_submitting() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(ChatSession::new(ScriptBackend::gated(
            vec![answer("ok", None)],
            gate.clone(),
        )));

        let background = {
            let session = session.clone();
            tokio::spawn(async move { session.submit("question").await })
        };
        while !session.snapshot().is_submitting {
            tokio::task::yield_now().await;
        }

        session.update_input("typing ahead");
        assert_eq!(session.snapshot().pending_input, "typing ahead");

        gate.notify_one();
        background.await.unwrap();
        // Buffer survives completion; only submission clears it.
        assert_eq!(session.snapshot().pending_input, "typing ahead");
    }

    #[tokio::test]
    async fn configured_top_k_is_forwarded() {
        let backend = ScriptBackend::new(vec![answer("ok", None), answer("ok", None)]);
        let session = ChatSession::with_top_k(backend, 3);
        session.submit("one").await;
        session.submit("two").await;
        assert_eq!(
            *session.backend().seen_top_k.lock().unwrap(),
            vec![Some(3), Some(3)]
        );

        let backend = ScriptBackend::new(vec![answer("ok", None)]);
        let session = ChatSession::new(backend);
        session.submit("one").await;
        assert_eq!(*session.backend().seen_top_k.lock().unwrap(), vec![None]);
    }

    #[test]
    fn error_reply_template() {
        assert_eq!(
            error_reply("API error: 500 Internal Server Error"),
            "Error: API error: 500 Internal Server Error. \
             Please make sure the backend server is running."
        );
    }
}
