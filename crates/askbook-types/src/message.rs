//! Conversation message types.
//!
//! A conversation is an append-only sequence of [`Message`] values.
//! Messages are immutable once created; append order is display order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message in a conversation.
///
/// The `id` is a UUIDv7, so ids are unique and time-ordered: sorting by id
/// reproduces append order. `confidence` is only ever present on bot
/// messages and carries the backend's answer-certainty score in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender: Sender::User,
            confidence: None,
        }
    }

    /// Create a bot message with an optional confidence score.
    pub fn bot(text: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender: Sender::Bot,
            confidence,
        }
    }
}
