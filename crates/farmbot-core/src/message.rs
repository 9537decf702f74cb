//! Conversation message types.
//!
//! Messages are immutable once appended to a session log: they are created
//! only by the session worker and never mutated afterwards.

use crate::report::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the sender of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// Message from the user.
    User,
    /// Message from the advisory assistant.
    Assistant,
}

/// An opaque handle to an uploaded image.
///
/// The engine never persists or re-reads the referenced data beyond the
/// single analysis call; it only checks that the handle is plausibly
/// readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageRef {
    /// A URL or file path to the image.
    Uri(String),
    /// Raw image bytes held in memory.
    Bytes(Vec<u8>),
}

impl ImageRef {
    /// Whether the handle can plausibly be analyzed. A blank URI or an
    /// empty byte buffer is unreadable.
    pub fn is_readable(&self) -> bool {
        match self {
            Self::Uri(uri) => !uri.trim().is_empty(),
            Self::Bytes(bytes) => !bytes.is_empty(),
        }
    }
}

/// A single message in a conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// Who sent the message.
    pub sender: Sender,
    /// The chat text of the message.
    pub text: String,
    /// Timestamp when the message was created.
    pub timestamp: DateTime<Utc>,
    /// Attached image handle, if the message carried an upload.
    pub image: Option<ImageRef>,
    /// Structured diagnostic payload, for assistant messages that carry one.
    pub report: Option<AnalysisReport>,
}

impl Message {
    /// Creates a user text message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, None, None)
    }

    /// Creates a user message carrying an image upload.
    pub fn user_with_image(text: impl Into<String>, image: ImageRef) -> Self {
        Self::new(Sender::User, text, Some(image), None)
    }

    /// Creates an assistant text message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, None, None)
    }

    /// Creates an assistant message with an optional structured report.
    pub fn assistant_with_report(
        text: impl Into<String>,
        report: Option<AnalysisReport>,
    ) -> Self {
        Self::new(Sender::Assistant, text, None, report)
    }

    fn new(
        sender: Sender,
        text: impl Into<String>,
        image: Option<ImageRef>,
        report: Option<AnalysisReport>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            image,
            report,
        }
    }
}
