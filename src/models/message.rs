//! Forum message records as consumed by the message list.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity of a message. Also used as the row identity in the
/// message list, so per-row state follows a message when the list shifts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for compact display.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One message in a forum conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    /// The message this one replies to, if any.
    #[serde(default)]
    pub parent: Option<MessageId>,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            parent: None,
            author: author.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<MessageId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn replying_to(mut self, parent: &MessageId) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }

    /// First line of the content, for "replying to" previews.
    pub fn preview(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }
}

/// A new message waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub author: String,
    pub content: String,
    pub reply_to: Option<MessageId>,
}

impl Draft {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            reply_to: None,
        }
    }

    pub fn in_reply_to(mut self, parent: Option<MessageId>) -> Self {
        self.reply_to = parent;
        self
    }
}
