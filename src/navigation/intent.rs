//! Cross-view messages delivered on navigation transitions.

use crate::models::{MessageId, MessageRecord};

/// A message from one view to another.
///
/// Intents are moved into the destination view's
/// [`handle_intent`](super::View::handle_intent) and are not `Clone`, so each
/// one is consumed exactly once.
#[derive(Debug, PartialEq)]
pub enum Intent {
    None,
    Navigate(Payload),
    SettingsChanged,
}

impl Intent {
    pub fn is_none(&self) -> bool {
        matches!(self, Intent::None)
    }

    pub fn focus_message(id: MessageId) -> Self {
        Intent::Navigate(Payload::FocusMessage(id))
    }

    pub fn reply_to(record: MessageRecord) -> Self {
        Intent::Navigate(Payload::ReplyTo(record))
    }
}

#[derive(Debug, PartialEq)]
pub enum Payload {
    /// Select and scroll to a message in the list.
    FocusMessage(MessageId),
    /// Start composing a reply to a message.
    ReplyTo(MessageRecord),
    /// Start a fresh identity form instead of editing the current one.
    NewIdentity,
}
