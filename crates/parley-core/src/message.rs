//! Message value type.
//!
//! A [`Message`] is immutable after construction: fields are private and the
//! accessors return borrowed views only, so no caller can mutate a message
//! that other histories alias. Sharing between the sender's history and each
//! recipient's history goes through `Arc<Message>`: one allocation per send,
//! regardless of fan-out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Unique username identifying a registered user.
pub type UserId = String;

/// Milliseconds since the Unix epoch, as produced by a
/// [`Clock`](crate::clock::Clock).
pub type Timestamp = u64;

/// One chat utterance.
///
/// The recipient list is an ordered set: duplicates are dropped at
/// construction, first occurrence wins. Routing order follows this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message
    sender: UserId,
    /// Who it is addressed to (deduplicated, order-preserving)
    recipients: Vec<UserId>,
    /// When it was created
    timestamp: Timestamp,
    /// The utterance itself
    content: String,
}

impl Message {
    /// Create a new message.
    ///
    /// Duplicate recipient ids are dropped, keeping the first occurrence so
    /// that routing order matches the caller's list.
    pub fn new(
        sender: impl Into<UserId>,
        recipients: Vec<UserId>,
        timestamp: Timestamp,
        content: impl Into<String>,
    ) -> Self {
        let mut deduped: Vec<UserId> = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            if !deduped.contains(&recipient) {
                deduped.push(recipient);
            }
        }

        Self {
            sender: sender.into(),
            recipients: deduped,
            timestamp,
            content: content.into(),
        }
    }

    /// Create a message already wrapped for sharing between histories.
    pub fn shared(
        sender: impl Into<UserId>,
        recipients: Vec<UserId>,
        timestamp: Timestamp,
        content: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::new(sender, recipients, timestamp, content))
    }

    /// Id of the sending user.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Addressed recipients, in routing order.
    pub fn recipients(&self) -> &[UserId] {
        &self.recipients
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether `user` is among the addressed recipients.
    pub fn is_recipient(&self, user: &str) -> bool {
        self.recipients.iter().any(|r| r == user)
    }

    /// Whether `user` is the sender or a recipient.
    ///
    /// This is the predicate user-scoped history iteration filters on.
    pub fn concerns(&self, user: &str) -> bool {
        self.sender == user || self.is_recipient(user)
    }
}
