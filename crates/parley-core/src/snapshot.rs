//! Undo snapshots.
//!
//! A [`Snapshot`] captures the displayable state of a message (content and
//! timestamp) at the moment it is undone. It has its own lifetime: the
//! original `Message` allocation may still be referenced by recipient
//! histories, or may already be gone.
//!
//! The [`UndoLog`] is deliberately not a stack. Nothing in the contract ever
//! pops or restores an entry, so the structure is an append-only audit trail
//! with read access, and the API makes that explicit.

use serde::{Deserialize, Serialize};

use crate::message::{Message, Timestamp};

/// Immutable capture of an undone message's content and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Text of the message at undo time
    content: String,
    /// Original creation time of the message
    timestamp: Timestamp,
}

impl Snapshot {
    /// Capture the given message's displayable state.
    pub fn of(message: &Message) -> Self {
        Self {
            content: message.content().to_string(),
            timestamp: message.timestamp(),
        }
    }

    /// Captured message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Captured creation time.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Append-only log of undone sends, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoLog {
    entries: Vec<Snapshot>,
}

impl UndoLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot. Entries are never removed.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    /// The most recently recorded snapshot, if any.
    pub fn last(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over recorded snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}
