//! Chat participant.
//!
//! A [`User`] is a passive holder of identity, history, and undo log. It
//! keeps no reference back to the mediator; the registry owns
//! users and drives delivery through [`User::receive`], so there is no shared
//! or ambient state between the two layers.

use std::sync::Arc;

use crate::{
    history::ChatHistory,
    message::{Message, UserId},
    snapshot::{Snapshot, UndoLog},
};

/// A registered participant: identity, message history, undo log.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique username
    id: UserId,
    /// Every message sent by or delivered to this user, in arrival order
    history: ChatHistory,
    /// Append-only record of undone sends
    undo_log: UndoLog,
}

impl User {
    /// Create a user with an empty history and undo log.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into(), history: ChatHistory::new(), undo_log: UndoLog::new() }
    }

    /// This user's unique username.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read access to the message history.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Read access to the undo log.
    pub fn undo_log(&self) -> &UndoLog {
        &self.undo_log
    }

    /// Append a delivered message to the history.
    ///
    /// Called by the mediator during routing, and for the sender's own copy
    /// of an outgoing message.
    pub fn receive(&mut self, message: Arc<Message>) {
        self.history.add(message);
    }

    /// Undo this user's most recent send.
    ///
    /// Removes the newest message *authored by this user* from the history
    /// (messages merely received are never touched), records a [`Snapshot`]
    /// of its content and timestamp, and returns the snapshot. `None` when
    /// the history holds nothing this user sent; in that case neither
    /// structure changes.
    ///
    /// The removal is local: recipients who already hold the message keep it.
    pub fn undo_last_send(&mut self) -> Option<&Snapshot> {
        let removed = self.history.remove_last_sent_by(&self.id)?;
        self.undo_log.record(Snapshot::of(&removed));
        self.undo_log.last()
    }
}
