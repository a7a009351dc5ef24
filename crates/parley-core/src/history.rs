//! Ordered message store with user-scoped iteration.
//!
//! # Design
//!
//! - Messages are held as `Arc<Message>`, so a history stores references to
//!   shared allocations, never copies. Removing a message from one history
//!   leaves every other history's reference valid.
//! - [`UserMessages`] is lazy and single-pass: filtering happens on each
//!   advance, not eagerly. A cached lookahead makes [`UserMessages::has_more`]
//!   repeatable: peeking never discards a matching element, no matter how
//!   many times it is called before the next take.

use std::{slice, sync::Arc};

use crate::message::Message;

/// Ordered store of messages for one user.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<Arc<Message>>,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn add(&mut self, message: Arc<Message>) {
        self.messages.push(message);
    }

    /// The most recently added message, or `None` when empty.
    pub fn last(&self) -> Option<&Arc<Message>> {
        self.messages.last()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over all messages in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Arc<Message>> {
        self.messages.iter()
    }

    /// Remove and return the most recent message authored by `user`.
    ///
    /// Messages this user merely received are left in place. Returns `None`
    /// if no stored message was sent by `user`.
    pub fn remove_last_sent_by(&mut self, user: &str) -> Option<Arc<Message>> {
        let index = self.messages.iter().rposition(|m| m.sender() == user)?;
        Some(self.messages.remove(index))
    }

    /// Lazy iterator over the messages that concern `user` (sent by them or
    /// addressed to them), preserving insertion order.
    ///
    /// The iterator is single-pass; request a fresh one to restart.
    pub fn iter_for_user<'a>(&'a self, user: &'a str) -> UserMessages<'a> {
        UserMessages { user, inner: self.messages.iter(), peeked: None }
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a Arc<Message>;
    type IntoIter = slice::Iter<'a, Arc<Message>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only view of a history restricted to one user's messages.
///
/// Yields exactly the messages where the user is sender or recipient, in the
/// order the underlying history stores them. Once exhausted it stays
/// exhausted.
#[derive(Debug)]
pub struct UserMessages<'a> {
    /// Id the filter is scoped to
    user: &'a str,
    /// Cursor into the underlying history
    inner: slice::Iter<'a, Arc<Message>>,
    /// Next matching element, found by a previous peek but not yet taken
    peeked: Option<&'a Arc<Message>>,
}

impl UserMessages<'_> {
    /// Whether another matching message remains.
    ///
    /// Scans forward to the next match and caches it, so calling this any
    /// number of times consumes nothing the subsequent [`Iterator::next`]
    /// would have yielded.
    pub fn has_more(&mut self) -> bool {
        self.fill_lookahead();
        self.peeked.is_some()
    }

    fn fill_lookahead(&mut self) {
        if self.peeked.is_none() {
            let user = self.user;
            self.peeked = self.inner.find(|m| m.concerns(user));
        }
    }
}

impl<'a> Iterator for UserMessages<'a> {
    type Item = &'a Arc<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fill_lookahead();
        self.peeked.take()
    }
}
