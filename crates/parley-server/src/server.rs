//! Chat server (mediator).
//!
//! Central hub every message passes through. Users hold no reference to the
//! server or to each other; the server owns them via its [`UserRegistry`]
//! and drives all delivery.
//!
//! ## Responsibilities
//!
//! 1. **Registration**: admit and evict users, enforcing id uniqueness
//! 2. **Routing**: fan a message out to each recipient's history
//! 3. **Blocking**: suppress future delivery to blocked recipients
//! 4. **Undo**: retract a user's most recent send into their undo log
//!
//! ## Routing rules
//!
//! For each recipient, in the order the message lists them: deliver if the
//! recipient is registered and not blocked, otherwise drop. Drops are silent
//! by contract (the sender's call succeeds regardless), but every decision
//! is recorded in the returned [`DeliveryReport`] and logged at debug level.
//!
//! Blocking is evaluated against the recipient id only. `block("alice")`
//! stops alice from *receiving*; it never stops her from sending. Already
//! delivered messages are not retracted.

use std::{collections::HashSet, sync::Arc};

use parley_core::{Clock, Message, Snapshot, SystemClock, User, UserId};

use crate::{error::RegistryError, registry::UserRegistry};

/// What happened to one recipient during routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Appended to the recipient's history
    Delivered,
    /// Recipient is blocked; dropped
    Blocked,
    /// Recipient is not registered; dropped
    UnknownRecipient,
}

/// Per-recipient outcomes of routing one message.
///
/// Entries follow the message's recipient order. An empty report means the
/// message had no recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    entries: Vec<(UserId, DeliveryOutcome)>,
}

impl DeliveryReport {
    /// All outcomes, in recipient order.
    pub fn entries(&self) -> &[(UserId, DeliveryOutcome)] {
        &self.entries
    }

    /// Outcome for a specific recipient, if it was addressed.
    pub fn outcome_for(&self, id: &str) -> Option<DeliveryOutcome> {
        self.entries.iter().find(|(recipient, _)| recipient == id).map(|&(_, outcome)| outcome)
    }

    /// Ids of recipients that actually received the message.
    pub fn delivered(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, outcome)| *outcome == DeliveryOutcome::Delivered)
            .map(|(recipient, _)| recipient.as_str())
    }

    /// Number of successful deliveries.
    pub fn delivered_count(&self) -> usize {
        self.delivered().count()
    }

    /// Whether every addressed recipient received the message.
    ///
    /// Vacuously true for a message with no recipients.
    pub fn all_delivered(&self) -> bool {
        self.entries.iter().all(|(_, outcome)| *outcome == DeliveryOutcome::Delivered)
    }
}

/// The mediator: user registry, block set, and clock.
///
/// Generic over [`Clock`] so tests can run against a hand-advanced clock;
/// production code uses [`ChatServer::new`] and gets the system clock.
#[derive(Debug)]
pub struct ChatServer<C: Clock = SystemClock> {
    /// Registered users, keyed by id
    registry: UserRegistry,
    /// Recipients currently refused delivery
    blocked: HashSet<UserId>,
    /// Timestamp source for outgoing messages
    clock: C,
}

impl ChatServer<SystemClock> {
    /// Create a server stamping messages with wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for ChatServer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ChatServer<C> {
    /// Create a server with an explicit timestamp source.
    pub fn with_clock(clock: C) -> Self {
        Self { registry: UserRegistry::new(), blocked: HashSet::new(), clock }
    }

    /// Register a user, making them reachable as a recipient.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateUser`] if the id is already taken.
    pub fn register(&mut self, user: User) -> Result<(), RegistryError> {
        let id = user.id().to_string();
        self.registry.insert(user)?;
        tracing::info!(user = %id, "registered");
        Ok(())
    }

    /// Unregister a user, returning it with history and undo log intact.
    ///
    /// Silent no-op (`None`) when the id is unknown. Block-set entries are
    /// not purged, and messages already referenced by other histories stay
    /// valid.
    pub fn unregister(&mut self, id: &str) -> Option<User> {
        let user = self.registry.remove(id);
        if user.is_some() {
            tracing::info!(user = %id, "unregistered");
        }
        user
    }

    /// Send a message from `sender` to `recipients`.
    ///
    /// Builds the message (timestamp from the server clock), routes it, then
    /// appends the sender's own copy to the sender's history: the sender
    /// always sees what they sent, whatever happened to delivery.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownUser`] if `sender` is not registered.
    pub fn send(
        &mut self,
        sender: &str,
        recipients: Vec<UserId>,
        content: impl Into<String>,
    ) -> Result<DeliveryReport, RegistryError> {
        if !self.registry.contains(sender) {
            return Err(RegistryError::UnknownUser(sender.to_string()));
        }

        let message = Message::shared(sender, recipients, self.clock.now(), content);
        let report = self.route(&message);

        if let Some(user) = self.registry.get_mut(sender) {
            user.receive(Arc::clone(&message));
        }

        Ok(report)
    }

    /// Route a message to each of its recipients.
    ///
    /// Delivery appends a shared reference to the recipient's history.
    /// Unknown and blocked recipients are dropped without error; the report
    /// records every per-recipient decision.
    pub fn route(&mut self, message: &Arc<Message>) -> DeliveryReport {
        let mut entries = Vec::with_capacity(message.recipients().len());

        for recipient in message.recipients() {
            let outcome = if self.blocked.contains(recipient) {
                tracing::debug!(sender = %message.sender(), %recipient, "recipient blocked, dropping");
                DeliveryOutcome::Blocked
            } else if let Some(user) = self.registry.get_mut(recipient) {
                user.receive(Arc::clone(message));
                tracing::debug!(sender = %message.sender(), %recipient, "delivered");
                DeliveryOutcome::Delivered
            } else {
                tracing::debug!(sender = %message.sender(), %recipient, "recipient not registered, dropping");
                DeliveryOutcome::UnknownRecipient
            };
            entries.push((recipient.clone(), outcome));
        }

        DeliveryReport { entries }
    }

    /// Stop messages from reaching `id`.
    ///
    /// Idempotent; the id need not be registered. Affects only future
    /// routing; nothing already delivered is retracted.
    pub fn block(&mut self, id: impl Into<UserId>) {
        let id = id.into();
        if self.blocked.insert(id.clone()) {
            tracing::info!(user = %id, "blocking delivery");
        }
    }

    /// Undo `id`'s most recent send.
    ///
    /// Removes the newest message authored by the user from their own
    /// history only and records a snapshot in their undo log. `None` when
    /// the user is unknown or has no authored message to retract.
    pub fn undo_last_send(&mut self, id: &str) -> Option<Snapshot> {
        let snapshot = self.registry.get_mut(id)?.undo_last_send().cloned();
        if snapshot.is_some() {
            tracing::debug!(user = %id, "undid last send");
        }
        snapshot
    }

    /// Look up a registered user.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.registry.get(id)
    }

    /// Whether delivery to `id` is currently suppressed.
    pub fn is_blocked(&self, id: &str) -> bool {
        self.blocked.contains(id)
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of blocked recipient ids.
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }
}
