//! User registry.
//!
//! The registry is an explicit object owned by the mediator; there is no
//! ambient map of users anywhere. It owns the [`User`] values themselves:
//! registering hands the user over, unregistering hands it back. Id
//! uniqueness is enforced at insertion and nowhere else.

use std::collections::HashMap;

use parley_core::{User, UserId};

use crate::error::RegistryError;

/// Id-to-user map with uniqueness enforced at insertion.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<UserId, User>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateUser`] if the id is already taken;
    /// the existing user is left untouched.
    pub fn insert(&mut self, user: User) -> Result<(), RegistryError> {
        if self.users.contains_key(user.id()) {
            return Err(RegistryError::DuplicateUser(user.id().to_string()));
        }
        self.users.insert(user.id().to_string(), user);
        Ok(())
    }

    /// Remove a user, returning it with history and undo log intact.
    ///
    /// `None` when no such user is registered. Shared message references held
    /// by other histories remain valid after removal.
    pub fn remove(&mut self, id: &str) -> Option<User> {
        self.users.remove(id)
    }

    /// Look up a user by id.
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Look up a user by id for mutation (delivery, undo).
    pub fn get_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    /// Whether a user with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate over registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }
}
