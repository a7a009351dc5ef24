//! Mediator error types.
//!
//! The error surface is deliberately small. Registration collisions and
//! sends from an unknown sender are the only conditions that reach the
//! caller as errors; everything "missing" on the receiving side (unknown
//! recipient, unregistering an absent user, undo with nothing to undo) is a
//! silent no-op by contract.

use parley_core::UserId;
use thiserror::Error;

/// Errors from registry-backed mediator operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A user with this id is already registered
    #[error("user already registered: {0}")]
    DuplicateUser(UserId),

    /// The acting user (a message's sender) is not registered
    #[error("user not registered: {0}")]
    UnknownUser(UserId),
}
