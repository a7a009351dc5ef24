//! Parley protocol core: value types and per-user state.
//!
//! This crate holds everything the mediator routes and stores, with no I/O
//! and no global state:
//!
//! - [`Message`]: immutable chat utterance, shared between histories via
//!   `Arc` rather than copied
//! - [`Snapshot`] / [`UndoLog`]: append-only record of undone sends
//! - [`ChatHistory`] / [`UserMessages`]: ordered message store with lazy
//!   user-scoped iteration
//! - [`User`]: a participant's identity, history, and undo log
//! - [`Clock`]: time abstraction for deterministic testing
//!
//! The mediator itself (registry, routing, blocking) lives in
//! `parley-server`.

pub mod clock;
pub mod history;
pub mod message;
pub mod snapshot;
pub mod user;

pub use clock::{Clock, ManualClock, SystemClock};
pub use history::{ChatHistory, UserMessages};
pub use message::{Message, Timestamp, UserId};
pub use snapshot::{Snapshot, UndoLog};
pub use user::User;
