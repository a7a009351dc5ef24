//! Parley chat mediator.
//!
//! Users never talk to each other directly: every message goes through the
//! [`ChatServer`], which owns the user registry and the block set, stamps
//! outgoing messages with its [`Clock`](parley_core::Clock), and fans
//! deliveries out to recipient histories.
//!
//! # Architecture
//!
//! - [`UserRegistry`]: id-to-user map, uniqueness enforced at insertion
//! - [`ChatServer`]: registration, routing, blocking, undo
//! - [`DeliveryReport`]: per-recipient routing outcomes
//!
//! # Delivery semantics
//!
//! Routing never fails. A recipient that is unknown or blocked is silently
//! skipped; the sender's call succeeds either way and the sender's own
//! history always gets a copy of the outgoing message. The only surfaced
//! signal is the [`DeliveryReport`], which records what happened to each
//! recipient without turning any of it into an error.
//!
//! Blocking is keyed on the *recipient*: blocking `X` stops messages from
//! reaching `X`, it does not mute `X` as a sender. It affects only future
//! routing; messages already delivered stay where they are.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod registry;
mod server;

pub use error::RegistryError;
pub use registry::UserRegistry;
pub use server::{ChatServer, DeliveryOutcome, DeliveryReport};
