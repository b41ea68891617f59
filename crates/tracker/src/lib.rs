//! Progress tracking service.
//!
//! The tracker owns a storage backend and applies activity awards to the
//! active user record: points, level derivation, resource access checks,
//! observer notification, and domain-event publication.

#![warn(missing_docs)]

pub mod tracker;
pub mod notify;
pub mod events;

pub use tracker::{ProgressTracker, Result, TrackerError};
pub use notify::{NoopNotifier, Notifier, TerminalNotifier};
pub use events::EventBus;
