//! Reactive state containers.
//!
//! A [`Store`] holds one value behind a lock, replaces it wholesale on every
//! mutation and notifies its subscribers with the new value.

mod store;

pub use store::{Store, SubscriptionId};
