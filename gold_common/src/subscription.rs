//! In-memory registry of subscribed users.
//!
//! Membership is recorded and queried, nothing more: no notification is ever
//! pushed to the registered users. The set lives only as long as the process.
//!
//! The registry is not synchronized; `AppState` wraps it in a `Mutex` when it
//! is shared between handlers.

use std::collections::HashSet;

/// Opaque user identifier supplied by the chat platform.
pub type UserId = i64;

/// Set of users that asked to subscribe.
#[derive(Debug, Default, Clone)]
pub struct SubscriptionRegistry {
    users: HashSet<UserId>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `user`. Subscribing twice is the same as once.
    pub fn subscribe(&mut self, user: UserId) {
        self.users.insert(user);
    }

    /// Remove `user`. Removing a non-member does nothing.
    pub fn unsubscribe(&mut self, user: UserId) {
        self.users.remove(&user);
    }

    /// Whether `user` is currently subscribed.
    pub fn is_subscribed(&self, user: UserId) -> bool {
        self.users.contains(&user)
    }

    /// Number of subscribed users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
