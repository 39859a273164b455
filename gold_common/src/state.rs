//! Mutable application state shared by all handlers.
//!
//! `AppState` owns the exchange rate and the subscription registry. Each
//! field sits behind its own `Mutex`; concurrent writers race and the last
//! write wins.

use std::sync::Mutex;

use crate::result::Result;
use crate::subscription::{SubscriptionRegistry, UserId};

/// Exchange rate (dinar per USD) and subscribers.
#[derive(Debug)]
pub struct AppState {
    exchange_rate: Mutex<f64>,
    subscribers: Mutex<SubscriptionRegistry>,
}

impl AppState {
    /// Create state with the initial `exchange_rate` and no subscribers.
    pub fn new(exchange_rate: f64) -> Self {
        Self {
            exchange_rate: Mutex::new(exchange_rate),
            subscribers: Mutex::new(SubscriptionRegistry::new()),
        }
    }

    /// Current exchange rate.
    pub fn exchange_rate(&self) -> Result<f64> {
        Ok(*self.exchange_rate.lock()?)
    }

    /// Replace the exchange rate.
    pub fn set_exchange_rate(&self, rate: f64) -> Result<()> {
        *self.exchange_rate.lock()? = rate;
        Ok(())
    }

    /// Add `user` to the subscribers.
    pub fn subscribe(&self, user: UserId) -> Result<()> {
        self.subscribers.lock()?.subscribe(user);
        Ok(())
    }

    /// Remove `user` from the subscribers.
    pub fn unsubscribe(&self, user: UserId) -> Result<()> {
        self.subscribers.lock()?.unsubscribe(user);
        Ok(())
    }

    /// Whether `user` is subscribed.
    pub fn is_subscribed(&self, user: UserId) -> Result<bool> {
        Ok(self.subscribers.lock()?.is_subscribed(user))
    }

    /// Number of subscribers.
    pub fn subscriber_count(&self) -> Result<usize> {
        Ok(self.subscribers.lock()?.len())
    }
}
