//! API groups
//!
//! Thin resource wrappers over a [`Caller`]. Each group describes its
//! endpoints as [`RequestDescriptor`](crate::request::RequestDescriptor)s and turns the raw records into
//! typed values; paginated listings are handed to the pagination engine.
//!
//! # Groups
//!
//! - [`SubscriptionApi`] - channel subscriptions (total-aware listing)
//! - [`BitsApi`] - bits leaderboard and cheermotes

mod bits;
mod subscriptions;

pub use bits::{
    BitsApi, BitsLeaderboard, BitsLeaderboardEntry, DateRange, LeaderboardPeriod,
    LeaderboardQuery,
};
pub use subscriptions::{
    Subscription, SubscriptionApi, SubscriptionsPage, UserSubscription,
    SCOPE_CHANNEL_SUBSCRIPTIONS, SCOPE_USER_SUBSCRIPTIONS,
};

use crate::http::Caller;
use std::sync::Arc;

/// Entry point to all API groups
#[derive(Clone)]
pub struct ApiClient {
    caller: Arc<dyn Caller>,
}

impl ApiClient {
    /// Create a client over any caller
    pub fn new(caller: Arc<dyn Caller>) -> Self {
        Self { caller }
    }

    /// The caller requests go through
    pub fn caller(&self) -> Arc<dyn Caller> {
        Arc::clone(&self.caller)
    }

    /// Subscription endpoints
    pub fn subscriptions(&self) -> SubscriptionApi {
        SubscriptionApi::new(self.caller())
    }

    /// Bits endpoints
    pub fn bits(&self) -> BitsApi {
        BitsApi::new(self.caller())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
