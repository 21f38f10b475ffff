//! Channel subscription endpoints

use crate::error::{Error, Result};
use crate::http::{Caller, RawPage};
use crate::pagination::{PaginatedRequest, PaginatedRequestWithTotal, PaginatedResultWithTotal};
use crate::request::{ForwardPagination, RequestDescriptor};
use crate::types::{decode_json, JsonValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Scope needed to list a broadcaster's subscribers
pub const SCOPE_CHANNEL_SUBSCRIPTIONS: &str = "channel:read:subscriptions";

/// Scope needed to check a user's own subscription
pub const SCOPE_USER_SUBSCRIPTIONS: &str = "user:read:subscriptions";

const SUBSCRIPTIONS_ENDPOINT: &str = "subscriptions";
const USER_SUBSCRIPTION_ENDPOINT: &str = "subscriptions/user";

/// A subscription to a broadcaster, as seen by the broadcaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    #[serde(default)]
    pub gifter_id: Option<String>,
    #[serde(default)]
    pub gifter_login: Option<String>,
    #[serde(default)]
    pub gifter_name: Option<String>,
    #[serde(default)]
    pub is_gift: bool,
    #[serde(default)]
    pub plan_name: String,
    /// `1000`, `2000` or `3000`
    pub tier: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}

impl Subscription {
    /// The gifter's ID, empty strings count as absent
    pub fn gifter_id(&self) -> Option<&str> {
        self.gifter_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A subscription as seen by the subscribed user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    #[serde(default)]
    pub gifter_id: Option<String>,
    #[serde(default)]
    pub gifter_login: Option<String>,
    #[serde(default)]
    pub gifter_name: Option<String>,
    #[serde(default)]
    pub is_gift: bool,
    pub tier: String,
}

/// One page of subscriptions plus the broadcaster's subscriber points
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionsPage {
    /// Subscriptions on this page
    pub data: Vec<Subscription>,
    /// Cursor for the following page, if any
    pub cursor: Option<String>,
    /// Total number of subscriptions
    pub total: u64,
    /// Subscriber points of the broadcaster
    pub points: u64,
}

/// Subscription endpoints
#[derive(Clone)]
pub struct SubscriptionApi {
    caller: Arc<dyn Caller>,
}

impl SubscriptionApi {
    /// Create the API group over a caller
    pub fn new(caller: Arc<dyn Caller>) -> Self {
        Self { caller }
    }

    fn listing(broadcaster_id: &str) -> RequestDescriptor {
        RequestDescriptor::get(SUBSCRIPTIONS_ENDPOINT)
            .scope(SCOPE_CHANNEL_SUBSCRIPTIONS)
            .query("broadcaster_id", broadcaster_id)
    }

    /// Fetch one page of a broadcaster's subscriptions
    pub async fn get_subscriptions(
        &self,
        broadcaster_id: &str,
        pagination: &ForwardPagination,
    ) -> Result<SubscriptionsPage> {
        let request = pagination.apply(Self::listing(broadcaster_id));
        let body = self.caller.call(&request).await?;

        let points = match body.get("points") {
            None | Some(JsonValue::Null) => 0,
            Some(value) => value.as_u64().ok_or_else(|| {
                Error::malformed(format!("'points' must be a non-negative integer, got {value}"))
            })?,
        };

        let PaginatedResultWithTotal {
            data,
            cursor,
            total,
        } = PaginatedResultWithTotal::from_raw(RawPage::from_json(body)?, decode_json)?;

        Ok(SubscriptionsPage {
            data,
            cursor,
            total,
            points,
        })
    }

    /// Page through all of a broadcaster's subscriptions
    pub fn get_subscriptions_paginated(
        &self,
        broadcaster_id: &str,
    ) -> Result<PaginatedRequestWithTotal<Subscription>> {
        PaginatedRequest::with_total(Self::listing(broadcaster_id), Arc::clone(&self.caller))
    }

    /// Fetch the subscriptions of specific users to a broadcaster
    ///
    /// Users that are not subscribed are simply missing from the result.
    pub async fn get_subscriptions_for_users<I, S>(
        &self,
        broadcaster_id: &str,
        user_ids: I,
    ) -> Result<Vec<Subscription>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = Self::listing(broadcaster_id).query_multi("user_id", user_ids);
        let page = RawPage::from_json(self.caller.call(&request).await?)?;
        page.data.into_iter().map(decode_json).collect()
    }

    /// Fetch the subscription of a single user to a broadcaster
    pub async fn get_subscription_for_user(
        &self,
        broadcaster_id: &str,
        user_id: &str,
    ) -> Result<Option<Subscription>> {
        let list = self
            .get_subscriptions_for_users(broadcaster_id, [user_id])
            .await?;
        Ok(list.into_iter().next())
    }

    /// Check whether a user is subscribed to a broadcaster, from the user's side
    ///
    /// The server answers 404 when there is no subscription; that comes back as `None`.
    pub async fn check_user_subscription(
        &self,
        user_id: &str,
        broadcaster_id: &str,
    ) -> Result<Option<UserSubscription>> {
        let request = RequestDescriptor::get(USER_SUBSCRIPTION_ENDPOINT)
            .scope(SCOPE_USER_SUBSCRIPTIONS)
            .query("broadcaster_id", broadcaster_id)
            .query("user_id", user_id);

        let body = match self.caller.call(&request).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                debug!(user_id, broadcaster_id, "User is not subscribed");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let page = RawPage::from_json(body)?;
        page.data.into_iter().next().map(decode_json).transpose()
    }
}

impl std::fmt::Debug for SubscriptionApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionApi").finish_non_exhaustive()
    }
}
