//! Bits endpoints: leaderboard and cheermotes

use crate::cheermote::HelixCheermoteList;
use crate::error::Result;
use crate::http::{Caller, RawPage};
use crate::request::RequestDescriptor;
use crate::types::{decode_json, JsonValue};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SCOPE_BITS_READ: &str = "bits:read";

/// Time window of a bits leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardPeriod {
    Day,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl LeaderboardPeriod {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

/// Filters for the bits leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardQuery {
    /// Number of entries, 1 to 100
    pub count: u32,
    pub period: LeaderboardPeriod,
    /// Start of the period; ignored by the server for `all`
    pub started_at: Option<DateTime<Utc>>,
    /// Center the leaderboard on this user
    pub user_id: Option<String>,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            count: 10,
            period: LeaderboardPeriod::All,
            started_at: None,
            user_id: None,
        }
    }
}

impl LeaderboardQuery {
    /// Describe the leaderboard request these filters produce
    pub fn to_request(&self) -> RequestDescriptor {
        RequestDescriptor::get("bits/leaderboard")
            .scope(SCOPE_BITS_READ)
            .query("count", self.count.to_string())
            .query("period", self.period.as_str())
            .query_opt(
                "started_at",
                self.started_at
                    .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            )
            .query_opt("user_id", self.user_id.clone())
    }
}

/// One ranked user on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsLeaderboardEntry {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub rank: u32,
    /// Bits cheered in the period
    pub score: u64,
}

/// Period a leaderboard covers, empty for `all`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub ended_at: String,
}

/// A bits leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsLeaderboard {
    #[serde(rename = "data")]
    pub entries: Vec<BitsLeaderboardEntry>,
    /// Number of users on the leaderboard
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub date_range: DateRange,
}

/// Bits endpoints
#[derive(Clone)]
pub struct BitsApi {
    caller: Arc<dyn Caller>,
}

impl BitsApi {
    /// Create the API group over a caller
    pub fn new(caller: Arc<dyn Caller>) -> Self {
        Self { caller }
    }

    /// Fetch the bits leaderboard of the authenticated broadcaster
    pub async fn get_leaderboard(&self, query: &LeaderboardQuery) -> Result<BitsLeaderboard> {
        let body = self.caller.call(&query.to_request()).await?;
        decode_json(body)
    }

    /// Fetch the cheermotes available in a channel, or the global set
    pub async fn get_cheermotes(&self, broadcaster_id: Option<&str>) -> Result<HelixCheermoteList> {
        let request =
            RequestDescriptor::get("bits/cheermotes").query_opt("broadcaster_id", broadcaster_id);
        let page = RawPage::from_json(self.caller.call(&request).await?)?;
        HelixCheermoteList::from_json(JsonValue::Array(page.data))
    }
}

impl std::fmt::Debug for BitsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitsApi").finish_non_exhaustive()
    }
}
