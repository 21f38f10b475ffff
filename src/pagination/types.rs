//! Pagination types
//!
//! Defines the cursor state machine and the knobs of the total-aware variant.

use crate::error::Result;
use crate::http::RawPage;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Where a paginated request stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorState {
    /// No page has been requested yet
    #[default]
    Fresh,
    /// At least one page was fetched; the next one starts at this cursor
    InProgress(String),
    /// No further pages will be requested
    Exhausted,
}

impl CursorState {
    /// Check if no further pages will be requested
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The cursor the next request will carry
    pub fn cursor(&self) -> Option<&str> {
        match self {
            Self::InProgress(cursor) => Some(cursor),
            _ => None,
        }
    }
}

/// What to do when the server reports a total below what was already fetched
///
/// Totals are a snapshot of the server's count at the time of each call,
/// so they can shrink while a listing is being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleTotalPolicy {
    /// Any total at or below the fetched count ends the listing
    #[default]
    Stop,
    /// Ignore a total that is already below the records fetched before the
    /// page that reported it, and let the cursor decide
    FollowCursor,
}

/// Whether the engine watches the server-reported total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalTracking {
    /// Plain cursor pagination
    #[default]
    Disabled,
    /// Total-aware pagination with the given stale-total policy
    Enabled(StaleTotalPolicy),
}

impl TotalTracking {
    /// Check if totals are tracked
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// One decoded page from a single-page call
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    /// Decoded records
    pub data: Vec<T>,
    /// Cursor for the following page, if any
    pub cursor: Option<String>,
}

impl<T> PaginatedResult<T> {
    /// Decode a raw page
    pub fn from_raw<F>(page: RawPage, decode: F) -> Result<Self>
    where
        F: Fn(JsonValue) -> Result<T>,
    {
        Ok(Self {
            data: page.data.into_iter().map(decode).collect::<Result<_>>()?,
            cursor: page.cursor,
        })
    }
}

/// One decoded page from a single-page call on a total-aware endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResultWithTotal<T> {
    /// Decoded records
    pub data: Vec<T>,
    /// Cursor for the following page, if any
    pub cursor: Option<String>,
    /// Server-reported total (0 when the server left it out)
    pub total: u64,
}

impl<T> PaginatedResultWithTotal<T> {
    /// Decode a raw page
    pub fn from_raw<F>(page: RawPage, decode: F) -> Result<Self>
    where
        F: Fn(JsonValue) -> Result<T>,
    {
        let total = page.total.unwrap_or(0);
        let PaginatedResult { data, cursor } = PaginatedResult::from_raw(page, decode)?;
        Ok(Self {
            data,
            cursor,
            total,
        })
    }
}
