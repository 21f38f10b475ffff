//! Pagination module
//!
//! Supports: cursor pagination, with or without a server-reported total
//!
//! # Overview
//!
//! A [`PaginatedRequest`] is a small state machine
//! (`Fresh` -> `InProgress(cursor)` -> `Exhausted`) driven by two
//! operations, fetching the next page and draining the rest. The only
//! suspension point is the [`Caller`](crate::http::Caller) invocation.
//!
//! The total-aware variant is the same machine with one extra stop
//! condition: once the decoded record count reaches the last reported
//! total, no further page is requested even if a cursor came back.

mod paginator;
mod types;

pub use paginator::{PaginatedRequest, PaginatedRequestWithTotal};
pub use types::{
    CursorState, PaginatedResult, PaginatedResultWithTotal, StaleTotalPolicy, TotalTracking,
};
