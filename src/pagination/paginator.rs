//! Cursor pagination engine
//!
//! [`PaginatedRequest`] walks a cursor-returning endpoint page by page.
//! The state only moves forward: a page's cursor is committed after the
//! page was fetched and every record decoded, so a failed or dropped fetch
//! leaves the request exactly where it was.

use super::types::{CursorState, StaleTotalPolicy, TotalTracking};
use crate::error::{Error, Result};
use crate::http::{Caller, RawPage};
use crate::request::{RequestDescriptor, CURSOR_PARAM, LIMIT_PARAM};
use crate::types::{decode_json, JsonValue};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

type Decoder<T> = Box<dyn Fn(JsonValue) -> Result<T> + Send + Sync>;

/// A lazily advancing, single-shot sequence of decoded records
///
/// Every method that fetches takes `&mut self`, so one instance cannot be
/// driven from two places at once. Use one instance per consumer.
pub struct PaginatedRequest<T> {
    descriptor: RequestDescriptor,
    caller: Arc<dyn Caller>,
    decode: Decoder<T>,
    tracking: TotalTracking,
    state: CursorState,
    fetched: u64,
    total: Option<u64>,
}

/// A [`PaginatedRequest`] that watches the server-reported total
///
/// Build one with [`PaginatedRequest::with_total`].
pub type PaginatedRequestWithTotal<T> = PaginatedRequest<T>;

impl<T: DeserializeOwned + 'static> PaginatedRequest<T> {
    /// Create a cursor-paginated request decoding records with serde
    pub fn new(descriptor: RequestDescriptor, caller: Arc<dyn Caller>) -> Result<Self> {
        Self::with_decoder(descriptor, caller, decode_json::<T>)
    }

    /// Create a total-aware request decoding records with serde
    pub fn with_total(descriptor: RequestDescriptor, caller: Arc<dyn Caller>) -> Result<Self> {
        Ok(Self::new(descriptor, caller)?.track_total(StaleTotalPolicy::default()))
    }
}

impl<T> PaginatedRequest<T> {
    /// Create a cursor-paginated request with a custom record decoder
    ///
    /// The descriptor must not carry the cursor parameter itself.
    pub fn with_decoder<F>(
        descriptor: RequestDescriptor,
        caller: Arc<dyn Caller>,
        decode: F,
    ) -> Result<Self>
    where
        F: Fn(JsonValue) -> Result<T> + Send + Sync + 'static,
    {
        if descriptor.has_query(CURSOR_PARAM) {
            return Err(Error::invalid_request(format!(
                "query for '{}' must not set '{CURSOR_PARAM}', the paginator places the cursor",
                descriptor.endpoint
            )));
        }

        Ok(Self {
            descriptor,
            caller,
            decode: Box::new(decode),
            tracking: TotalTracking::Disabled,
            state: CursorState::Fresh,
            fetched: 0,
            total: None,
        })
    }

    /// Enable total tracking with the given stale-total policy
    #[must_use]
    pub fn track_total(mut self, policy: StaleTotalPolicy) -> Self {
        self.tracking = TotalTracking::Enabled(policy);
        self
    }

    /// The request this sequence pages through
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Current cursor state
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Check if no further pages will be requested
    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }

    /// Number of records decoded so far
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Most recent total reported by the server
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Fetch and decode the next page
    ///
    /// Returns an empty list without touching the network once the
    /// sequence is exhausted.
    pub async fn get_next_page(&mut self) -> Result<Vec<T>> {
        let cursor = match &self.state {
            CursorState::Exhausted => return Ok(Vec::new()),
            CursorState::Fresh => None,
            CursorState::InProgress(cursor) => Some(cursor.clone()),
        };

        let page = self
            .caller
            .fetch_page(&self.descriptor, cursor.as_deref())
            .await?;

        debug!(
            "page from '{}': cursor={:?} records={} next={:?} total={:?}",
            self.descriptor.endpoint,
            cursor,
            page.data.len(),
            page.cursor,
            page.total
        );

        let RawPage {
            data,
            cursor: next_cursor,
            total,
        } = page;

        let records = data
            .into_iter()
            .map(|raw| (self.decode)(raw))
            .collect::<Result<Vec<_>>>()?;

        // Commit only after the whole page decoded
        let fetched_before = self.fetched;
        self.fetched += records.len() as u64;
        if self.tracking.is_enabled() && total.is_some() {
            self.total = total;
        }
        self.state = self.next_state(next_cursor, records.is_empty(), fetched_before);

        Ok(records)
    }

    /// Fetch every remaining record
    ///
    /// Starts from wherever earlier [`get_next_page`](Self::get_next_page)
    /// calls left off.
    pub async fn get_all(&mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while !self.state.is_exhausted() {
            let page = self.get_next_page().await?;
            all.extend(page);
        }
        Ok(all)
    }

    /// The total count of matching records
    ///
    /// Returns the last known total; before any total was seen it issues a
    /// one-record request that leaves the cursor untouched. `None` means the
    /// endpoint does not report totals. The answer is only remembered when
    /// total tracking is enabled, so [`total`](Self::total) stays `None` on a
    /// plain cursor listing.
    pub async fn total_count(&mut self) -> Result<Option<u64>> {
        if self.total.is_some() {
            return Ok(self.total);
        }

        let sample = self.descriptor.clone().query(LIMIT_PARAM, "1");
        let page = self.caller.fetch_page(&sample, None).await?;
        if self.tracking.is_enabled() && page.total.is_some() {
            self.total = page.total;
        }
        Ok(page.total)
    }

    /// Turn the request into a lazy stream of records
    ///
    /// A page is fetched only when the records of the previous one have
    /// been consumed. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send
    where
        T: Send + 'static,
    {
        stream::unfold(
            (self, VecDeque::new(), false),
            |(mut pager, mut buffer, failed)| async move {
                if failed {
                    return None;
                }
                loop {
                    if let Some(record) = buffer.pop_front() {
                        return Some((Ok(record), (pager, buffer, false)));
                    }
                    if pager.is_exhausted() {
                        return None;
                    }
                    match pager.get_next_page().await {
                        Ok(page) => buffer.extend(page),
                        Err(e) => return Some((Err(e), (pager, buffer, true))),
                    }
                }
            },
        )
    }

    fn next_state(
        &self,
        cursor: Option<String>,
        page_empty: bool,
        fetched_before: u64,
    ) -> CursorState {
        // An empty page can't move the listing forward
        if page_empty {
            return CursorState::Exhausted;
        }

        if let TotalTracking::Enabled(policy) = self.tracking {
            if self.has_reached_known_total(policy, fetched_before) {
                return CursorState::Exhausted;
            }
        }

        match cursor {
            Some(cursor) => CursorState::InProgress(cursor),
            None => CursorState::Exhausted,
        }
    }

    fn has_reached_known_total(&self, policy: StaleTotalPolicy, fetched_before: u64) -> bool {
        let Some(total) = self.total else {
            return false;
        };

        if self.fetched < total {
            return false;
        }

        match policy {
            StaleTotalPolicy::Stop => true,
            StaleTotalPolicy::FollowCursor => total >= fetched_before,
        }
    }
}

impl<T> std::fmt::Debug for PaginatedRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedRequest")
            .field("descriptor", &self.descriptor)
            .field("tracking", &self.tracking)
            .field("state", &self.state)
            .field("fetched", &self.fetched)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
