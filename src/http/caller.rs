//! The caller seam between the engine and the transport
//!
//! Anything that can turn a [`RequestDescriptor`] into a decoded JSON body
//! is a [`Caller`]. The pagination engine only talks to this trait, which
//! keeps it independent of `reqwest` and easy to drive from tests.

use crate::error::{Error, Result};
use crate::request::RequestDescriptor;
use crate::types::{JsonValue, OptionStringExt};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Executes described requests and returns decoded JSON
#[async_trait]
pub trait Caller: Send + Sync {
    /// Execute a request and return the decoded response body
    async fn call(&self, request: &RequestDescriptor) -> Result<JsonValue>;

    /// Execute one page of a paginated request
    ///
    /// The cursor is merged into a copy of the descriptor; the descriptor
    /// itself is left untouched.
    async fn fetch_page(&self, request: &RequestDescriptor, cursor: Option<&str>) -> Result<RawPage> {
        let body = self.call(&request.with_cursor(cursor)).await?;
        RawPage::from_json(body)
    }
}

#[async_trait]
impl<C: Caller + ?Sized> Caller for Arc<C> {
    async fn call(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        (**self).call(request).await
    }

    async fn fetch_page(&self, request: &RequestDescriptor, cursor: Option<&str>) -> Result<RawPage> {
        (**self).fetch_page(request, cursor).await
    }
}

/// One undecoded page as returned by a paginated endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
    /// Raw records in server order
    pub data: Vec<JsonValue>,
    /// Continuation cursor; `None` means there are no further pages
    pub cursor: Option<String>,
    /// Server-reported total, only on total-aware endpoints
    pub total: Option<u64>,
}

impl RawPage {
    /// Parse the page envelope
    ///
    /// Accepted shape: `{"data": [...], "pagination": {"cursor": "..."}, "total": N}`.
    /// `pagination` may also be a bare cursor string or missing entirely.
    pub fn from_json(body: JsonValue) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Err(Error::malformed("response body is not a JSON object"));
        };

        let data = match map.remove("data") {
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(Error::malformed(format!(
                    "'data' must be an array, got {}",
                    json_kind(&other)
                )))
            }
            None => return Err(Error::malformed("'data' is missing")),
        };

        let cursor = match map.remove("pagination") {
            Some(Value::String(cursor)) => Some(cursor),
            Some(Value::Object(mut pagination)) => match pagination.remove("cursor") {
                Some(Value::String(cursor)) => Some(cursor),
                _ => None,
            },
            _ => None,
        }
        .none_if_empty();

        let total = match map.remove("total") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_u64().ok_or_else(|| {
                Error::malformed(format!("'total' must be a non-negative integer, got {value}"))
            })?),
        };

        Ok(Self {
            data,
            cursor,
            total,
        })
    }

    /// Check whether the page has no records
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
