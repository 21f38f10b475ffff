//! Request descriptor types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameter carrying the continuation cursor
pub const CURSOR_PARAM: &str = "after";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "first";

/// A query parameter value, either a single scalar or a list
///
/// Lists are sent as repeated `key=value` pairs (`user_id=1&user_id=2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A single value
    Single(String),
    /// Several values for the same key
    Multiple(Vec<String>),
}

impl QueryValue {
    /// Iterate over every value in this entry
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// Immutable description of one API request
///
/// Every Helix listing is a GET, so the descriptor carries no method or body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Endpoint path relative to the API base URL (e.g. "subscriptions")
    pub endpoint: String,
    /// Base query parameters
    pub query: BTreeMap<String, QueryValue>,
    /// Permission scope the request needs, passed through to the caller
    pub scope: Option<String>,
}

impl RequestDescriptor {
    /// Create a GET descriptor for an endpoint
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: BTreeMap::new(),
            scope: None,
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a multi-valued query parameter
    #[must_use]
    pub fn query_multi<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.query.insert(key.into(), QueryValue::Multiple(values));
        self
    }

    /// Add a query parameter only if a value is present
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<QueryValue>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Set the required permission scope
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Check whether the base query carries the given key
    pub fn has_query(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    /// Derive a copy with the continuation cursor merged into the query
    ///
    /// `None` leaves the query as is.
    pub fn with_cursor(&self, cursor: Option<&str>) -> Self {
        let mut next = self.clone();
        if let Some(cursor) = cursor {
            next.query
                .insert(CURSOR_PARAM.to_string(), QueryValue::Single(cursor.to_string()));
        }
        next
    }

    /// Flatten the query into ordered `(key, value)` pairs
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .flat_map(|(key, value)| value.values().map(move |v| (key.clone(), v.to_string())))
            .collect()
    }
}

/// Forward pagination parameters for single-page calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardPagination {
    /// Cursor returned by a previous page
    pub after: Option<String>,
    /// Maximum number of records on the page
    pub limit: Option<u32>,
}

impl ForwardPagination {
    /// Create empty pagination parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after the given cursor
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Limit the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Merge these parameters into a descriptor
    pub fn apply(&self, descriptor: RequestDescriptor) -> RequestDescriptor {
        descriptor
            .query_opt(CURSOR_PARAM, self.after.clone())
            .query_opt(LIMIT_PARAM, self.limit.map(|l| l.to_string()))
    }
}
