//! Request description module
//!
//! A [`RequestDescriptor`] is an immutable description of one fetchable
//! endpoint: where it lives, the base query, an optional body and the
//! permission scope the caller needs. The pagination engine only ever
//! derives new descriptors from it (to place the cursor), it never mutates
//! the one it was handed.

mod types;

pub use types::{ForwardPagination, QueryValue, RequestDescriptor, CURSOR_PARAM, LIMIT_PARAM};
