//! HTTP module
//!
//! Provides the [`Caller`] seam used by the pagination engine and the
//! `reqwest`-backed [`HttpClient`] that implements it.
//!
//! # Features
//!
//! - **Caller trait**: execute a [`RequestDescriptor`](crate::request::RequestDescriptor), get JSON back
//! - **Page envelope**: [`RawPage`] parsing of `data` / `pagination` / `total`
//! - **Static credentials**: Client-Id and bearer token headers
//! - **Error classification**: status codes become [`Error::HttpStatus`](crate::Error::HttpStatus)

mod caller;
mod client;

pub use caller::{Caller, RawPage};
pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
