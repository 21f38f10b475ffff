// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # helix-kit
//!
//! Client core for the Twitch Helix REST API.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Walk `after`-cursor listings page by page, or drain them
//! - **Total-Aware Listings**: Stop as soon as the server-reported total is reached
//! - **Cheermote Scanning**: Find `Cheer100`-style tokens in chat messages
//! - **Pluggable Transport**: Everything talks to a [`http::Caller`], `reqwest` by default
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use helix_kit::{api::ApiClient, config::ClientConfig, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientConfig::from_file("helix.yaml")?.apply_env().build_client()?;
//!     let api = ApiClient::new(Arc::new(client));
//!
//!     let mut subs = api.subscriptions().get_subscriptions_paginated("141981764")?;
//!     while !subs.is_exhausted() {
//!         for sub in subs.get_next_page().await? {
//!             println!("{} ({})", sub.user_name, sub.tier);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │              API groups (subscriptions, bits)             │
//! └───────────────────────────────────────────────────────────┘
//!               │                               │
//! ┌─────────────┴─────────────┐   ┌─────────────┴─────────────┐
//! │  Pagination               │   │  Cheermotes               │
//! │  Fresh -> InProgress ->   │   │  catalog + scanner        │
//! │  Exhausted, total-aware   │   │  parse / transform        │
//! └─────────────┬─────────────┘   └───────────────────────────┘
//!               │
//! ┌─────────────┴─────────────┐
//! │  Caller (HTTP transport)  │
//! └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request descriptors
pub mod request;

/// Caller seam and HTTP transport
pub mod http;

/// Cursor pagination engine
pub mod pagination;

/// Cheermote catalog and message scanner
pub mod cheermote;

/// API groups
pub mod api;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::ApiClient;
pub use cheermote::{CheermoteCatalog, CheermoteFormat, HelixCheermoteList, MessageCheermote};
pub use config::ClientConfig;
pub use http::{Caller, HttpClient, HttpClientConfig};
pub use pagination::{PaginatedRequest, PaginatedRequestWithTotal, StaleTotalPolicy};
pub use request::RequestDescriptor;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
