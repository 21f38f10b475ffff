//! Cheermote module
//!
//! Parses cheermotes (`Cheer100`, `Kappa50`, ...) out of chat messages.
//!
//! # Overview
//!
//! The scanner is a pure function of the message, a [`CheermoteCatalog`]
//! and a [`CheermoteFormat`]. It reports positions in code points, and its
//! transform mode splits a message into literal runs and rendered
//! cheermotes without ever cutting a multi-byte character.
//!
//! [`HelixCheermoteList`] is the catalog built from the API's
//! `bits/cheermotes` response.

mod catalog;
mod list;
mod scanner;
mod types;

pub use catalog::CheermoteCatalog;
pub use list::{
    CheermoteData, CheermoteImageSet, CheermoteImages, CheermoteScaleMap, CheermoteTier,
    CheermoteType, HelixCheermoteList,
};
pub use scanner::{parse_message, transform_message};
pub use types::{
    CheermoteBackground, CheermoteDisplayInfo, CheermoteFormat, CheermoteScale, CheermoteState,
    MessageCheermote, MessagePart,
};
