//! The catalog seam the scanner resolves cheermotes against

use super::scanner;
use super::types::{CheermoteDisplayInfo, CheermoteFormat, MessageCheermote, MessagePart};
use crate::error::Result;

/// A source of known cheermotes
///
/// Implementations may change between calls (a broadcaster's custom set
/// can be reloaded), so the scanner never caches anything it gets here.
pub trait CheermoteCatalog {
    /// Every cheermote name this catalog knows
    fn possible_names(&self) -> Vec<String>;

    /// How a cheer of `bits` with the given name should be displayed
    fn display_info(
        &self,
        name: &str,
        bits: u64,
        format: &CheermoteFormat,
    ) -> Result<CheermoteDisplayInfo>;

    /// Parse all cheermotes out of a message
    fn parse_message(
        &self,
        message: &str,
        format: &CheermoteFormat,
    ) -> Result<Vec<MessageCheermote>> {
        scanner::parse_message(message, self, format)
    }

    /// Split a message into literal text and rendered cheermotes
    fn transform_message<'a, R, F>(
        &self,
        message: &'a str,
        format: &CheermoteFormat,
        render: F,
    ) -> Result<Vec<MessagePart<'a, R>>>
    where
        Self: Sized,
        F: FnMut(&MessageCheermote) -> R,
    {
        scanner::transform_message(message, self, format, render)
    }
}
