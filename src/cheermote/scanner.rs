//! Cheermote scanner
//!
//! Finds `<name><amount>` words such as `Cheer100` or `bday2020cheer50` in
//! chat text. A cheermote has to be a whole whitespace-delimited word.
//! Whitespace is the set chat clients split on: ASCII blanks, the Unicode
//! space separators, U+2028/U+2029 and the BOM. U+0085 is not whitespace.
//! Names are ASCII letters with optional embedded digit groups, the amount
//! is the trailing digit run.

use super::catalog::CheermoteCatalog;
use super::types::{CheermoteFormat, MessageCheermote, MessagePart};
use crate::error::Result;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[^\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
    )
    .unwrap()
});

static CHEERMOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+(?:[0-9]+[A-Za-z]+)*)([0-9]+)$").unwrap());

/// A cheermote plus the byte range it covers in the message
struct Found {
    range: Range<usize>,
    cheermote: MessageCheermote,
}

/// Parse all cheermotes out of a message
///
/// The catalog's names are queried on every call. Unknown names are
/// skipped silently; errors only come from resolving display info.
pub fn parse_message<C>(
    message: &str,
    catalog: &C,
    format: &CheermoteFormat,
) -> Result<Vec<MessageCheermote>>
where
    C: CheermoteCatalog + ?Sized,
{
    Ok(scan(message, catalog, format)?
        .into_iter()
        .map(|found| found.cheermote)
        .collect())
}

/// Split a message into literal text and rendered cheermotes
///
/// Concatenating [`MessagePart::source`] over the result gives back the
/// original message.
pub fn transform_message<'a, C, R, F>(
    message: &'a str,
    catalog: &C,
    format: &CheermoteFormat,
    mut render: F,
) -> Result<Vec<MessagePart<'a, R>>>
where
    C: CheermoteCatalog + ?Sized,
    F: FnMut(&MessageCheermote) -> R,
{
    let mut parts = Vec::new();
    let mut current = 0;

    for found in scan(message, catalog, format)? {
        let Range { start, end } = found.range;
        if current < start {
            parts.push(MessagePart::Text(&message[current..start]));
        }
        parts.push(MessagePart::Cheermote {
            source: &message[start..end],
            rendered: render(&found.cheermote),
        });
        current = end;
    }

    if current < message.len() {
        parts.push(MessagePart::Text(&message[current..]));
    }

    Ok(parts)
}

fn scan<C>(message: &str, catalog: &C, format: &CheermoteFormat) -> Result<Vec<Found>>
where
    C: CheermoteCatalog + ?Sized,
{
    let names: HashSet<String> = catalog
        .possible_names()
        .into_iter()
        .map(|name| name.to_lowercase())
        .collect();

    let mut found = Vec::new();
    if names.is_empty() {
        return Ok(found);
    }

    // Code points before `counted_to`, advanced word by word
    let mut counted_to = 0;
    let mut position = 0;

    for word in WORD_REGEX.find_iter(message) {
        let Some(captures) = CHEERMOTE_REGEX.captures(word.as_str()) else {
            continue;
        };

        let name = captures[1].to_ascii_lowercase();
        if !names.contains(&name) {
            continue;
        }

        let Ok(amount) = captures[2].parse::<u64>() else {
            debug!("skipping '{}': amount out of range", word.as_str());
            continue;
        };

        position += message[counted_to..word.start()].chars().count();
        counted_to = word.start();

        let display_info = catalog.display_info(&name, amount, format)?;
        found.push(Found {
            range: word.range(),
            cheermote: MessageCheermote {
                name,
                amount,
                position,
                length: word.len(),
                display_info,
            },
        });
    }

    Ok(found)
}
