//! Cheermote format and result types

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Format
// ============================================================================

/// The background a cheermote is shown on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheermoteBackground {
    #[default]
    Dark,
    Light,
}

/// Whether the cheermote is animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheermoteState {
    #[default]
    Animated,
    Static,
}

/// Image scale, usually the pixel density of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CheermoteScale {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "1.5")]
    OneAndHalf,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
}

impl CheermoteBackground {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl CheermoteState {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Animated => "animated",
            Self::Static => "static",
        }
    }
}

impl CheermoteScale {
    /// Wire name, also the key in the image map
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::OneAndHalf => "1.5",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
        }
    }
}

impl FromStr for CheermoteBackground {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(Error::cheermote(format!("unknown background '{other}'"))),
        }
    }
}

impl FromStr for CheermoteState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animated" => Ok(Self::Animated),
            "static" => Ok(Self::Static),
            other => Err(Error::cheermote(format!("unknown state '{other}'"))),
        }
    }
}

impl FromStr for CheermoteScale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::One),
            "1.5" => Ok(Self::OneAndHalf),
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            "4" => Ok(Self::Four),
            other => Err(Error::cheermote(format!("unknown scale '{other}'"))),
        }
    }
}

impl fmt::Display for CheermoteScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The format cheermote images are requested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CheermoteFormat {
    /// Desired background
    pub background: CheermoteBackground,
    /// Desired animation state
    pub state: CheermoteState,
    /// Desired scale
    pub scale: CheermoteScale,
}

impl CheermoteFormat {
    /// Create a format
    pub fn new(
        background: CheermoteBackground,
        state: CheermoteState,
        scale: CheermoteScale,
    ) -> Self {
        Self {
            background,
            state,
            scale,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// How a cheermote should be displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheermoteDisplayInfo {
    /// Image URL
    pub url: String,
    /// Hex color for the amount, e.g. `#9c3ee8`
    pub color: String,
}

/// A cheermote found in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCheermote {
    /// Lowercased cheermote name
    pub name: String,
    /// Bits cheered
    pub amount: u64,
    /// Zero-based position in code points
    pub position: usize,
    /// Length of the match in the text
    pub length: usize,
    /// Resolved image and color
    pub display_info: CheermoteDisplayInfo,
}

/// A piece of a transformed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart<'a, R> {
    /// Literal text between cheermotes
    Text(&'a str),
    /// A rendered cheermote and the text it replaced
    Cheermote {
        /// The matched text, e.g. `Cheer100`
        source: &'a str,
        /// Output of the render function
        rendered: R,
    },
}

impl<'a, R> MessagePart<'a, R> {
    /// The original text this part covers
    pub fn source(&self) -> &'a str {
        match self {
            Self::Text(text) => *text,
            Self::Cheermote { source, .. } => *source,
        }
    }

    /// The rendered cheermote, if this part is one
    pub fn rendered(&self) -> Option<&R> {
        match self {
            Self::Text(_) => None,
            Self::Cheermote { rendered, .. } => Some(rendered),
        }
    }
}
