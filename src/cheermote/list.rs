//! Cheermote catalog backed by the Helix `bits/cheermotes` payload

use super::catalog::CheermoteCatalog;
use super::types::{CheermoteBackground, CheermoteDisplayInfo, CheermoteFormat, CheermoteState};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Where a cheermote comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheermoteType {
    GlobalFirstParty,
    GlobalThirdParty,
    ChannelCustom,
    DisplayOnly,
    Sponsored,
    #[serde(other)]
    Unknown,
}

/// Image URLs keyed by scale (`"1"`, `"1.5"`, ...)
pub type CheermoteScaleMap = HashMap<String, String>;

/// Animated and static images for one background
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheermoteImageSet {
    #[serde(default)]
    pub animated: CheermoteScaleMap,
    #[serde(default, rename = "static")]
    pub still: CheermoteScaleMap,
}

/// Images for both backgrounds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheermoteImages {
    #[serde(default)]
    pub dark: CheermoteImageSet,
    #[serde(default)]
    pub light: CheermoteImageSet,
}

impl CheermoteImages {
    /// Look up the image for a format
    pub fn url(&self, format: &CheermoteFormat) -> Option<&str> {
        let set = match format.background {
            CheermoteBackground::Dark => &self.dark,
            CheermoteBackground::Light => &self.light,
        };
        let scales = match format.state {
            CheermoteState::Animated => &set.animated,
            CheermoteState::Static => &set.still,
        };
        scales.get(format.scale.as_str()).map(String::as_str)
    }
}

/// One tier of a cheermote, e.g. the 100-bit gem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheermoteTier {
    /// Minimum bits for this tier
    pub min_bits: u64,
    #[serde(default)]
    pub id: String,
    /// Hex color
    pub color: String,
    pub images: CheermoteImages,
    #[serde(default)]
    pub can_cheer: bool,
    #[serde(default)]
    pub show_in_bits_card: bool,
}

/// A cheermote definition as sent by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheermoteData {
    /// Name as typed in chat, e.g. `Cheer`
    pub prefix: String,
    pub tiers: Vec<CheermoteTier>,
    #[serde(rename = "type")]
    pub kind: Option<CheermoteType>,
    #[serde(default)]
    pub order: u32,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_charitable: bool,
}

/// The cheermotes available in a channel (or globally)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelixCheermoteList {
    cheermotes: BTreeMap<String, CheermoteData>,
}

impl HelixCheermoteList {
    /// Build a list from decoded definitions
    pub fn new(data: Vec<CheermoteData>) -> Self {
        let cheermotes = data
            .into_iter()
            .map(|cheermote| (cheermote.prefix.to_lowercase(), cheermote))
            .collect();
        Self { cheermotes }
    }

    /// Build a list from the `data` array of a cheermotes response
    pub fn from_json(data: JsonValue) -> Result<Self> {
        let data: Vec<CheermoteData> = serde_json::from_value(data)
            .map_err(|e| Error::decode(format!("Invalid cheermote data: {e}")))?;
        Ok(Self::new(data))
    }

    /// Look up a definition by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&CheermoteData> {
        self.cheermotes.get(&name.to_lowercase())
    }

    /// Number of cheermotes
    pub fn len(&self) -> usize {
        self.cheermotes.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.cheermotes.is_empty()
    }

    /// Iterate over all definitions, ordered by lowercased name
    pub fn iter(&self) -> impl Iterator<Item = &CheermoteData> {
        self.cheermotes.values()
    }
}

impl CheermoteCatalog for HelixCheermoteList {
    fn possible_names(&self) -> Vec<String> {
        self.cheermotes.keys().cloned().collect()
    }

    fn display_info(
        &self,
        name: &str,
        bits: u64,
        format: &CheermoteFormat,
    ) -> Result<CheermoteDisplayInfo> {
        let cheermote = self
            .get(name)
            .ok_or_else(|| Error::cheermote(format!("cheermote '{name}' does not exist")))?;

        let tier = cheermote
            .tiers
            .iter()
            .filter(|tier| tier.min_bits <= bits)
            .max_by_key(|tier| tier.min_bits)
            .ok_or_else(|| {
                Error::cheermote(format!(
                    "cheermote '{name}' has no tier for {bits} bits"
                ))
            })?;

        let url = tier.images.url(format).ok_or_else(|| {
            Error::cheermote(format!(
                "cheermote '{name}' has no {} {} image at scale {}",
                format.background.as_str(),
                format.state.as_str(),
                format.scale
            ))
        })?;

        Ok(CheermoteDisplayInfo {
            url: url.to_string(),
            color: tier.color.clone(),
        })
    }
}
