//! The per-year data unit: one ranked item.

use serde::{Deserialize, Serialize};

/// One ranked item within a single year.
///
/// `identity` is the cross-year matching key. Ranks start at 1 and need not
/// be contiguous; `share` is the item's percentage of the whole and drives
/// connector thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// Position within the year's ranking (1 = first).
    pub rank: u32,
    /// Cross-year matching key (item or country name).
    #[serde(alias = "item", alias = "country")]
    pub identity: String,
    /// Grouping used for color assignment.
    #[serde(alias = "region", default = "unknown_category")]
    pub category: String,
    /// Share of the whole, as a percentage.
    #[serde(alias = "percentage", alias = "value", default)]
    pub share: f32,
}

fn unknown_category() -> String {
    "Unknown".to_string()
}

impl RankEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(
        rank: u32,
        identity: impl Into<String>,
        category: impl Into<String>,
        share: f32,
    ) -> Self {
        Self {
            rank,
            identity: identity.into(),
            category: category.into(),
            share,
        }
    }
}
