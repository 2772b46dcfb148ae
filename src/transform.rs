//! Declarative per-year data transforms.
//!
//! A constrained, named operation set applied to each year's entries before
//! indexing. Transforms are data, not code: they deserialize from a JSON
//! array, so a transform file travels with the data file. The result is
//! re-validated by [`crate::index::YearIndex::build`], which re-checks
//! identity uniqueness and rank positivity.

use serde::{Deserialize, Serialize};

use crate::entry::RankEntry;

/// One named transform operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transform {
    /// Multiply every share by a constant factor.
    ScaleShare {
        /// Multiplier applied to each entry's share.
        factor: f32,
    },
    /// Rename one category to another.
    RenameCategory {
        /// Category to replace.
        from: String,
        /// Replacement category.
        to: String,
    },
    /// Keep only entries in the given categories.
    FilterCategory {
        /// Categories to keep.
        keep: Vec<String>,
    },
    /// Remove one identity from every year.
    DropIdentity {
        /// Identity to remove.
        identity: String,
    },
    /// Discard entries ranked beyond a cutoff.
    LimitRank {
        /// Largest rank kept.
        max: u32,
    },
}

impl Transform {
    /// Apply this operation to one year's entries in place.
    pub fn apply(&self, entries: &mut Vec<RankEntry>) {
        match self {
            Self::ScaleShare { factor } => {
                for entry in entries.iter_mut() {
                    entry.share *= factor;
                }
            }
            Self::RenameCategory { from, to } => {
                for entry in entries.iter_mut() {
                    if entry.category == *from {
                        entry.category.clone_from(to);
                    }
                }
            }
            Self::FilterCategory { keep } => {
                entries.retain(|e| keep.iter().any(|k| k == &e.category));
            }
            Self::DropIdentity { identity } => {
                entries.retain(|e| e.identity != *identity);
            }
            Self::LimitRank { max } => {
                entries.retain(|e| e.rank <= *max);
            }
        }
    }
}

/// Apply a transform sequence to one year's entries, in order.
pub fn apply_all(transforms: &[Transform], entries: &mut Vec<RankEntry>) {
    for transform in transforms {
        transform.apply(entries);
    }
}

/// Parse a transform sequence from its JSON representation.
///
/// # Errors
///
/// Returns a JSON error for malformed input or unknown operation names.
pub fn parse(json: &str) -> crate::error::Result<Vec<Transform>> {
    Ok(serde_json::from_str(json)?)
}
