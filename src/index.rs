//! Per-year index: identity lookup plus the ordered top-N view.

use std::collections::HashMap;

use crate::entry::RankEntry;
use crate::error::{Error, Result};

/// Immutable per-year view of a ranking.
///
/// Holds every entry for full-index overflow lookups, and the ordered
/// subsequence with `rank <= max_entries` that the chart actually draws.
/// Built once per year and read-only thereafter.
#[derive(Debug, Clone)]
pub struct YearIndex {
    by_identity: HashMap<String, RankEntry>,
    top: Vec<RankEntry>,
    max_entries: u32,
}

impl YearIndex {
    /// Build an index from one year's entries.
    ///
    /// The top-N view is sorted by rank ascending; the sort is stable, so
    /// entries that tie on rank keep their input order.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateIdentity`] if two entries share an identity.
    /// - [`Error::InvalidRank`] if any rank is below 1.
    pub fn build(entries: &[RankEntry], max_entries: u32) -> Result<Self> {
        let mut by_identity = HashMap::with_capacity(entries.len());
        for entry in entries {
            if entry.rank == 0 {
                return Err(Error::InvalidRank {
                    identity: entry.identity.clone(),
                    rank: entry.rank,
                });
            }
            if by_identity
                .insert(entry.identity.clone(), entry.clone())
                .is_some()
            {
                return Err(Error::DuplicateIdentity {
                    identity: entry.identity.clone(),
                });
            }
        }

        let mut top: Vec<RankEntry> = entries
            .iter()
            .filter(|e| e.rank <= max_entries)
            .cloned()
            .collect();
        top.sort_by_key(|e| e.rank);

        Ok(Self {
            by_identity,
            top,
            max_entries,
        })
    }

    /// Look up an entry by identity across the full year, not just top-N.
    #[must_use]
    pub fn lookup(&self, identity: &str) -> Option<&RankEntry> {
        self.by_identity.get(identity)
    }

    /// Whether the identity falls inside the top-N view.
    #[must_use]
    pub fn in_top(&self, identity: &str) -> bool {
        self.by_identity
            .get(identity)
            .is_some_and(|e| e.rank <= self.max_entries)
    }

    /// The ordered top-N entries (rank ascending).
    #[must_use]
    pub fn top(&self) -> &[RankEntry] {
        &self.top
    }

    /// The configured top-N cutoff.
    #[must_use]
    pub fn max_entries(&self) -> u32 {
        self.max_entries
    }

    /// Total number of entries in the year, including overflow.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    /// Whether the year has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn entry(rank: u32, identity: &str) -> RankEntry {
        RankEntry::new(rank, identity, "Group A", 10.0)
    }

    #[test]
    fn test_build_orders_top_by_rank() {
        let entries = vec![entry(3, "c"), entry(1, "a"), entry(2, "b")];
        let index = YearIndex::build(&entries, 10).unwrap();

        let ranks: Vec<u32> = index.top().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_build_excludes_overflow_from_top() {
        let entries = vec![entry(1, "a"), entry(2, "b"), entry(15, "z")];
        let index = YearIndex::build(&entries, 10).unwrap();

        assert_eq!(index.top().len(), 2);
        assert!(!index.in_top("z"));
        // Still reachable through the full lookup
        assert_eq!(index.lookup("z").map(|e| e.rank), Some(15));
    }

    #[test]
    fn test_build_duplicate_identity_fails() {
        let entries = vec![entry(1, "x"), entry(5, "x")];
        let err = YearIndex::build(&entries, 10).unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentity { identity } if identity == "x"));
    }

    #[test]
    fn test_build_zero_rank_fails() {
        let entries = vec![entry(0, "a")];
        let err = YearIndex::build(&entries, 10).unwrap_err();
        assert!(matches!(err, Error::InvalidRank { rank: 0, .. }));
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let entries = vec![
            RankEntry::new(2, "first", "Group A", 1.0),
            RankEntry::new(2, "second", "Group A", 1.0),
            RankEntry::new(1, "top", "Group A", 1.0),
        ];
        let index = YearIndex::build(&entries, 10).unwrap();

        let names: Vec<&str> = index.top().iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_empty_year() {
        let index = YearIndex::build(&[], 10).unwrap();
        assert!(index.is_empty());
        assert!(index.top().is_empty());
        assert!(index.lookup("anything").is_none());
    }
}
