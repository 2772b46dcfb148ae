//! Year-over-year transition classification.
//!
//! Matches the top-N of two years by identity and classifies each item's
//! movement. The output order fixes the vertical order drawn later: all of
//! the current year's top-N in current-rank order, then the previous-only
//! identities in previous-rank order.

use crate::index::YearIndex;

/// How an identity moved between the two displayed years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// In both years' top-N.
    Continuing,
    /// In the current top-N only.
    NewEntry,
    /// In the previous top-N only.
    DroppedOut,
}

/// The classified movement record for one identity.
///
/// Exactly one of `previous_rank` / `current_rank` is `None` for
/// `NewEntry` / `DroppedOut`; both are set for `Continuing`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Cross-year matching key.
    pub identity: String,
    /// Category of the entry (current year's when present, else previous).
    pub category: String,
    /// The previous year's category, when the item was present there. Items
    /// occasionally get re-categorized between years, which shows up as a
    /// gradient on the flow curve.
    pub previous_category: Option<String>,
    /// Rank in the previous year's top-N.
    pub previous_rank: Option<u32>,
    /// Rank in the current year's top-N.
    pub current_rank: Option<u32>,
    /// The off-side rank outside the top-N window, when the item still
    /// exists there: the current-year rank of a dropped item, or the
    /// previous-year rank of a new entry.
    pub overflow_rank: Option<u32>,
    /// Rank two years back, recorded for new entries only when the direct
    /// previous-year overflow lookup failed.
    pub two_back_rank: Option<u32>,
    /// Share driving connector thickness (current year's when present,
    /// else previous).
    pub share: f32,
    /// Signed rank movement (previous - current) from full-index ranks,
    /// positive when the item moved up.
    pub rank_change: Option<i32>,
    /// Classified movement.
    pub state: TransitionState,
}

/// Classify every identity in `top-N(previous) ∪ top-N(current)`.
///
/// Each identity in the union appears exactly once; nothing else appears.
/// An identity present in both raw lists but beyond the cutoff on one side
/// is classified by top-N membership only, so a rank 1 → rank 15 move with
/// a cutoff of 10 is a drop-out carrying overflow rank 15.
///
/// Missing `two_back` silently skips the secondary indicator lookup.
#[must_use]
pub fn classify(
    previous: &YearIndex,
    current: &YearIndex,
    two_back: Option<&YearIndex>,
) -> Vec<Transition> {
    let mut transitions = Vec::with_capacity(previous.top().len() + current.top().len());

    for entry in current.top() {
        let identity = entry.identity.as_str();
        if previous.in_top(identity) {
            let prev = previous.lookup(identity);
            let prev_rank = prev.map(|e| e.rank).unwrap_or(entry.rank);
            transitions.push(Transition {
                identity: entry.identity.clone(),
                category: entry.category.clone(),
                previous_category: prev.map(|e| e.category.clone()),
                previous_rank: Some(prev_rank),
                current_rank: Some(entry.rank),
                overflow_rank: None,
                two_back_rank: None,
                share: entry.share,
                rank_change: Some(prev_rank as i32 - entry.rank as i32),
                state: TransitionState::Continuing,
            });
        } else {
            let prev = previous.lookup(identity);
            let overflow = prev.map(|e| e.rank);
            let two_back_rank = if overflow.is_none() {
                two_back.and_then(|idx| idx.lookup(identity)).map(|e| e.rank)
            } else {
                None
            };
            transitions.push(Transition {
                identity: entry.identity.clone(),
                category: entry.category.clone(),
                previous_category: prev.map(|e| e.category.clone()),
                previous_rank: None,
                current_rank: Some(entry.rank),
                overflow_rank: overflow,
                two_back_rank,
                share: entry.share,
                rank_change: overflow.map(|prev| prev as i32 - entry.rank as i32),
                state: TransitionState::NewEntry,
            });
        }
    }

    for entry in previous.top() {
        let identity = entry.identity.as_str();
        if current.in_top(identity) {
            continue;
        }
        let overflow = current.lookup(identity).map(|e| e.rank);
        transitions.push(Transition {
            identity: entry.identity.clone(),
            category: entry.category.clone(),
            previous_category: Some(entry.category.clone()),
            previous_rank: Some(entry.rank),
            current_rank: None,
            overflow_rank: overflow,
            two_back_rank: None,
            share: entry.share,
            rank_change: overflow.map(|curr| entry.rank as i32 - curr as i32),
            state: TransitionState::DroppedOut,
        });
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RankEntry;

    fn year(pairs: &[(u32, &str)]) -> Vec<RankEntry> {
        pairs
            .iter()
            .map(|&(rank, identity)| RankEntry::new(rank, identity, "Group A", 10.0))
            .collect()
    }

    fn index(pairs: &[(u32, &str)], max_entries: u32) -> YearIndex {
        YearIndex::build(&year(pairs), max_entries).unwrap()
    }

    #[test]
    fn test_scenario_swap_drop_enter() {
        let previous = index(&[(1, "X"), (2, "Y"), (3, "Z")], 3);
        let current = index(&[(1, "Y"), (2, "X"), (3, "W")], 3);

        let transitions = classify(&previous, &current, None);
        assert_eq!(transitions.len(), 4);

        let by_identity = |name: &str| {
            transitions
                .iter()
                .find(|t| t.identity == name)
                .expect("identity should be classified")
        };

        let x = by_identity("X");
        assert_eq!(x.state, TransitionState::Continuing);
        assert_eq!((x.previous_rank, x.current_rank), (Some(1), Some(2)));
        assert_eq!(x.rank_change, Some(-1));

        let y = by_identity("Y");
        assert_eq!(y.state, TransitionState::Continuing);
        assert_eq!((y.previous_rank, y.current_rank), (Some(2), Some(1)));
        assert_eq!(y.rank_change, Some(1));

        let z = by_identity("Z");
        assert_eq!(z.state, TransitionState::DroppedOut);
        assert_eq!((z.previous_rank, z.current_rank), (Some(3), None));
        assert_eq!(z.overflow_rank, None);

        let w = by_identity("W");
        assert_eq!(w.state, TransitionState::NewEntry);
        assert_eq!((w.previous_rank, w.current_rank), (None, Some(3)));
    }

    #[test]
    fn test_dropped_item_carries_overflow_rank() {
        let previous = index(&[(1, "X"), (2, "Y"), (3, "Z")], 3);
        let current = index(&[(1, "Y"), (2, "X"), (3, "W"), (15, "Z")], 3);

        let transitions = classify(&previous, &current, None);
        let z = transitions.iter().find(|t| t.identity == "Z").unwrap();
        assert_eq!(z.state, TransitionState::DroppedOut);
        assert_eq!(z.overflow_rank, Some(15));
        assert_eq!(z.rank_change, Some(-12));
    }

    #[test]
    fn test_new_entry_overflow_and_two_back() {
        let previous = index(&[(1, "A"), (12, "B")], 10);
        let current = index(&[(1, "A"), (2, "B"), (3, "C")], 10);
        let two_back = index(&[(4, "C")], 10);

        let transitions = classify(&previous, &current, Some(&two_back));

        let b = transitions.iter().find(|t| t.identity == "B").unwrap();
        assert_eq!(b.state, TransitionState::NewEntry);
        assert_eq!(b.overflow_rank, Some(12));
        // Direct overflow found, so the two-back indicator stays unset
        assert_eq!(b.two_back_rank, None);

        let c = transitions.iter().find(|t| t.identity == "C").unwrap();
        assert_eq!(c.state, TransitionState::NewEntry);
        assert_eq!(c.overflow_rank, None);
        assert_eq!(c.two_back_rank, Some(4));
    }

    #[test]
    fn test_rank_beyond_cutoff_is_membership_not_presence() {
        // Ranked 1 last year, 15 this year, cutoff 10: a drop-out.
        let previous = index(&[(1, "A"), (2, "B")], 10);
        let current = index(&[(1, "B"), (15, "A")], 10);

        let transitions = classify(&previous, &current, None);
        let a = transitions.iter().find(|t| t.identity == "A").unwrap();
        assert_eq!(a.state, TransitionState::DroppedOut);
        assert_eq!(a.overflow_rank, Some(15));
    }

    #[test]
    fn test_output_order_current_first_then_previous_only() {
        let previous = index(&[(1, "P1"), (2, "P2"), (3, "C2")], 3);
        let current = index(&[(1, "C1"), (2, "C2")], 3);

        let transitions = classify(&previous, &current, None);
        let order: Vec<&str> = transitions.iter().map(|t| t.identity.as_str()).collect();
        assert_eq!(order, vec!["C1", "C2", "P1", "P2"]);
    }

    #[test]
    fn test_max_entries_one() {
        let previous = index(&[(1, "A")], 1);
        let current = index(&[(1, "A")], 1);

        let transitions = classify(&previous, &current, None);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].state, TransitionState::Continuing);
    }

    #[test]
    fn test_union_completeness_and_exclusivity() {
        let previous = index(&[(1, "A"), (2, "B"), (3, "C")], 3);
        let current = index(&[(1, "B"), (2, "D"), (3, "E")], 3);

        let transitions = classify(&previous, &current, None);
        let mut identities: Vec<&str> =
            transitions.iter().map(|t| t.identity.as_str()).collect();
        identities.sort_unstable();
        assert_eq!(identities, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_recategorized_item_keeps_both_categories() {
        let previous =
            YearIndex::build(&[RankEntry::new(1, "A", "Group B", 5.0)], 10).unwrap();
        let current =
            YearIndex::build(&[RankEntry::new(1, "A", "Group C", 5.0)], 10).unwrap();

        let transitions = classify(&previous, &current, None);
        assert_eq!(transitions[0].category, "Group C");
        assert_eq!(transitions[0].previous_category.as_deref(), Some("Group B"));
    }

    #[test]
    fn test_conservation_counts() {
        let previous = index(&[(1, "A"), (2, "B"), (3, "C")], 3);
        let current = index(&[(1, "B"), (2, "D"), (3, "E")], 3);

        let transitions = classify(&previous, &current, None);
        let count = |state: TransitionState| {
            transitions.iter().filter(|t| t.state == state).count()
        };

        assert_eq!(
            count(TransitionState::Continuing) + count(TransitionState::DroppedOut),
            previous.top().len()
        );
        assert_eq!(
            count(TransitionState::Continuing) + count(TransitionState::NewEntry),
            current.top().len()
        );
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::entry::RankEntry;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// One year's worth of entries: unique identities, unique ranks in 1..40.
    fn year_strategy() -> impl Strategy<Value = Vec<RankEntry>> {
        prop::collection::hash_set((1u32..40, 0u8..30), 0..20).prop_map(|pairs| {
            let mut seen_ranks = HashSet::new();
            let mut seen_ids = HashSet::new();
            pairs
                .into_iter()
                .filter(|&(rank, id)| seen_ranks.insert(rank) && seen_ids.insert(id))
                .map(|(rank, id)| {
                    RankEntry::new(rank, format!("item{id:02}"), format!("cat{}", id % 5), 1.0)
                })
                .collect()
        })
    }

    fn top_identities(index: &YearIndex) -> HashSet<String> {
        index.top().iter().map(|e| e.identity.clone()).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// The transition identity set is exactly top-N(prev) ∪ top-N(curr).
        #[test]
        fn prop_completeness(
            previous in year_strategy(),
            current in year_strategy(),
            max_entries in 1u32..15
        ) {
            let prev = YearIndex::build(&previous, max_entries).unwrap();
            let curr = YearIndex::build(&current, max_entries).unwrap();
            let transitions = classify(&prev, &curr, None);

            let classified: HashSet<String> =
                transitions.iter().map(|t| t.identity.clone()).collect();
            let mut expected = top_identities(&prev);
            expected.extend(top_identities(&curr));

            prop_assert_eq!(classified, expected);
        }

        /// No identity is classified twice.
        #[test]
        fn prop_exclusivity(
            previous in year_strategy(),
            current in year_strategy(),
            max_entries in 1u32..15
        ) {
            let prev = YearIndex::build(&previous, max_entries).unwrap();
            let curr = YearIndex::build(&current, max_entries).unwrap();
            let transitions = classify(&prev, &curr, None);

            let unique: HashSet<&str> =
                transitions.iter().map(|t| t.identity.as_str()).collect();
            prop_assert_eq!(unique.len(), transitions.len());
        }

        /// Continuing + dropped covers the previous top-N; continuing + new
        /// covers the current top-N.
        #[test]
        fn prop_conservation(
            previous in year_strategy(),
            current in year_strategy(),
            max_entries in 1u32..15
        ) {
            let prev = YearIndex::build(&previous, max_entries).unwrap();
            let curr = YearIndex::build(&current, max_entries).unwrap();
            let transitions = classify(&prev, &curr, None);

            let count = |state: TransitionState| {
                transitions.iter().filter(|t| t.state == state).count()
            };
            prop_assert_eq!(
                count(TransitionState::Continuing) + count(TransitionState::DroppedOut),
                prev.top().len()
            );
            prop_assert_eq!(
                count(TransitionState::Continuing) + count(TransitionState::NewEntry),
                curr.top().len()
            );
        }

        /// Classification is a pure function of its inputs.
        #[test]
        fn prop_deterministic(
            previous in year_strategy(),
            current in year_strategy(),
            max_entries in 1u32..15
        ) {
            let prev = YearIndex::build(&previous, max_entries).unwrap();
            let curr = YearIndex::build(&current, max_entries).unwrap();

            prop_assert_eq!(
                classify(&prev, &curr, None),
                classify(&prev, &curr, None)
            );
        }
    }
}
