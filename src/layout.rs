//! Vertical layout for the two ranking columns.
//!
//! Rows are spaced by rank *order*, not numeric rank value, so gaps left by
//! overflow ranks never produce blank rows. Layout is a pure function of the
//! transition sequence and config.

use crate::geometry::Point;
use crate::transition::{Transition, TransitionState};

/// Which of the two displayed columns a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Previous-year column.
    Left,
    /// Current-year column.
    Right,
}

/// A resolved screen position for one identity in one column.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPosition {
    /// Cross-year matching key.
    pub identity: String,
    /// Column the position belongs to.
    pub column: Column,
    /// Anchor point of the row circle or marker.
    pub point: Point,
    /// True for the small out-of-top badge positions, false for full rows.
    pub overflow_marker: bool,
}

/// Geometry configuration for the layout engine.
///
/// All coordinates are in output units with y growing downward.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// X coordinate of the left (previous-year) column anchors.
    pub left_x: f32,
    /// X coordinate of the right (current-year) column anchors.
    pub right_x: f32,
    /// Y coordinate of the first row.
    pub top_y: f32,
    /// Vertical distance between adjacent rows.
    pub row_height: f32,
    /// Horizontal inset of overflow markers from the right column, toward
    /// the center gap.
    pub marker_inset: f32,
    /// Vertical nudge keeping markers off the row baseline: down for
    /// dropped items, up for new entries.
    pub marker_dip: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_x: 250.0,
            right_x: 750.0,
            top_y: 140.0,
            row_height: 60.0,
            marker_inset: 120.0,
            marker_dip: 12.0,
        }
    }
}

/// Assign screen positions to every transition.
///
/// Left-column rows are ordered by `previous_rank` ascending, right-column
/// rows by `current_rank` ascending; each row's y is its 0-based order index
/// times the row height. Dropped items get a right-side overflow marker
/// level with their left row; new entries get a left-side marker level with
/// their right row. Deterministic for identical input.
#[must_use]
pub fn layout(transitions: &[Transition], config: &LayoutConfig) -> Vec<LayoutPosition> {
    let mut positions = Vec::with_capacity(transitions.len() * 2);

    let row_y = |order_index: usize| config.top_y + order_index as f32 * config.row_height;

    let mut left: Vec<(&Transition, u32)> = transitions
        .iter()
        .filter_map(|t| t.previous_rank.map(|rank| (t, rank)))
        .collect();
    left.sort_by_key(|&(_, rank)| rank);

    let mut right: Vec<(&Transition, u32)> = transitions
        .iter()
        .filter_map(|t| t.current_rank.map(|rank| (t, rank)))
        .collect();
    right.sort_by_key(|&(_, rank)| rank);

    let left_y_of = |identity: &str| {
        left.iter()
            .position(|(t, _)| t.identity == identity)
            .map(row_y)
    };
    let right_y_of = |identity: &str| {
        right
            .iter()
            .position(|(t, _)| t.identity == identity)
            .map(row_y)
    };

    for (i, (t, _)) in left.iter().enumerate() {
        positions.push(LayoutPosition {
            identity: t.identity.clone(),
            column: Column::Left,
            point: Point::new(config.left_x, row_y(i)),
            overflow_marker: false,
        });
    }

    for (i, (t, _)) in right.iter().enumerate() {
        positions.push(LayoutPosition {
            identity: t.identity.clone(),
            column: Column::Right,
            point: Point::new(config.right_x, row_y(i)),
            overflow_marker: false,
        });
    }

    for t in transitions {
        match t.state {
            TransitionState::DroppedOut => {
                // Marker sits where the flow line would have landed, pulled
                // in from the right column and nudged below the baseline.
                if let Some(y) = left_y_of(&t.identity) {
                    positions.push(LayoutPosition {
                        identity: t.identity.clone(),
                        column: Column::Right,
                        point: Point::new(
                            config.right_x - config.marker_inset,
                            y + config.marker_dip,
                        ),
                        overflow_marker: true,
                    });
                }
            }
            TransitionState::NewEntry => {
                if let Some(y) = right_y_of(&t.identity) {
                    positions.push(LayoutPosition {
                        identity: t.identity.clone(),
                        column: Column::Left,
                        point: Point::new(
                            config.right_x - config.marker_inset,
                            y - config.marker_dip,
                        ),
                        overflow_marker: true,
                    });
                }
            }
            TransitionState::Continuing => {}
        }
    }

    positions
}

/// Find a non-marker position for an identity in a column.
#[must_use]
pub fn row_position<'a>(
    positions: &'a [LayoutPosition],
    identity: &str,
    column: Column,
) -> Option<&'a LayoutPosition> {
    positions
        .iter()
        .find(|p| p.identity == identity && p.column == column && !p.overflow_marker)
}

/// Find the overflow-marker position for an identity, if any.
#[must_use]
pub fn marker_position<'a>(
    positions: &'a [LayoutPosition],
    identity: &str,
) -> Option<&'a LayoutPosition> {
    positions
        .iter()
        .find(|p| p.identity == identity && p.overflow_marker)
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================
