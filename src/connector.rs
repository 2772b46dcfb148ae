//! Connector geometry: curves, badges, thickness, and color.
//!
//! Consumes the classifier and layout output and produces the drawable
//! primitives the renderer consumes: gradient flow curves between rows,
//! entered/exited curves to overflow markers, and standalone badges for
//! items with no presence on the other side.

use crate::color::{CategoryPalette, Rgba};
use crate::geometry::{CubicBezier, Point};
use crate::layout::{marker_position, row_position, Column, LayoutPosition};
use crate::transition::{Transition, TransitionState};

/// Visual style of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    /// Full row-to-row flow line.
    Normal,
    /// Overflow-marker to current-row line for a new entry.
    Entered,
    /// Previous-row to overflow-marker line for a dropped item.
    Exited,
}

/// Badge text for items without a connector on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    /// Entered the top-N this year.
    New,
    /// Left the top-N entirely.
    Dropped,
}

/// A drawable flow curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorSpec {
    /// Cross-year matching key.
    pub identity: String,
    /// The curve geometry from the left anchor to the right anchor.
    pub curve: CubicBezier,
    /// Gradient color at the left end.
    pub color_from: Rgba,
    /// Gradient color at the right end.
    pub color_to: Rgba,
    /// Stroke thickness in output units.
    pub thickness: f32,
    /// Which kind of movement the curve depicts.
    pub kind: ConnectorKind,
    /// Signed rank movement shown at the curve midpoint, when known.
    pub rank_change: Option<i32>,
}

/// A standalone marker with no flow curve, or the numeric indicator next to
/// an entered/exited curve.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeSpec {
    /// Cross-year matching key.
    pub identity: String,
    /// Anchor point of the badge.
    pub position: Point,
    /// Badge flavor.
    pub kind: BadgeKind,
    /// Color of the small rank circle, when a rank is shown.
    pub color: Rgba,
    /// The off-side rank to print inside the badge circle, if known.
    pub overflow_rank: Option<u32>,
    /// True when `overflow_rank` came from the two-years-back window
    /// rather than the adjacent year.
    pub rank_is_two_back: bool,
}

/// Styling knobs for connector construction.
#[derive(Debug, Clone)]
pub struct ConnectorStyle {
    /// Smallest visible stroke thickness.
    pub min_thickness: f32,
    /// Largest stroke thickness.
    pub max_thickness: f32,
    /// Share units per extra thickness unit above the minimum.
    pub share_divisor: f32,
    /// Cap on the Bezier control-point inward shift.
    pub control_shift_max: f32,
    /// Stroke opacity (0-255) applied to curve colors.
    pub stroke_alpha: u8,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            min_thickness: 6.0,
            max_thickness: 28.0,
            share_divisor: 2.5,
            control_shift_max: 180.0,
            stroke_alpha: 166,
        }
    }
}

impl ConnectorStyle {
    /// Map a share percentage to a stroke thickness.
    ///
    /// Monotonic in `share` and clamped so near-zero shares stay visible.
    #[must_use]
    pub fn thickness_for(&self, share: f32) -> f32 {
        (share.max(0.0) / self.share_divisor + self.min_thickness)
            .clamp(self.min_thickness, self.max_thickness)
    }
}

/// Build the drawable connector and badge sequences.
///
/// Categories are registered with the palette in transition order, which
/// fixes color assignment for a given input order. Continuing items get a
/// row-to-row curve; entered/exited items get a curve to their overflow
/// marker when an off-side rank exists, else a standalone badge.
#[must_use]
pub fn build_connectors(
    transitions: &[Transition],
    positions: &[LayoutPosition],
    style: &ConnectorStyle,
    palette: &mut CategoryPalette,
) -> (Vec<ConnectorSpec>, Vec<BadgeSpec>) {
    let mut connectors = Vec::new();
    let mut badges = Vec::new();

    for t in transitions {
        let color = palette.assign(&t.category).with_alpha(style.stroke_alpha);
        let color_from = t
            .previous_category
            .as_deref()
            .map_or(color, |c| palette.assign(c).with_alpha(style.stroke_alpha));
        let thickness = style.thickness_for(t.share);

        match t.state {
            TransitionState::Continuing => {
                let (Some(from), Some(to)) = (
                    row_position(positions, &t.identity, Column::Left),
                    row_position(positions, &t.identity, Column::Right),
                ) else {
                    continue;
                };
                connectors.push(ConnectorSpec {
                    identity: t.identity.clone(),
                    curve: CubicBezier::flow(from.point, to.point, style.control_shift_max),
                    color_from,
                    color_to: color,
                    thickness,
                    kind: ConnectorKind::Normal,
                    rank_change: t.rank_change,
                });
            }
            TransitionState::NewEntry => {
                let Some(marker) = marker_position(positions, &t.identity) else {
                    continue;
                };
                let shown_rank = t.overflow_rank.or(t.two_back_rank);
                badges.push(BadgeSpec {
                    identity: t.identity.clone(),
                    position: marker.point,
                    kind: BadgeKind::New,
                    color: color.with_alpha(255),
                    overflow_rank: shown_rank,
                    rank_is_two_back: t.overflow_rank.is_none() && t.two_back_rank.is_some(),
                });
                if shown_rank.is_some() {
                    if let Some(to) = row_position(positions, &t.identity, Column::Right) {
                        connectors.push(ConnectorSpec {
                            identity: t.identity.clone(),
                            curve: CubicBezier::flow(
                                marker.point,
                                to.point,
                                style.control_shift_max,
                            ),
                            color_from: color,
                            color_to: color,
                            thickness,
                            kind: ConnectorKind::Entered,
                            rank_change: None,
                        });
                    }
                }
            }
            TransitionState::DroppedOut => {
                let Some(marker) = marker_position(positions, &t.identity) else {
                    continue;
                };
                badges.push(BadgeSpec {
                    identity: t.identity.clone(),
                    position: marker.point,
                    kind: BadgeKind::Dropped,
                    color: color.with_alpha(255),
                    overflow_rank: t.overflow_rank,
                    rank_is_two_back: false,
                });
                if t.overflow_rank.is_some() {
                    if let Some(from) = row_position(positions, &t.identity, Column::Left) {
                        connectors.push(ConnectorSpec {
                            identity: t.identity.clone(),
                            curve: CubicBezier::flow(
                                from.point,
                                marker.point,
                                style.control_shift_max,
                            ),
                            color_from: color,
                            color_to: color,
                            thickness,
                            kind: ConnectorKind::Exited,
                            rank_change: None,
                        });
                    }
                }
            }
        }
    }

    (connectors, badges)
}
