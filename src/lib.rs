//! # rankflow
//!
//! Year-over-year ranking flow charts in pure Rust.
//!
//! rankflow draws the classic two-column "how did the ranking change"
//! chart: ranked items for a previous year on the left, for the current
//! year on the right, joined by flow curves. Items are matched across years
//! by name, movements are classified (continuing, newly entered, dropped
//! out), and items that fall outside the displayed top-N get small overflow
//! indicators instead of full rows.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rankflow::prelude::*;
//!
//! let data = DataSet::from_path("rankings.json")?;
//! RankingChart::new()
//!     .data(data)
//!     .title("Market Share Leaders")
//!     .max_entries(10)
//!     .build()?
//!     .render_to_file("ranking.svg")?;
//! ```
//!
//! ## Pipeline
//!
//! The chart is produced by a pure, single-pass pipeline; every stage is
//! usable on its own for custom renderers:
//!
//! 1. [`index::YearIndex`]: per-year identity lookup and top-N view
//! 2. [`transition::classify`]: year-over-year movement classification
//! 3. [`layout::layout`]: vertical positions for rows and markers
//! 4. [`connector::build_connectors`]: curves, badges, colors, thickness
//!
//! ## Outputs
//!
//! - **SVG**: full vector chart with titles, labels, and legend
//! - **PNG**: rasterized geometry via the built-in framebuffer renderer

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the category palette.
pub mod color;

/// The per-year ranked item model.
pub mod entry;

/// Geometric primitives (points, rectangles, flow curves).
pub mod geometry;

/// Per-year identity index with the top-N view.
pub mod index;

/// Year-over-year transition classification.
pub mod transition;

/// Vertical layout for the two ranking columns.
pub mod layout;

/// Connector geometry: curves, badges, thickness, color.
pub mod connector;

// ============================================================================
// Data Modules
// ============================================================================

/// Year-labelled data sets loaded from JSON.
pub mod data;

/// Declarative per-year data transforms.
pub mod transform;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Rendering primitives and rasterization.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

/// The chart orchestrator.
pub mod chart;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for rankflow operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use rankflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{ChartTheme, RankingChart};
    pub use crate::color::{CategoryPalette, Rgba};
    pub use crate::connector::{
        build_connectors, BadgeKind, BadgeSpec, ConnectorKind, ConnectorSpec, ConnectorStyle,
    };
    pub use crate::data::{DataSet, YearWindow};
    pub use crate::entry::RankEntry;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{CubicBezier, Point, Rect};
    pub use crate::index::YearIndex;
    pub use crate::layout::{layout, Column, LayoutConfig, LayoutPosition};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::transform::Transform;
    pub use crate::transition::{classify, Transition, TransitionState};
}
