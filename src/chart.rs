//! The year-over-year ranking chart.
//!
//! [`RankingChart`] is the top of the pipeline: it selects the year window
//! from a [`DataSet`], runs index → classify → layout → connectors, and
//! renders the result to a raster framebuffer or an SVG document.

use std::path::Path;

use crate::color::{CategoryPalette, Rgba};
use crate::connector::{
    build_connectors, BadgeKind, BadgeSpec, ConnectorKind, ConnectorSpec, ConnectorStyle,
};
use crate::data::DataSet;
use crate::entry::RankEntry;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::index::YearIndex;
use crate::layout::{layout, row_position, Column, LayoutConfig, LayoutPosition};
use crate::output::{PngEncoder, SvgEncoder, TextAnchor};
use crate::render::{
    blend_circle, draw_circle, draw_circle_outline, draw_curve_gradient, draw_line,
    draw_rect_outline,
};
use crate::transform::{self, Transform};
use crate::transition::classify;

/// Text color for an upward rank move.
const RANK_UP: Rgba = Rgba::rgb(0x18, 0x84, 0x0b);
/// Text color for a downward rank move.
const RANK_DOWN: Rgba = Rgba::rgb(0xb9, 0x1d, 0x1d);
/// Text and border color for a flat rank move.
const RANK_FLAT: Rgba = Rgba::rgb(0x55, 0x55, 0x55);
/// Soft drop shadow under rank circles.
const CIRCLE_SHADOW: Rgba = Rgba::new(0, 0, 0, 21);

/// Visual theme for the chart chrome.
///
/// Every color and radius the renderers use outside the category palette
/// lives here, with defaults matching the chart's established look.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    /// Page background.
    pub background: Rgba,
    /// Content panel fill.
    pub panel_fill: Rgba,
    /// Content panel border.
    pub panel_stroke: Rgba,
    /// Alternating row band fill.
    pub band_fill: Rgba,
    /// Row and column separator lines.
    pub separator: Rgba,
    /// Primary text color.
    pub ink: Rgba,
    /// Secondary text color (subtitle, share values).
    pub muted_ink: Rgba,
    /// Radius of the full-row rank circles.
    pub circle_radius: f32,
    /// Radius of the small overflow-rank circles.
    pub marker_radius: f32,
    /// Category colors; empty list falls back to the base palette.
    pub palette: Vec<Rgba>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(0xf8, 0xf9, 0xfa),
            panel_fill: Rgba::WHITE,
            panel_stroke: Rgba::rgb(0xe5, 0xe5, 0xe5),
            band_fill: Rgba::rgb(0xf5, 0xf7, 0xf9),
            separator: Rgba::rgb(0xdd, 0xdd, 0xdd),
            ink: Rgba::rgb(0x23, 0x23, 0x23),
            muted_ink: Rgba::rgb(0x5a, 0x5a, 0x5a),
            circle_radius: 24.0,
            marker_radius: 12.0,
            palette: Vec::new(),
        }
    }
}

/// Everything one render pass needs, computed once from the builder state.
struct Scene {
    previous_label: String,
    current_label: String,
    left_entries: Vec<RankEntry>,
    right_entries: Vec<RankEntry>,
    positions: Vec<LayoutPosition>,
    connectors: Vec<ConnectorSpec>,
    badges: Vec<BadgeSpec>,
    palette: CategoryPalette,
    categories: Vec<String>,
    rows: u32,
}

/// Builder for the two-column ranking flow chart.
#[derive(Debug, Clone)]
pub struct RankingChart {
    data: DataSet,
    title: String,
    subtitle: Option<String>,
    max_entries: u32,
    width: u32,
    height: u32,
    row_height: f32,
    current_year: Option<String>,
    two_back: Option<String>,
    infer_two_back: bool,
    transforms: Vec<Transform>,
    theme: ChartTheme,
    connector_style: ConnectorStyle,
}

impl Default for RankingChart {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingChart {
    /// Create a new chart builder with default styling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DataSet::default(),
            title: "Top 10 Ranked Items".to_string(),
            subtitle: None,
            max_entries: 10,
            width: 1200,
            height: 1000,
            row_height: 60.0,
            current_year: None,
            two_back: None,
            infer_two_back: false,
            transforms: Vec::new(),
            theme: ChartTheme::default(),
            connector_style: ConnectorStyle::default(),
        }
    }

    /// Set the data set to chart.
    #[must_use]
    pub fn data(mut self, data: DataSet) -> Self {
        self.data = data;
        self
    }

    /// Set the chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the subtitle. The default is generated from the year labels.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the top-N cutoff (default 10).
    ///
    /// The drawn row count also never exceeds the longer of the two year
    /// lists, so a sparse data set produces a compact chart.
    #[must_use]
    pub fn max_entries(mut self, max_entries: u32) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the output dimensions in pixels.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the vertical distance between rows.
    #[must_use]
    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Chart a specific year (with its predecessor on the left) instead of
    /// the latest one.
    #[must_use]
    pub fn current_year(mut self, label: impl Into<String>) -> Self {
        self.current_year = Some(label.into());
        self
    }

    /// Name the year used for the two-years-back indicator on new entries.
    #[must_use]
    pub fn two_back(mut self, label: impl Into<String>) -> Self {
        self.two_back = Some(label.into());
        self
    }

    /// Infer the two-years-back year from the window when the data has at
    /// least three years.
    #[must_use]
    pub fn infer_two_back(mut self, infer: bool) -> Self {
        self.infer_two_back = infer;
        self
    }

    /// Apply a transform sequence to every year before indexing.
    #[must_use]
    pub fn transforms(mut self, transforms: Vec<Transform>) -> Self {
        self.transforms = transforms;
        self
    }

    /// Override the visual theme.
    #[must_use]
    pub fn theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Override the connector styling.
    #[must_use]
    pub fn connector_style(mut self, style: ConnectorStyle) -> Self {
        self.connector_style = style;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero `max_entries` or zero dimensions.
    pub fn build(self) -> Result<Self> {
        if self.max_entries == 0 {
            return Err(Error::Rendering(
                "max entries must be at least 1".to_string(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    fn layout_config(&self) -> LayoutConfig {
        let w = self.width as f32;
        LayoutConfig {
            left_x: w * 0.25,
            right_x: w * 0.75,
            top_y: 140.0,
            row_height: self.row_height,
            marker_inset: w * 0.12,
            marker_dip: 12.0,
        }
    }

    /// Content panel frame wrapped around the ranked rows.
    fn panel_frame(&self, rows_top: f32, rows_bottom: f32) -> Rect {
        let w = self.width as f32;
        Rect::new(
            w * 0.05,
            (rows_top - 30.0).max(0.0),
            w * 0.90,
            rows_bottom - rows_top + 60.0,
        )
    }

    /// Legend container below the rows; `None` when it would not fit.
    fn legend_frame(&self, rows_bottom: f32) -> Option<Rect> {
        let w = self.width as f32;
        let frame = Rect::new(w * 0.05, rows_bottom + 30.0, w * 0.90, 110.0);
        (frame.bottom() <= self.height as f32).then_some(frame)
    }

    /// Run the alignment pipeline for the selected window.
    #[tracing::instrument(skip(self))]
    fn scene(&self) -> Result<Scene> {
        let window = self.data.window(
            self.current_year.as_deref(),
            self.two_back.as_deref(),
            self.infer_two_back,
        )?;

        let mut previous = self.data.year(&window.previous)?.to_vec();
        let mut current = self.data.year(&window.current)?.to_vec();
        let mut two_back = match &window.two_back {
            Some(label) => Some(self.data.year(label)?.to_vec()),
            None => None,
        };

        transform::apply_all(&self.transforms, &mut previous);
        transform::apply_all(&self.transforms, &mut current);
        if let Some(entries) = two_back.as_mut() {
            transform::apply_all(&self.transforms, entries);
        }

        if previous.is_empty() && current.is_empty() {
            return Err(Error::EmptyData);
        }

        // The drawn row count shrinks to the longer year list when the data
        // has fewer entries than the configured cutoff.
        let rows = self
            .max_entries
            .min(previous.len().max(current.len()) as u32)
            .max(1);

        let previous_index = YearIndex::build(&previous, rows)?;
        let current_index = YearIndex::build(&current, rows)?;
        let two_back_index = two_back
            .as_deref()
            .map(|entries| YearIndex::build(entries, rows))
            .transpose()?;

        let transitions = classify(&previous_index, &current_index, two_back_index.as_ref());
        let positions = layout(&transitions, &self.layout_config());

        let mut palette = CategoryPalette::with_colors(self.theme.palette.clone());
        let (connectors, badges) =
            build_connectors(&transitions, &positions, &self.connector_style, &mut palette);
        tracing::debug!(
            transitions = transitions.len(),
            connectors = connectors.len(),
            badges = badges.len(),
            "alignment pipeline complete"
        );

        let mut categories: Vec<String> = Vec::new();
        for t in &transitions {
            if !categories.contains(&t.category) {
                categories.push(t.category.clone());
            }
            if let Some(prev) = &t.previous_category {
                if !categories.contains(prev) {
                    categories.push(prev.clone());
                }
            }
        }

        Ok(Scene {
            previous_label: window.previous,
            current_label: window.current,
            left_entries: previous_index.top().to_vec(),
            right_entries: current_index.top().to_vec(),
            positions,
            connectors,
            badges,
            palette,
            categories,
            rows,
        })
    }

    /// Render to a new framebuffer.
    ///
    /// Raster output carries the full geometry (panel, bands, circles, flow
    /// curves, markers, legend swatches) without text.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid data or dimensions.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let scene = self.scene()?;
        let cfg = self.layout_config();
        let theme = &self.theme;

        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(theme.background);

        let rows_top = cfg.top_y - cfg.row_height / 2.0;
        let rows_bottom = cfg.top_y + (scene.rows as f32 - 0.5) * cfg.row_height;
        let panel = self.panel_frame(rows_top, rows_bottom);

        fb.fill_rect(
            panel.x as u32,
            panel.y as u32,
            panel.width as u32,
            panel.height as u32,
            theme.panel_fill,
        );
        draw_rect_outline(
            &mut fb,
            panel.x as i32,
            panel.y as i32,
            panel.width as u32,
            panel.height as u32,
            theme.panel_stroke,
            1,
        );

        for i in (0..scene.rows).step_by(2) {
            let y = cfg.top_y + (i as f32 - 0.5) * cfg.row_height;
            fb.fill_rect(
                panel.x as u32,
                y.max(0.0) as u32,
                panel.width as u32,
                cfg.row_height as u32,
                theme.band_fill,
            );
        }

        for i in 1..scene.rows {
            let y = (cfg.top_y + (i as f32 - 0.5) * cfg.row_height) as i32;
            draw_line(
                &mut fb,
                panel.x as i32,
                y,
                panel.right() as i32,
                y,
                theme.separator,
            );
        }

        let center_x = (self.width / 2) as i32;
        draw_line(
            &mut fb,
            center_x,
            rows_top as i32,
            center_x,
            rows_bottom as i32,
            theme.separator,
        );

        for connector in &scene.connectors {
            draw_curve_gradient(
                &mut fb,
                &connector.curve,
                connector.color_from,
                connector.color_to,
                connector.thickness,
            );
        }

        for connector in &scene.connectors {
            if connector.kind != ConnectorKind::Normal || connector.rank_change.is_none() {
                continue;
            }
            let mid = connector.curve.midpoint();
            draw_circle(&mut fb, mid.x as i32, mid.y as i32, 14, Rgba::WHITE);
            draw_circle_outline(&mut fb, mid.x as i32, mid.y as i32, 14, RANK_FLAT);
        }

        for badge in &scene.badges {
            let (x, y) = (badge.position.x as i32, badge.position.y as i32);
            let radius = theme.marker_radius as i32;
            if badge.overflow_rank.is_some() {
                draw_circle(&mut fb, x, y, radius, badge.color);
                draw_circle_outline(&mut fb, x, y, radius, Rgba::WHITE);
            } else {
                draw_circle_outline(&mut fb, x, y, radius, badge.color);
            }
        }

        for (entries, column) in [
            (&scene.left_entries, Column::Left),
            (&scene.right_entries, Column::Right),
        ] {
            for entry in entries.iter() {
                let Some(pos) = row_position(&scene.positions, &entry.identity, column) else {
                    continue;
                };
                let color = scene.palette.color_of(&entry.category);
                let (x, y) = (pos.point.x as i32, pos.point.y as i32);
                blend_circle(&mut fb, x + 2, y + 2, theme.circle_radius as i32, CIRCLE_SHADOW);
                draw_circle(&mut fb, x, y, theme.circle_radius as i32, color);
                draw_circle_outline(&mut fb, x, y, theme.circle_radius as i32, Rgba::WHITE);
            }
        }

        self.draw_legend_raster(&mut fb, &scene, rows_bottom);

        Ok(fb)
    }

    fn draw_legend_raster(&self, fb: &mut Framebuffer, scene: &Scene, rows_bottom: f32) {
        let theme = &self.theme;
        let Some(frame) = self.legend_frame(rows_bottom) else {
            return;
        };

        fb.fill_rect(
            frame.x as u32,
            frame.y as u32,
            frame.width as u32,
            frame.height as u32,
            theme.panel_fill,
        );
        draw_rect_outline(
            fb,
            frame.x as i32,
            frame.y as i32,
            frame.width as u32,
            frame.height as u32,
            theme.panel_stroke,
            1,
        );

        let per_column = legend_rows_per_column(scene.categories.len());
        for (i, category) in scene.categories.iter().enumerate() {
            let column = i / per_column;
            let row = i % per_column;
            let x = frame.x + 50.0 + column as f32 * 280.0;
            let y = frame.y + 25.0 + row as f32 * 26.0;
            let color = scene.palette.color_of(category);
            draw_circle(fb, x as i32, y as i32, 9, color);
            draw_circle_outline(fb, x as i32, y as i32, 9, Rgba::WHITE);
        }
    }

    /// Render to an SVG document string.
    ///
    /// Vector output carries the full chart: titles, year headers, named
    /// rows with share values, flow curves, rank-change indicators, NEW and
    /// dropped badges, and the category legend.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid data or dimensions.
    pub fn to_svg(&self) -> Result<String> {
        let scene = self.scene()?;
        let cfg = self.layout_config();
        let theme = &self.theme;

        let mut svg = SvgEncoder::new(self.width, self.height).background(Some(theme.background));

        let w = self.width as f32;
        let rows_top = cfg.top_y - cfg.row_height / 2.0;
        let rows_bottom = cfg.top_y + (scene.rows as f32 - 0.5) * cfg.row_height;
        let panel = self.panel_frame(rows_top, rows_bottom);

        svg.rect_rounded(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            6.0,
            theme.panel_fill,
            theme.panel_stroke,
            1.0,
        );

        for i in (0..scene.rows).step_by(2) {
            svg.rect(
                panel.x,
                cfg.top_y + (i as f32 - 0.5) * cfg.row_height,
                panel.width,
                cfg.row_height,
                theme.band_fill.with_alpha(153),
            );
        }

        for i in 1..scene.rows {
            let y = cfg.top_y + (i as f32 - 0.5) * cfg.row_height;
            svg.line_dashed(panel.x, y, panel.right(), y, theme.separator, 0.8, (2.0, 3.0));
        }

        svg.line(w / 2.0, rows_top, w / 2.0, rows_bottom, theme.separator, 1.2);

        svg.text_styled(
            panel.x,
            44.0,
            &self.title,
            28.0,
            theme.ink,
            TextAnchor::Start,
            true,
            false,
        );
        let subtitle = self.subtitle.clone().unwrap_or_else(|| {
            format!(
                "Comparison of rankings between {} and {}",
                scene.previous_label, scene.current_label
            )
        });
        svg.text(panel.x, 78.0, &subtitle, 18.0, theme.muted_ink, TextAnchor::Start);

        let header_y = cfg.top_y - cfg.row_height;
        svg.text_styled(
            cfg.left_x,
            header_y,
            &scene.previous_label,
            22.0,
            theme.ink,
            TextAnchor::Middle,
            true,
            false,
        );
        svg.text_styled(
            cfg.right_x,
            header_y,
            &scene.current_label,
            22.0,
            theme.ink,
            TextAnchor::Middle,
            true,
            false,
        );

        // Flow curves under the circles. The vector stroke uses the
        // destination-side color; the raster path carries the per-segment
        // gradient.
        for connector in &scene.connectors {
            svg.curve(&connector.curve, connector.color_to, connector.thickness);
        }

        for (entries, column) in [
            (&scene.left_entries, Column::Left),
            (&scene.right_entries, Column::Right),
        ] {
            for entry in entries.iter() {
                let Some(pos) = row_position(&scene.positions, &entry.identity, column) else {
                    continue;
                };
                let color = scene.palette.color_of(&entry.category);
                svg.circle_outlined(
                    pos.point.x,
                    pos.point.y,
                    theme.circle_radius,
                    color,
                    Rgba::WHITE,
                    1.5,
                );
                svg.text_styled(
                    pos.point.x,
                    pos.point.y,
                    &entry.rank.to_string(),
                    16.0,
                    Rgba::WHITE,
                    TextAnchor::Middle,
                    true,
                    false,
                );
                let label_x = pos.point.x + theme.circle_radius + 14.0;
                svg.text(
                    label_x,
                    pos.point.y - 7.0,
                    &entry.identity,
                    16.0,
                    theme.ink,
                    TextAnchor::Start,
                );
                svg.text_styled(
                    label_x,
                    pos.point.y + 13.0,
                    &format!("{:.1}%", entry.share),
                    12.0,
                    theme.muted_ink,
                    TextAnchor::Start,
                    false,
                    true,
                );
            }
        }

        for badge in &scene.badges {
            self.draw_badge_svg(&mut svg, badge);
        }

        for connector in &scene.connectors {
            if connector.kind != ConnectorKind::Normal {
                continue;
            }
            let Some(change) = connector.rank_change else {
                continue;
            };
            let mid = connector.curve.midpoint();
            svg.circle_outlined(mid.x, mid.y, 14.0, Rgba::WHITE, RANK_FLAT, 0.8);
            let (text, color) = match change {
                c if c > 0 => (format!("+{c}"), RANK_UP),
                c if c < 0 => (format!("{c}"), RANK_DOWN),
                _ => ("0".to_string(), RANK_FLAT),
            };
            svg.text_styled(mid.x, mid.y, &text, 12.0, color, TextAnchor::Middle, true, false);
        }

        self.draw_legend_svg(&mut svg, &scene, rows_bottom);

        Ok(svg.render())
    }

    fn draw_badge_svg(&self, svg: &mut SvgEncoder, badge: &BadgeSpec) {
        let theme = &self.theme;
        let label = match badge.kind {
            BadgeKind::New => "NEW",
            BadgeKind::Dropped => "OUT",
        };
        let (x, y) = (badge.position.x, badge.position.y);

        if let Some(rank) = badge.overflow_rank {
            // Two-years-back ranks show as a hollow circle, adjacent-year
            // ranks as a filled one.
            if badge.rank_is_two_back {
                svg.circle_outlined(
                    x,
                    y,
                    theme.marker_radius,
                    Rgba::WHITE,
                    badge.color,
                    1.2,
                );
                svg.text_styled(
                    x,
                    y,
                    &rank.to_string(),
                    11.0,
                    badge.color,
                    TextAnchor::Middle,
                    false,
                    false,
                );
            } else {
                svg.circle_outlined(x, y, theme.marker_radius, badge.color, Rgba::WHITE, 0.8);
                svg.text_styled(
                    x,
                    y,
                    &rank.to_string(),
                    11.0,
                    Rgba::WHITE,
                    TextAnchor::Middle,
                    false,
                    false,
                );
            }
        }

        let badge_x = x - theme.marker_radius - 42.0;
        svg.rect_rounded(
            badge_x,
            y - 10.0,
            36.0,
            20.0,
            5.0,
            Rgba::rgb(0xf0, 0xf0, 0xf0),
            Rgba::rgb(0xe0, 0xe0, 0xe0),
            0.8,
        );
        svg.text_styled(
            badge_x + 18.0,
            y,
            label,
            11.0,
            Rgba::rgb(0x44, 0x44, 0x44),
            TextAnchor::Middle,
            true,
            true,
        );
    }

    fn draw_legend_svg(&self, svg: &mut SvgEncoder, scene: &Scene, rows_bottom: f32) {
        let theme = &self.theme;
        let Some(frame) = self.legend_frame(rows_bottom) else {
            return;
        };

        svg.rect_rounded(
            frame.x,
            frame.y,
            frame.width,
            frame.height,
            6.0,
            Rgba::rgb(0xfa, 0xfa, 0xfa),
            theme.panel_stroke,
            0.8,
        );

        let per_column = legend_rows_per_column(scene.categories.len());
        for (i, category) in scene.categories.iter().enumerate() {
            let column = i / per_column;
            let row = i % per_column;
            let x = frame.x + 50.0 + column as f32 * 280.0;
            let y = frame.y + 25.0 + row as f32 * 26.0;
            let color = scene.palette.color_of(category);
            svg.circle_outlined(x, y, 9.0, color, Rgba::WHITE, 0.8);
            svg.text(x + 18.0, y, category, 13.0, theme.ink, TextAnchor::Start);
        }
    }

    /// Write the raster chart to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let fb = self.to_framebuffer()?;
        PngEncoder::write_to_file(&fb, path)
    }

    /// Write the vector chart to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or file writing fails.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let svg = self.to_svg()?;
        std::fs::write(path, svg)?;
        Ok(())
    }

    /// Write the chart to a file, picking the format from the extension.
    ///
    /// `.svg` produces vector output; everything else produces PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn render_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            self.write_svg(path)
        } else {
            self.write_png(path)
        }
    }
}

/// Legend grid height: up to four swatches per column.
fn legend_rows_per_column(categories: usize) -> usize {
    (categories / 3 + 1).clamp(1, 4)
}
