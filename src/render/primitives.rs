//! Primitive rasterization for the chart renderer.
//!
//! Covers exactly the shapes the raster chart draws: separator lines,
//! panel outlines, rank circles, and the gradient-stroked flow curves.
//! Everything clips at the surface edge through the framebuffer's
//! bounds-checked writes.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::CubicBezier;

/// Draw a straight line by stepping along its major axis.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs());
    if steps == 0 {
        if x0 >= 0 && y0 >= 0 {
            fb.set_pixel(x0 as u32, y0 as u32, color);
        }
        return;
    }

    let dx = (x1 - x0) as f32 / steps as f32;
    let dy = (y1 - y0) as f32 / steps as f32;
    for i in 0..=steps {
        let x = (x0 as f32 + dx * i as f32).round() as i32;
        let y = (y0 as f32 + dy * i as f32).round() as i32;
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw a rectangle outline as four filled edge strips.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let t = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;
    let inner_h = height.saturating_sub(2 * t);

    let strips = [
        (x, y, width, t),
        (x, y + height.saturating_sub(t), width, t),
        (x, y + t, t, inner_h),
        (x + width.saturating_sub(t), y + t, t, inner_h),
    ];
    for (sx, sy, sw, sh) in strips {
        fb.fill_rect(sx, sy, sw, sh, color);
    }
}

/// Draw a filled circle, one horizontal span per scanline.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius < 0 {
        return;
    }
    for dy in -radius..=radius {
        let half = ((radius * radius - dy * dy) as f32).sqrt() as i32;
        fill_span(fb, cx - half, cx + half, cy + dy, color);
    }
}

/// Draw a circle outline by sampling the circumference.
///
/// The sample count scales with the radius so adjacent samples always land
/// on touching pixels.
pub fn draw_circle_outline(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let samples = (radius * 8).max(16);
    let step = std::f32::consts::TAU / samples as f32;
    for i in 0..samples {
        let angle = step * i as f32;
        let x = cx + (angle.cos() * radius as f32).round() as i32;
        let y = cy + (angle.sin() * radius as f32).round() as i32;
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }
    }
}

/// Blend a translucent filled circle over the existing content.
///
/// Used for the soft drop shadows under rank circles; opaque shapes go
/// through [`draw_circle`] instead.
pub fn blend_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius < 0 {
        return;
    }
    for dy in -radius..=radius {
        let half = ((radius * radius - dy * dy) as f32).sqrt() as i32;
        for dx in -half..=half {
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 {
                fb.blend_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Clipped horizontal run from `x0` to `x1` inclusive.
#[inline]
fn fill_span(fb: &mut Framebuffer, x0: i32, x1: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }
    let start = x0.max(0);
    let end = x1.min(fb.width() as i32 - 1);
    if start <= end {
        fb.fill_rect(start as u32, y as u32, (end - start + 1) as u32, 1, color);
    }
}

/// Samples used when flattening a flow curve.
const CURVE_SEGMENTS: usize = 150;

/// Stroke a cubic Bezier with a left-to-right color gradient and round
/// thickness.
///
/// The curve is flattened into segments; each sample is stamped as a filled
/// disc of half the stroke thickness with the color interpolated by curve
/// parameter. Dense sampling keeps adjacent stamps overlapping, which reads
/// as a continuous thick stroke.
pub fn draw_curve_gradient(
    fb: &mut Framebuffer,
    curve: &CubicBezier,
    color_from: Rgba,
    color_to: Rgba,
    thickness: f32,
) {
    let samples = curve.flatten(CURVE_SEGMENTS);
    let radius = ((thickness / 2.0).round() as i32).max(1);
    let last = samples.len().saturating_sub(1).max(1);

    for (i, point) in samples.iter().enumerate() {
        let t = i as f32 / last as f32;
        let color = color_from.lerp(color_to, t);
        draw_circle(fb, point.x as i32, point.y as i32, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn surface() -> Framebuffer {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_line_horizontal_covers_every_column() {
        let mut fb = surface();
        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);
        for x in 10..=90 {
            assert_eq!(fb.get_pixel(x, 50), Some(Rgba::BLACK));
        }
    }

    #[test]
    fn test_line_diagonal_hits_endpoints_and_middle() {
        let mut fb = surface();
        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK);
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 90), Some(Rgba::BLACK));
    }

    #[test]
    fn test_line_single_point() {
        let mut fb = surface();
        draw_line(&mut fb, 5, 5, 5, 5, Rgba::BLACK);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::BLACK));
    }

    #[test]
    fn test_line_out_of_bounds_does_not_panic() {
        let mut fb = surface();
        draw_line(&mut fb, -10, -10, 110, 110, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut fb = surface();
        draw_rect_outline(&mut fb, 20, 20, 30, 30, Rgba::rgb(255, 0, 0), 2);
        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(fb.get_pixel(49, 35), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(fb.get_pixel(35, 35), Some(Rgba::WHITE));
    }

    #[test]
    fn test_filled_circle_center_and_extent() {
        let mut fb = surface();
        draw_circle(&mut fb, 50, 50, 20, Rgba::rgb(0, 0, 255));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_outline_ring_only() {
        let mut fb = surface();
        draw_circle_outline(&mut fb, 50, 50, 20, Rgba::rgb(0, 255, 0));
        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(fb.get_pixel(30, 50), Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_zero_radius_is_one_pixel() {
        let mut fb = surface();
        draw_circle(&mut fb, 50, 50, 0, Rgba::rgb(255, 0, 0));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(fb.get_pixel(51, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_blend_circle_darkens_without_replacing() {
        let mut fb = surface();
        blend_circle(&mut fb, 50, 50, 10, Rgba::new(0, 0, 0, 21));
        let px = fb.get_pixel(50, 50).unwrap();
        assert!(px.r < 255);
        assert!(px.r > 200);
        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_curve_gradient_endpoints_colored() {
        let mut fb = Framebuffer::new(200, 100).unwrap();
        fb.clear(Rgba::WHITE);

        let curve = CubicBezier::flow(Point::new(20.0, 50.0), Point::new(180.0, 50.0), 18.0);
        draw_curve_gradient(
            &mut fb,
            &curve,
            Rgba::rgb(255, 0, 0),
            Rgba::rgb(0, 0, 255),
            6.0,
        );

        // Left end red-ish, right end blue-ish
        let left = fb.get_pixel(20, 50).unwrap();
        let right = fb.get_pixel(180, 50).unwrap();
        assert!(left.r > left.b);
        assert!(right.b > right.r);
    }

    #[test]
    fn test_curve_gradient_stroke_has_thickness() {
        let mut fb = Framebuffer::new(200, 100).unwrap();
        fb.clear(Rgba::WHITE);

        let curve = CubicBezier::flow(Point::new(20.0, 50.0), Point::new(180.0, 50.0), 18.0);
        draw_curve_gradient(&mut fb, &curve, Rgba::BLACK, Rgba::BLACK, 10.0);

        // A horizontal stroke of thickness 10 covers rows above and below
        assert_eq!(fb.get_pixel(100, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(100, 47), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(100, 53), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(100, 30), Some(Rgba::WHITE));
    }
}
