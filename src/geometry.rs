//! Geometric primitives for chart layout and rendering.
//!
//! Points and rectangles for anchor placement, plus the horizontal cubic
//! Bezier every flow connector is built from.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A cubic Bezier curve defined by four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point,
    /// First control point.
    pub p1: Point,
    /// Second control point.
    pub p2: Point,
    /// End point.
    pub p3: Point,
}

impl CubicBezier {
    /// Create a curve from explicit control points.
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Build a horizontal flow curve between two anchor points.
    ///
    /// Control points sit level with each endpoint, shifted inward by
    /// `min(0.4 * |dx|, control_shift_max)`, which keeps short connectors
    /// from over-bulging while long ones stay gently S-shaped.
    #[must_use]
    pub fn flow(from: Point, to: Point, control_shift_max: f32) -> Self {
        let shift = (0.4 * (to.x - from.x).abs()).min(control_shift_max);
        let (c1, c2) = if from.x <= to.x {
            (
                Point::new(from.x + shift, from.y),
                Point::new(to.x - shift, to.y),
            )
        } else {
            (
                Point::new(from.x - shift, from.y),
                Point::new(to.x + shift, to.y),
            )
        };
        Self::new(from, c1, c2, to)
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn eval(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;

        Point::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }

    /// Midpoint of the curve (`t = 0.5`), used for rank-change indicators.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.eval(0.5)
    }

    /// Flatten into `segments + 1` evenly-parameterized sample points.
    #[must_use]
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.eval(i as f32 / segments as f32))
            .collect()
    }
}
