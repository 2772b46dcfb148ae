//! Rasterization of chart primitives.
//!
//! Lines, panel outlines, rank circles, and the gradient-stroked flow
//! curves, drawn into a [`crate::framebuffer::Framebuffer`].

mod primitives;

pub use primitives::{
    blend_circle, draw_circle, draw_circle_outline, draw_curve_gradient, draw_line,
    draw_rect_outline,
};
