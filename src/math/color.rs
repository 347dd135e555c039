//! RGBA color, linear<->sRGB gamma encoding, and source-over alpha
//! blending. Channels are `f32` and unclamped until the final
//! gamma-encode step, per the shading model's "don't saturate highlights
//! early" rule.

use nalgebra::Vector4;

pub type Color = Vector4<f32>;

pub fn color(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color::new(r, g, b, a)
}

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

#[inline]
fn linear_to_srgb_channel(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn srgb_to_linear_channel(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Gamma-encodes a linear color to sRGB, clamping each channel to `[0, 1]`.
/// Alpha passes through unchanged (it is coverage, not light).
pub fn linear_to_srgb(c: Color) -> Color {
    color(
        linear_to_srgb_channel(c.x),
        linear_to_srgb_channel(c.y),
        linear_to_srgb_channel(c.z),
        c.w,
    )
}

pub fn srgb_to_linear(c: Color) -> Color {
    color(
        srgb_to_linear_channel(c.x),
        srgb_to_linear_channel(c.y),
        srgb_to_linear_channel(c.z),
        c.w,
    )
}

/// Source-over alpha blend: `src` drawn on top of `dest`, weighted by
/// `src.a` as coverage.
pub fn blend_src_over(src: Color, dest: Color) -> Color {
    let a = src.w.clamp(0.0, 1.0);
    color(
        src.x * a + dest.x * (1.0 - a),
        src.y * a + dest.y * (1.0 - a),
        src.z * a + dest.z * (1.0 - a),
        a + dest.w * (1.0 - a),
    )
}

pub fn to_rgba8(c: Color) -> [u8; 4] {
    let clamp = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    [clamp(c.x), clamp(c.y), clamp(c.z), clamp(c.w)]
}
