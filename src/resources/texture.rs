//! Textures: a row-major grid of colors with nearest-texel UV lookup.
//!
//! Filtering is intentionally nearest-neighbor only; `WrapMode` covers the
//! two edge policies this renderer's materials use.

use crate::math::{Color, Vec2};
use crate::resources::material::WrapMode;

pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Texture {
        assert_eq!(pixels.len(), (width * height) as usize);
        Texture { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest-texel lookup at `uv * (width, height)`, wrapping or clamping
    /// per `mode`.
    pub fn sample(&self, uv: Vec2, mode: WrapMode) -> Color {
        let resolve = |coord: f64, size: u32| -> u32 {
            let texel = coord.floor() as i64;
            match mode {
                WrapMode::Clamp => texel.clamp(0, size as i64 - 1) as u32,
                WrapMode::Wrap => texel.rem_euclid(size as i64) as u32,
            }
        };

        let x = resolve(uv.x * self.width as f64, self.width);
        let y = resolve(uv.y * self.height as f64, self.height);
        self.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);
        Texture::new(2, 2, vec![red, blue, blue, red])
    }

    #[test]
    fn wrap_repeats_past_one() {
        let tex = checker();
        let a = tex.sample(Vec2::new(0.1, 0.1), WrapMode::Wrap);
        let b = tex.sample(Vec2::new(1.1, 1.1), WrapMode::Wrap);
        assert_eq!(a, b);
    }

    #[test]
    fn clamp_holds_edge_texel() {
        let tex = checker();
        let at_edge = tex.sample(Vec2::new(0.99, 0.01), WrapMode::Clamp);
        let past_edge = tex.sample(Vec2::new(5.0, 0.01), WrapMode::Clamp);
        assert_eq!(at_edge, past_edge);
    }
}
