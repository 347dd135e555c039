//! Adapters from `ImageGrid` to the `image` crate's buffers, and the BMP
//! encode/decode boundary (the external bitmap writer).

use std::path::Path;

use image::{GenericImageView, ImageBuffer, Luma, Rgba};

use crate::error::{RenderError, RenderResult};
use crate::image_grid::ImageGrid;
use crate::math::color::to_rgba8;
use crate::math::Color;

/// Converts a color grid (linear-or-gamma, caller's choice — callers pass
/// an already gamma-encoded grid) to an RGBA8 `image` buffer.
pub fn to_rgba_image(grid: &ImageGrid<Color>) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let mut img = ImageBuffer::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let [r, g, b, a] = to_rgba8(*grid.get(x, y));
            img.put_pixel(x, y, Rgba([r, g, b, a]));
        }
    }
    img
}

/// Converts a normalized `[0, 1]` scalar grid (e.g. a depth buffer already
/// remapped from `[near, far]`) to an 8-bit grayscale `image` buffer.
pub fn to_normalized_gray_image(grid: &ImageGrid<f32>) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let mut img = ImageBuffer::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let v = (grid.get(x, y).clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
            img.put_pixel(x, y, Luma([v]));
        }
    }
    img
}

pub fn write_bmp(grid: &ImageGrid<Color>, path: &Path) -> RenderResult<()> {
    let img = to_rgba_image(grid);
    img.save(path).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })
}

pub fn write_gray_bmp(grid: &ImageGrid<f32>, path: &Path) -> RenderResult<()> {
    let img = to_normalized_gray_image(grid);
    img.save(path).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })
}

/// Loads a BMP (or any `image`-supported bitmap) texture source from disk
/// into a linear-space pixel grid of `Color`.
pub fn read_texture(path: &Path) -> RenderResult<ImageGrid<Color>> {
    let img = image::open(path).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })?;

    let (width, height) = img.dimensions();
    let mut grid = ImageGrid::filled(width, height, crate::math::color::BLACK);
    for y in 0..height {
        for x in 0..width {
            let p = img.get_pixel(x, y);
            let c = crate::math::color::color(
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
                p[3] as f32 / 255.0,
            );
            grid.set(x, y, crate::math::color::srgb_to_linear(c));
        }
    }
    Ok(grid)
}
