//! Blinn-Phong material parameters.

use crate::math::Color;
use crate::resources::handle::TextureHandle;

/// UV lookup policy for out-of-`[0,1]` texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Wrap,
}

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ka: Color,
    pub kd: Color,
    pub ks: Color,
    pub ke: Color,
    /// Specular exponent. `None` falls back to `RenderConfig::specular_power`.
    pub ns: Option<f64>,
    /// Reflectivity in `[0, 1]`; `> 0` triggers the mirror branch.
    pub tr: f64,
    pub texture: Option<TextureHandle>,
    pub wrap_mode: WrapMode,
}

impl Material {
    pub fn textured(&self) -> bool {
        self.texture.is_some()
    }
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ka: Color::new(1.0, 1.0, 1.0, 1.0),
            kd: Color::new(1.0, 1.0, 1.0, 1.0),
            ks: Color::new(0.0, 0.0, 0.0, 1.0),
            ke: Color::new(0.0, 0.0, 0.0, 1.0),
            ns: None,
            tr: 0.0,
            texture: None,
            wrap_mode: WrapMode::Wrap,
        }
    }
}

/// A small fixed palette of flat-colored materials, used by demo scenes for
/// quick per-instance tinting without allocating a unique material for every
/// debug color, mirroring `CreateMaterials`'s `DbgColors` palette.
pub fn debug_palette() -> Vec<Material> {
    const COLORS: [(f32, f32, f32); 8] = [
        (1.0, 0.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 1.0, 0.0),
        (1.0, 0.0, 1.0),
        (0.0, 1.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.5, 0.5, 0.5),
    ];

    COLORS
        .iter()
        .map(|&(r, g, b)| Material {
            kd: Color::new(r, g, b, 1.0),
            ..Material::default()
        })
        .collect()
}
