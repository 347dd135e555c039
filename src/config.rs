//! Render-wide configuration: the compile-/config-time constants from the
//! original tool, gathered into one struct instead of `#define`s so a
//! process can render more than one scene with different settings.

/// Sub-pixel sampling pattern used by the ray tracer's per-pixel integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSampleMode {
    /// Single sample at the pixel center.
    Single,
    /// Fixed 2x2 grid at (0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75).
    Fixed4,
    /// `n` stochastic samples, uniform random within the pixel.
    Stochastic(u32),
}

impl SubSampleMode {
    pub fn sample_count(self) -> u32 {
        match self {
            SubSampleMode::Single => 1,
            SubSampleMode::Fixed4 => 4,
            SubSampleMode::Stochastic(n) => n,
        }
    }
}

/// Barycentric interpolation mode for the rasterizer's fragment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Linear interpolation in screen space (the original behavior; cheap,
    /// not perspective-correct).
    ScreenSpace,
    /// Perspective-correct interpolation via interpolated `1/w`.
    PerspectiveCorrect,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub render_width: u32,
    pub render_height: u32,

    pub max_bounces: u32,
    pub max_t: f64,

    pub ambient_light: f64,
    pub specular_power: f64,

    pub camera_fov_degrees: f64,
    pub camera_near_plane: f64,
    pub camera_far_plane: f64,

    pub sub_sample_mode: SubSampleMode,
    pub interpolation_mode: InterpolationMode,

    pub use_aabb: bool,
    pub use_shadows: bool,
    pub use_reflection: bool,
    pub phong_normals: bool,
    pub draw_wireframe: bool,
    pub draw_aabb: bool,
    pub use_raytrace: bool,
    pub use_rasterize: bool,

    /// Octree build policy: subdivide past this many triangles per node.
    pub octree_leaf_max: usize,
    /// Octree build policy: never subdivide past this depth.
    pub octree_max_depth: u32,

    /// Square tile edge length used by the tile scheduler.
    pub tile_size: u32,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            render_width: 640,
            render_height: 480,

            max_bounces: 4,
            max_t: 10_000.0,

            ambient_light: 0.1,
            specular_power: 32.0,

            camera_fov_degrees: 60.0,
            camera_near_plane: 0.1,
            camera_far_plane: 10_000.0,

            sub_sample_mode: SubSampleMode::Fixed4,
            interpolation_mode: InterpolationMode::ScreenSpace,

            use_aabb: true,
            use_shadows: true,
            use_reflection: true,
            phong_normals: true,
            draw_wireframe: true,
            draw_aabb: true,
            use_raytrace: true,
            use_rasterize: true,

            octree_leaf_max: 8,
            octree_max_depth: 6,

            tile_size: 120,
        }
    }
}
