//! Shading (C5): the intersection sample record and Blinn-Phong
//! evaluation shared by the ray tracer and the rasterizer.

use crate::config::RenderConfig;
use crate::math::{barycentric_of, color, saturate, Color, Vec3};
use crate::resources::handle::MaterialHandle;
use crate::resources::material::Material;
use crate::scene::Light;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCode {
    None,
    FrontFace,
    BackFace,
    Sky,
}

#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub hit_code: HitCode,
    pub point: Vec3,
    pub t: f64,
    /// Phong-interpolated if enabled, else the triangle's face normal.
    pub normal: Vec3,
    /// Texture sample or vertex-interpolated color.
    pub albedo: Color,
    pub untextured_color: Color,
    /// `dot(ray.direction, normal)`.
    pub surface_dot: f64,
    pub material: MaterialHandle,
    pub model_index: usize,
}

impl Sample {
    pub fn miss() -> Sample {
        Sample {
            hit_code: HitCode::None,
            point: Vec3::zeros(),
            t: f64::MAX,
            normal: Vec3::zeros(),
            albedo: crate::math::color::BLACK,
            untextured_color: crate::math::color::BLACK,
            surface_dot: 0.0,
            material: MaterialHandle::invalid(),
            model_index: usize::MAX,
        }
    }
}

/// The vertical sky gradient used when a ray misses all geometry:
/// `lerp(white, sky_color, saturate(dir . (0,0,1)))`.
pub fn sky_sample(direction: Vec3, sky_color: Color, t: f64) -> Sample {
    let sky_dot = saturate(direction.dot(&Vec3::new(0.0, 0.0, 1.0)));
    let gradient = color(
        crate::math::lerp(1.0, sky_color.x as f64, sky_dot) as f32,
        crate::math::lerp(1.0, sky_color.y as f64, sky_dot) as f32,
        crate::math::lerp(1.0, sky_color.z as f64, sky_dot) as f32,
        1.0,
    );

    Sample {
        hit_code: HitCode::Sky,
        point: Vec3::zeros(),
        t,
        normal: Vec3::zeros(),
        albedo: gradient,
        untextured_color: gradient,
        surface_dot: 0.0,
        material: MaterialHandle::invalid(),
        model_index: usize::MAX,
    }
}

/// Barycentric-interpolates a triangle's shading inputs at `point`, writing
/// them into `out_normal`/`out_color`/`out_uv`. Shared by the ray tracer's
/// `record_surface_info` and the rasterizer's fragment stage so both paths
/// agree on interpolation.
pub fn interpolate_surface(
    point: Vec3,
    v0: (Vec3, Vec3, Color, crate::math::Vec2),
    v1: (Vec3, Vec3, Color, crate::math::Vec2),
    v2: (Vec3, Vec3, Color, crate::math::Vec2),
    phong_normals: bool,
    face_normal: Vec3,
) -> (Vec3, Color, crate::math::Vec2) {
    let bary = barycentric_of(point, v0.0, v1.0, v2.0);

    let normal = if phong_normals {
        let n = v0.1 * bary.x + v1.1 * bary.y + v2.1 * bary.z;
        if n.norm_squared() > 0.0 { n.normalize() } else { face_normal }
    } else {
        face_normal
    };

    let c = v0.2 * bary.x as f32 + v1.2 * bary.y as f32 + v2.2 * bary.z as f32;
    let uv = v0.3 * bary.x + v1.3 * bary.y + v2.3 * bary.z;

    (normal, c, uv)
}

/// Blinn-Phong direct lighting from a single, unoccluded light.
///
/// `D * I * max(0, n.l) * albedo + S * max(0, n.h)^Ns * I`
pub fn blinn_phong_direct(
    material: &Material,
    config: &RenderConfig,
    light: &Light,
    surface_point: Vec3,
    normal: Vec3,
    view_dir: Vec3,
    albedo: Color,
) -> Color {
    let light_dir = (light.position - surface_point).normalize();
    let half_vector = (view_dir + light_dir).normalize();

    let n_dot_l = normal.dot(&light_dir).max(0.0);
    let n_dot_h = normal.dot(&half_vector).max(0.0);
    let ns = material.ns.unwrap_or(config.specular_power);

    let intensity = light.intensity;

    let diffuse = color(
        (material.kd.x as f64 * intensity.x * n_dot_l * albedo.x as f64) as f32,
        (material.kd.y as f64 * intensity.y * n_dot_l * albedo.y as f64) as f32,
        (material.kd.z as f64 * intensity.z * n_dot_l * albedo.z as f64) as f32,
        1.0,
    );

    let spec_term = n_dot_h.powf(ns);
    let specular = color(
        (material.ks.x as f64 * spec_term * intensity.x) as f32,
        (material.ks.y as f64 * spec_term * intensity.y) as f32,
        (material.ks.z as f64 * spec_term * intensity.z) as f32,
        1.0,
    );

    diffuse + specular
}

/// Ambient term, added once outside the per-light loop:
/// `AmbientLight * (Ka * albedo)`.
pub fn ambient_term(material: &Material, config: &RenderConfig, albedo: Color) -> Color {
    let k = config.ambient_light as f32;
    color(
        k * material.ka.x * albedo.x,
        k * material.ka.y * albedo.y,
        k * material.ka.z * albedo.z,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sky_at_zenith_is_sky_color() {
        let sky = color(0.3, 0.5, 0.9, 1.0);
        let s = sky_sample(Vec3::new(0.0, 0.0, 1.0), sky, 1.0);
        assert!((s.albedo - sky).norm() < 1e-6);
    }

    #[test]
    fn sky_at_horizon_is_white() {
        let sky = color(0.3, 0.5, 0.9, 1.0);
        let s = sky_sample(Vec3::new(1.0, 0.0, 0.0), sky, 1.0);
        assert!((s.albedo - crate::math::color::WHITE).norm() < 1e-6);
    }
}
