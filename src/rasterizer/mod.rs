//! Scanline rasterizer (C7): vertex projection, screen-space triangle
//! fill with a z-buffer, reusing the ray tracer's shading model.

pub mod wireframe;

use crate::camera::View;
use crate::config::{InterpolationMode, RenderConfig};
use crate::geometry::triangle::Triangle;
use crate::image_grid::ImageGrid;
use crate::math::{color, Color, Mat4, Vec2, Vec3, Vec4};
use crate::resources::arena::ResourceArena;
use crate::resources::material::Material;
use crate::scene::Scene;
use crate::shading::{ambient_term, blinn_phong_direct, interpolate_surface};

/// A triangle's vertices projected to clip space, carrying `w` for
/// perspective-correct interpolation.
struct ClipVertex {
    clip: Vec4,
    screen: Vec2,
    world: Vec3,
    ndc_z: f64,
}

/// Projects to homogeneous divide-by-`w`, with a small epsilon added to
/// `w` to avoid a division blow-up — the epsilon is deliberate. No
/// near-plane clipping is performed here: a vertex behind the camera
/// still produces a (numerically degraded) screen position; the caller
/// rejects only whole triangles entirely behind the near plane.
fn project(v: Vec3, proj_view: &Mat4, width: f64, height: f64) -> ClipVertex {
    let clip = proj_view * Vec4::new(v.x, v.y, v.z, 1.0);
    let w = if clip.w.abs() < 1e-7 { 1e-7_f64.copysign(clip.w) } else { clip.w };
    let ndc_x = clip.x / w;
    let ndc_y = clip.y / w;
    let ndc_z = clip.z / w;
    let screen = Vec2::new((ndc_x * 0.5 + 0.5) * width, (1.0 - (ndc_y * 0.5 + 0.5)) * height);
    ClipVertex { clip, screen, world: v, ndc_z }
}

/// Signed area of the 2D triangle `(a, b, c)`; its sign gives winding.
fn signed_area2(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Rasterizes every model instance's triangle cache into `color_grid`, with
/// a z-buffer in `depth_grid` (NDC `z` in `[-1, 1]`, nearer is smaller).
/// Reuses ambient+direct shading from the ray tracer's Blinn-Phong model;
/// shadow rays and mirror recursion are a ray-tracer-only feature — the
/// rasterizer is a debug/auxiliary path, not full Whitted shading.
pub fn rasterize_scene(
    scene: &Scene,
    arena: &ResourceArena,
    config: &RenderConfig,
    view: &View,
    color_grid: &mut ImageGrid<Color>,
    depth_grid: &mut ImageGrid<f32>,
) {
    let width = view.target_size.width as f64;
    let height = view.target_size.height as f64;

    for instance in &scene.models {
        for tri in &instance.tri_cache {
            rasterize_triangle(tri, arena, config, view, &scene.lights, width, height, color_grid, depth_grid, instance.cull_backfaces);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn rasterize_triangle(
    tri: &Triangle,
    arena: &ResourceArena,
    config: &RenderConfig,
    view: &View,
    lights: &[crate::scene::Light],
    width: f64,
    height: f64,
    color_grid: &mut ImageGrid<Color>,
    depth_grid: &mut ImageGrid<f32>,
    cull_backfaces: bool,
) {
    let p0 = project(tri.v0.position, &view.proj_view_matrix, width, height);
    let p1 = project(tri.v1.position, &view.proj_view_matrix, width, height);
    let p2 = project(tri.v2.position, &view.proj_view_matrix, width, height);

    // Reject only when the *entire* triangle is behind the near plane.
    // Partially-behind triangles are accepted and project with degraded
    // numerics rather than being clipped.
    if p0.ndc_z < -1.0 && p1.ndc_z < -1.0 && p2.ndc_z < -1.0 {
        return;
    }

    let area = signed_area2(p0.screen, p1.screen, p2.screen);
    if area == 0.0 {
        return;
    }
    if cull_backfaces && area > 0.0 {
        // Screen space is Y-down; a CCW-wound front face projects to a
        // negative signed area under this convention.
        return;
    }

    let min_x = p0.screen.x.min(p1.screen.x).min(p2.screen.x).floor().max(0.0) as i64;
    let max_x = p0.screen.x.max(p1.screen.x).max(p2.screen.x).ceil().min(width) as i64;
    let min_y = p0.screen.y.min(p1.screen.y).min(p2.screen.y).floor().max(0.0) as i64;
    let max_y = p0.screen.y.max(p1.screen.y).max(p2.screen.y).ceil().min(height) as i64;

    if min_x >= max_x || min_y >= max_y {
        return;
    }

    let material = arena.material(tri.material).copied().unwrap_or_default();
    let inv_area = 1.0 / area;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let sample_point = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
            let w0 = signed_area2(p1.screen, p2.screen, sample_point) * inv_area;
            let w1 = signed_area2(p2.screen, p0.screen, sample_point) * inv_area;
            let w2 = signed_area2(p0.screen, p1.screen, sample_point) * inv_area;

            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let bary = match config.interpolation_mode {
                // Non-perspective-correct: linear in screen space, an
                // acknowledged approximation.
                InterpolationMode::ScreenSpace => Vec3::new(w0, w1, w2),
                InterpolationMode::PerspectiveCorrect => {
                    let inv_w0 = w0 / p0.clip.w;
                    let inv_w1 = w1 / p1.clip.w;
                    let inv_w2 = w2 / p2.clip.w;
                    let sum = inv_w0 + inv_w1 + inv_w2;
                    if sum.abs() < 1e-12 {
                        Vec3::new(w0, w1, w2)
                    } else {
                        Vec3::new(inv_w0 / sum, inv_w1 / sum, inv_w2 / sum)
                    }
                }
            };

            // Depth is always interpolated linearly in screen space —
            // perspective-correct interpolation is not required for depth
            // specifically — independent of the color attribute
            // interpolation mode above.
            let ndc_z = w0 * p0.ndc_z + w1 * p1.ndc_z + w2 * p2.ndc_z;

            let depth_pixel = depth_grid.get_mut(x as u32, y as u32);
            if ndc_z >= *depth_pixel as f64 {
                continue;
            }
            *depth_pixel = ndc_z as f32;

            let point = bary.x * p0.world + bary.y * p1.world + bary.z * p2.world;
            let shaded = shade_fragment(tri, &material, arena, config, view, lights, point);
            color_grid.set(x as u32, y as u32, shaded);
        }
    }
}

fn shade_fragment(
    tri: &Triangle,
    material: &Material,
    arena: &ResourceArena,
    config: &RenderConfig,
    view: &View,
    lights: &[crate::scene::Light],
    point: Vec3,
) -> Color {
    let (normal, vertex_color, uv) = interpolate_surface(
        point,
        (tri.v0.position, tri.v0.normal, tri.v0.color, tri.v0.uv),
        (tri.v1.position, tri.v1.normal, tri.v1.color, tri.v1.uv),
        (tri.v2.position, tri.v2.normal, tri.v2.color, tri.v2.uv),
        config.phong_normals,
        tri.n,
    );

    let albedo = match material.texture {
        Some(handle) => arena.texture(handle).map(|t| t.sample(uv, material.wrap_mode)).unwrap_or(vertex_color),
        None => vertex_color,
    };

    let view_dir = (view.camera.origin - point).normalize();
    let mut out = ambient_term(material, config, albedo);
    for light in lights {
        out += blinn_phong_direct(material, config, light, point, normal, view_dir, albedo);
    }
    crate::math::color::linear_to_srgb(color(out.x.clamp(0.0, 1.0), out.y.clamp(0.0, 1.0), out.z.clamp(0.0, 1.0), 1.0))
}
