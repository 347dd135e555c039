//! Recursive Whitted-style ray tracer (C6): scene intersection, shading
//! dispatch, shadow rays and mirror-reflection recursion.

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use crate::camera::View;
use crate::config::RenderConfig;
use crate::geometry::ray::{ray_triangle_intersect, Ray};
use crate::math::{color, reflect, saturate, Vec2, Vec3};
use crate::resources::arena::ResourceArena;
use crate::resources::material::Material;
use crate::scene::Scene;
use crate::shading::{ambient_term, blinn_phong_direct, interpolate_surface, sky_sample, HitCode, Sample};

/// A single scene-wide ray/triangle hit: which instance and triangle, plus
/// the interpolated surface record at the hit point.
struct SceneHit {
    model_index: usize,
    triangle_index: usize,
    t: f64,
    back_face: bool,
}

/// Scans every model instance's octree for candidate triangles, keeping the
/// closest valid hit. `cull_backfaces` rejects back faces per-instance
/// (`ModelInstance::cull_backfaces`); `stop_at_first` short-circuits on the
/// first accepted hit, used for shadow-ray occlusion tests where only
/// "is anything in the way" matters.
fn intersect_scene(scene: &Scene, ray: &Ray, stop_at_first: bool) -> Option<SceneHit> {
    let mut best: Option<SceneHit> = None;
    let mut candidates = Vec::new();

    for (model_index, instance) in scene.models.iter().enumerate() {
        candidates.clear();
        instance.octree.query(ray, &mut candidates);

        for &tri_idx in &candidates {
            let tri = &instance.tri_cache[tri_idx as usize];
            if let Some((t, back_face)) = ray_triangle_intersect(ray, tri) {
                if back_face && instance.cull_backfaces {
                    continue;
                }

                let better = match &best {
                    Some(hit) => t < hit.t,
                    None => true,
                };

                if better {
                    best = Some(SceneHit { model_index, triangle_index: tri_idx as usize, t, back_face });
                    if stop_at_first {
                        return best;
                    }
                }
            }
        }
    }

    best
}

/// Resolves an albedo sample (texture lookup or vertex color) at `uv` for
/// `material`, matching the shading model's texture-over-vertex-color
/// precedence: a bound texture wins, else the interpolated vertex color.
fn resolve_albedo(material: &Material, arena: &ResourceArena, uv: Vec2, vertex_color: crate::math::Color) -> crate::math::Color {
    match material.texture {
        Some(handle) => match arena.texture(handle) {
            Some(texture) => texture.sample(uv, material.wrap_mode),
            None => vertex_color,
        },
        None => vertex_color,
    }
}

/// Disk radius for the mirror-reflection jitter offset: "a small uniform
/// offset on a disk, magnitude ~= 0.1".
const REFLECTION_JITTER_RADIUS: f64 = 0.1;

/// Perturbs `dir` by a small uniform offset on a disk perpendicular to it,
/// then renormalizes. Used only for the mirror-reflection branch; kept out
/// of shared/global RNG state per the per-pixel/per-tile seeding scheme
/// (`mix_seed`).
fn jitter_direction(dir: Vec3, radius: f64, rng: &mut impl Rng) -> Vec3 {
    let tangent = if dir.x.abs() < 0.9 { dir.cross(&Vec3::new(1.0, 0.0, 0.0)) } else { dir.cross(&Vec3::new(0.0, 1.0, 0.0)) }.normalize();
    let bitangent = dir.cross(&tangent);

    let angle = rng.random::<f64>() * std::f64::consts::TAU;
    let r = radius * rng.random::<f64>().sqrt();
    let offset = tangent * (r * angle.cos()) + bitangent * (r * angle.sin());

    (dir + offset).normalize()
}

/// Shades a surface hit. When the material is reflective and the bounce
/// budget allows it, this **short-circuits direct lighting entirely**:
/// the returned color is just `M.Tr * reflected.color`, with no ambient
/// or per-light terms — a deliberate simplification, preserved behind
/// `RenderConfig::use_reflection` (see DESIGN.md's open-question notes).
fn shade_hit(
    scene: &Scene,
    arena: &ResourceArena,
    config: &RenderConfig,
    ray: &Ray,
    hit: &SceneHit,
    depth: u32,
    rng: &mut impl Rng,
) -> crate::math::Color {
    let instance = &scene.models[hit.model_index];
    let tri = &instance.tri_cache[hit.triangle_index];
    let material = arena.material(tri.material).copied().unwrap_or_default();

    let point = ray.point(hit.t);
    let (normal, vertex_color, uv) = interpolate_surface(
        point,
        (tri.v0.position, tri.v0.normal, tri.v0.color, tri.v0.uv),
        (tri.v1.position, tri.v1.normal, tri.v1.color, tri.v1.uv),
        (tri.v2.position, tri.v2.normal, tri.v2.color, tri.v2.uv),
        config.phong_normals,
        tri.n,
    );
    let shading_normal = if hit.back_face { -normal } else { normal };
    let albedo = resolve_albedo(&material, arena, uv, vertex_color);

    if config.use_reflection && material.tr > 0.0 && depth < config.max_bounces {
        let reflected_dir = jitter_direction(reflect(ray.direction.normalize(), shading_normal), REFLECTION_JITTER_RADIUS, rng);
        let reflect_ray = Ray::new(point + shading_normal * 1e-6, reflected_dir, config.max_t);
        let reflected = trace_ray(scene, arena, config, &reflect_ray, depth + 1, rng);
        let tr = material.tr as f32;
        return color(tr * reflected.x, tr * reflected.y, tr * reflected.z, 1.0);
    }

    let view_dir = -ray.direction.normalize();
    let mut out = ambient_term(&material, config, albedo);

    for light in &scene.lights {
        if config.use_shadows {
            let shadow_ray = Ray::towards(point + shading_normal * 1e-6, light.position);
            if intersect_scene(scene, &shadow_ray, true).is_some() {
                continue;
            }
        }
        out += blinn_phong_direct(&material, config, light, point, shading_normal, view_dir, albedo);
    }

    color(out.x, out.y, out.z, 1.0)
}

/// Traces a single ray through the scene to completion, including any
/// mirror-reflection recursion, bounded by `RenderConfig::max_bounces`.
pub fn trace_ray(scene: &Scene, arena: &ResourceArena, config: &RenderConfig, ray: &Ray, depth: u32, rng: &mut impl Rng) -> crate::math::Color {
    match intersect_scene(scene, ray, false) {
        Some(hit) => shade_hit(scene, arena, config, ray, &hit, depth, rng),
        None => sky_sample(ray.direction.normalize(), color(0.4, 0.6, 0.9, 1.0), ray.max_t).albedo,
    }
}

/// Returns the sky-gradient or geometry-hit `Sample` at the given ray,
/// without shading; used by callers (e.g. debug buffers) that only need
/// `HitCode`/normal/albedo and not the fully lit color.
pub fn sample_ray(scene: &Scene, arena: &ResourceArena, config: &RenderConfig, ray: &Ray) -> Sample {
    match intersect_scene(scene, ray, false) {
        Some(hit) => {
            let instance = &scene.models[hit.model_index];
            let tri = &instance.tri_cache[hit.triangle_index];
            let material = arena.material(tri.material).copied().unwrap_or_default();
            let point = ray.point(hit.t);
            let (normal, vertex_color, uv) = interpolate_surface(
                point,
                (tri.v0.position, tri.v0.normal, tri.v0.color, tri.v0.uv),
                (tri.v1.position, tri.v1.normal, tri.v1.color, tri.v1.uv),
                (tri.v2.position, tri.v2.normal, tri.v2.color, tri.v2.uv),
                config.phong_normals,
                tri.n,
            );
            let albedo = resolve_albedo(&material, arena, uv, vertex_color);

            Sample {
                hit_code: if hit.back_face { HitCode::BackFace } else { HitCode::FrontFace },
                point,
                t: hit.t,
                normal,
                albedo,
                untextured_color: vertex_color,
                surface_dot: ray.direction.dot(&normal),
                material: tri.material,
                model_index: hit.model_index,
            }
        }
        None => sky_sample(ray.direction.normalize(), color(0.4, 0.6, 0.9, 1.0), ray.max_t),
    }
}

/// The four fixed sub-pixel offsets for `SubSampleMode::Fixed4`.
const FIXED4_OFFSETS: [(f64, f64); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// Renders one pixel's final (gamma-encoded) color by averaging over the
/// configured sub-sample pattern. Each sample seeds its own `SmallRng` from
/// `mix_seed(frame_index, tile_index, px, py, sample_index)`, so the result
/// is a pure function of those five coordinates — independent of tile
/// shape, thread count or dispatch order. `Single`/`Fixed4` don't consume
/// the RNG at all; only `SubSampleMode::Stochastic`'s jitter does.
pub fn render_pixel(
    scene: &Scene,
    arena: &ResourceArena,
    config: &RenderConfig,
    view: &View,
    frame_index: u64,
    tile_index: u64,
    px: u32,
    py: u32,
) -> crate::math::Color {
    let width = view.target_size.width as f64;
    let height = view.target_size.height as f64;

    let mut accum = color(0.0, 0.0, 0.0, 0.0);
    let sample_count = config.sub_sample_mode.sample_count();

    for sample_index in 0..sample_count {
        let mut rng = SmallRng::seed_from_u64(mix_seed(frame_index, tile_index, px, py, sample_index));

        let (ox, oy) = match config.sub_sample_mode {
            crate::config::SubSampleMode::Single => (0.5, 0.5),
            crate::config::SubSampleMode::Fixed4 => FIXED4_OFFSETS[sample_index as usize % 4],
            crate::config::SubSampleMode::Stochastic(_) => (rng.random::<f64>(), rng.random::<f64>()),
        };

        let uv = Vec2::new((px as f64 + ox) / width, (py as f64 + oy) / height);
        let ray = view.camera.view_ray(uv, config.max_t);
        let sample = trace_ray(scene, arena, config, &ray, 0, &mut rng);
        accum += sample;
    }

    let averaged = accum / sample_count as f32;
    crate::math::color::linear_to_srgb(saturate_color(averaged))
}

fn saturate_color(c: crate::math::Color) -> crate::math::Color {
    color(
        saturate(c.x as f64) as f32,
        saturate(c.y as f64) as f32,
        saturate(c.z as f64) as f32,
        saturate(c.w as f64) as f32,
    )
}

/// Mixes a tile/frame seed with a per-sample coordinate into a 64-bit seed
/// for a fresh `SmallRng`, keeping RNG state out of shared memory instead
/// of a single shared generator.
pub fn mix_seed(frame_index: u64, tile_index: u64, px: u32, py: u32, sample_index: u32) -> u64 {
    let mut h = frame_index
        .wrapping_mul(0x9E3779B97F4A7C15)
        .wrapping_add(tile_index.wrapping_mul(0xC2B2AE3D27D4EB4F));
    h ^= (px as u64).wrapping_mul(0xBF58476D1CE4E5B9);
    h ^= (py as u64).wrapping_mul(0x94D049BB133111EB);
    h ^= (sample_index as u64).wrapping_mul(0xD6E8FEB86659FD93);
    h ^ (h >> 31)
}
