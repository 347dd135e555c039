//! End-to-end scenarios rendering small scenes fully in-process, one per
//! concrete case called out for the ray tracer and rasterizer together.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use hybrid_renderer::camera::{Camera, Resolution, View};
use hybrid_renderer::config::{RenderConfig, SubSampleMode};
use hybrid_renderer::geometry::model::{Model, ModelInstance};
use hybrid_renderer::geometry::vertex::Vertex;
use hybrid_renderer::image_grid::ImageGrid;
use hybrid_renderer::math::{color, Color, Mat4, Vec2, Vec3};
use hybrid_renderer::rasterizer::rasterize_scene;
use hybrid_renderer::raytracer::{render_pixel, sample_ray, trace_ray};
use hybrid_renderer::resources::material::Material;
use hybrid_renderer::resources::ResourceArena;
use hybrid_renderer::scene::{Light, Scene};
use hybrid_renderer::shading::HitCode;

fn vertex(p: Vec3, n: Vec3) -> Vertex {
    Vertex::new(p, n, Vec2::new(0.0, 0.0), Color::new(1.0, 1.0, 1.0, 1.0))
}

fn front_camera(resolution: Resolution) -> View {
    let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 90.0, resolution.aspect(), 0.1, 1000.0);
    View::new(camera, resolution)
}

/// Triangulated UV sphere of unit radius centered at the origin, used as a
/// shared primitive for the rasterizer/ray-tracer silhouette-agreement case
/// (no sphere primitive or mesh loader fixture is otherwise available).
fn unit_sphere_model(arena: &mut ResourceArena, stacks: u32, slices: u32) -> Model {
    let mut vertices = Vec::new();
    for i in 0..=stacks {
        let phi = std::f64::consts::PI * (i as f64) / (stacks as f64);
        for j in 0..=slices {
            let theta = 2.0 * std::f64::consts::PI * (j as f64) / (slices as f64);
            let x = phi.sin() * theta.cos();
            let y = phi.cos();
            let z = phi.sin() * theta.sin();
            let p = Vec3::new(x, y, z);
            vertices.push(vertex(p, p));
        }
    }

    let mut indices = Vec::new();
    let row = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            indices.push(a);
            indices.push(b);
            indices.push(a + 1);
            indices.push(a + 1);
            indices.push(b);
            indices.push(b + 1);
        }
    }

    let vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb, vertices);
    let ib = arena.alloc_index_buffer();
    let ib_end = indices.len();
    arena.set_index_buffer(ib, indices);

    Model { vertex_buffer: vb, index_buffer: ib, ib_start: 0, ib_end }
}

#[test]
fn empty_scene_resolves_to_sky_gradient_at_center_and_horizon() {
    let scene = Scene::new();
    let arena = ResourceArena::new();
    let config = RenderConfig::default();

    let resolution = Resolution { width: 64, height: 64 };
    let view = front_camera(resolution);

    let mut rng = SmallRng::seed_from_u64(1);

    let center_ray = view.camera.view_ray(Vec2::new(0.5, 0.5), config.max_t);
    let center = trace_ray(&scene, &arena, &config, &center_ray, 0, &mut rng);
    assert!(center.z > center.x, "center of an empty scene should read mostly blue sky, got {:?}", center);

    let horizon_ray = view.camera.view_ray(Vec2::new(0.5, 0.0), config.max_t);
    let horizon = trace_ray(&scene, &arena, &config, &horizon_ray, 0, &mut rng);
    assert!(horizon.x > 0.9 && horizon.y > 0.9 && horizon.z > 0.9, "the horizon direction should read near-white, got {:?}", horizon);
}

#[test]
fn single_lit_triangle_shades_near_white_at_centroid() {
    let mut arena = ResourceArena::new();
    let material = arena.store_material(Material {
        ka: Color::new(1.0, 1.0, 1.0, 1.0),
        kd: Color::new(0.9, 0.9, 0.9, 1.0),
        ks: Color::new(0.0, 0.0, 0.0, 1.0),
        ..Material::default()
    });

    let n = Vec3::new(0.0, 0.0, 1.0);
    let vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb, vec![
        vertex(Vec3::new(-1.0, -1.0, 0.0), n),
        vertex(Vec3::new(1.0, -1.0, 0.0), n),
        vertex(Vec3::new(0.0, 1.0, 0.0), n),
    ]);
    let ib = arena.alloc_index_buffer();
    arena.set_index_buffer(ib, vec![0, 1, 2]);
    let model = Model { vertex_buffer: vb, index_buffer: ib, ib_start: 0, ib_end: 3 };

    let config = RenderConfig { use_shadows: false, ..RenderConfig::default() };
    let instance = ModelInstance::create(&arena, &model, Mat4::identity(), material, true, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(instance);
    scene.add_light(Light { position: Vec3::new(0.0, 0.0, 10.0), intensity: Vec3::new(1.0, 1.0, 1.0) });

    let centroid = Vec3::new(0.0, -1.0 / 3.0, 0.0);
    let ray = hybrid_renderer::geometry::ray::Ray::new(Vec3::new(0.0, -1.0 / 3.0, 5.0), Vec3::new(0.0, 0.0, -1.0), config.max_t);

    let sample = sample_ray(&scene, &arena, &config, &ray);
    assert_eq!(sample.hit_code, HitCode::FrontFace);
    assert!((sample.point - centroid).norm() < 1e-6);

    let mut rng = SmallRng::seed_from_u64(1);
    let shaded = trace_ray(&scene, &arena, &config, &ray, 0, &mut rng);
    assert!(shaded.x > 0.8 && shaded.y > 0.8 && shaded.z > 0.8, "expected a near-white shaded value, got {:?}", shaded);
}

#[test]
fn pixel_beneath_a_blocker_receives_only_ambient_light() {
    let mut arena = ResourceArena::new();
    let material = arena.store_material(Material::default());

    let ground_n = Vec3::new(0.0, 1.0, 0.0);
    let ground_vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(ground_vb, vec![
        vertex(Vec3::new(-10.0, 0.0, -10.0), ground_n),
        vertex(Vec3::new(10.0, 0.0, -10.0), ground_n),
        vertex(Vec3::new(10.0, 0.0, 10.0), ground_n),
        vertex(Vec3::new(-10.0, 0.0, 10.0), ground_n),
    ]);
    let ground_ib = arena.alloc_index_buffer();
    arena.set_index_buffer(ground_ib, vec![0, 2, 1, 0, 3, 2]);
    let ground_model = Model { vertex_buffer: ground_vb, index_buffer: ground_ib, ib_start: 0, ib_end: 6 };

    // The blocker is closed (top + bottom layers, wound opposite ways) so
    // the upward shadow ray from the ground sees a front face no matter
    // which layer it reaches first.
    let blocker_up = Vec3::new(0.0, 1.0, 0.0);
    let blocker_down = -blocker_up;
    let blocker_vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(blocker_vb, vec![
        vertex(Vec3::new(-1.0, 0.0, -1.0), blocker_up),
        vertex(Vec3::new(1.0, 0.0, -1.0), blocker_up),
        vertex(Vec3::new(1.0, 0.0, 1.0), blocker_up),
        vertex(Vec3::new(-1.0, 0.0, 1.0), blocker_up),
        vertex(Vec3::new(-1.0, 0.0, -1.0), blocker_down),
        vertex(Vec3::new(1.0, 0.0, -1.0), blocker_down),
        vertex(Vec3::new(1.0, 0.0, 1.0), blocker_down),
        vertex(Vec3::new(-1.0, 0.0, 1.0), blocker_down),
    ]);
    let blocker_ib = arena.alloc_index_buffer();
    arena.set_index_buffer(blocker_ib, vec![0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7]);
    let blocker_model = Model { vertex_buffer: blocker_vb, index_buffer: blocker_ib, ib_start: 0, ib_end: 12 };

    let config = RenderConfig { use_shadows: true, ..RenderConfig::default() };
    let ground = ModelInstance::create(&arena, &ground_model, Mat4::identity(), material, true, config.octree_leaf_max, config.octree_max_depth);
    let blocker_transform = Mat4::new_translation(&Vec3::new(0.0, 3.0, 0.0));
    let blocker = ModelInstance::create(&arena, &blocker_model, blocker_transform, material, true, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(ground);
    scene.add_model(blocker);
    scene.add_light(Light { position: Vec3::new(0.0, 8.0, 0.0), intensity: Vec3::new(1.0, 1.0, 1.0) });

    // Origin sits below the blocker (y = 2 < 3) so the primary ray reaches
    // the ground directly beneath it without ever crossing the blocker's
    // plane; only the shadow ray (ground point toward the light) has to
    // pass through the blocker.
    let shadowed_ray = hybrid_renderer::geometry::ray::Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0), config.max_t);
    let mut rng = SmallRng::seed_from_u64(1);
    let shaded = trace_ray(&scene, &arena, &config, &shadowed_ray, 0, &mut rng);

    let expected = config.ambient_light as f32;
    assert!((shaded.x - expected).abs() < 1e-4, "expected ambient-only {}, got {:?}", expected, shaded);
    assert!((shaded.y - expected).abs() < 1e-4);
    assert!((shaded.z - expected).abs() < 1e-4);
}

#[test]
fn mirror_recursion_is_bounded_and_terminates() {
    let mut arena = ResourceArena::new();
    let mirror = arena.store_material(Material { tr: 0.8, ..Material::default() });

    let n = Vec3::new(0.0, 0.0, 1.0);
    let wall = |z: f64, flip: bool| {
        let normal = if flip { -n } else { n };
        vec![
            vertex(Vec3::new(-5.0, -5.0, z), normal),
            vertex(Vec3::new(5.0, -5.0, z), normal),
            vertex(Vec3::new(5.0, 5.0, z), normal),
            vertex(Vec3::new(-5.0, 5.0, z), normal),
        ]
    };

    let vb_a = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb_a, wall(-5.0, false));
    let ib_a = arena.alloc_index_buffer();
    arena.set_index_buffer(ib_a, vec![0, 1, 2, 0, 2, 3]);
    let model_a = Model { vertex_buffer: vb_a, index_buffer: ib_a, ib_start: 0, ib_end: 6 };

    let vb_b = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb_b, wall(5.0, true));
    let ib_b = arena.alloc_index_buffer();
    arena.set_index_buffer(ib_b, vec![0, 1, 2, 0, 2, 3]);
    let model_b = Model { vertex_buffer: vb_b, index_buffer: ib_b, ib_start: 0, ib_end: 6 };

    let config = RenderConfig { max_bounces: 4, use_reflection: true, use_shadows: false, ..RenderConfig::default() };
    let instance_a = ModelInstance::create(&arena, &model_a, Mat4::identity(), mirror, false, config.octree_leaf_max, config.octree_max_depth);
    let instance_b = ModelInstance::create(&arena, &model_b, Mat4::identity(), mirror, false, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(instance_a);
    scene.add_model(instance_b);
    scene.add_light(Light { position: Vec3::new(0.0, 3.0, 0.0), intensity: Vec3::new(1.0, 1.0, 1.0) });

    let ray = hybrid_renderer::geometry::ray::Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), config.max_t);
    let mut rng = SmallRng::seed_from_u64(1);
    let result = trace_ray(&scene, &arena, &config, &ray, 0, &mut rng);

    assert!(result.x.is_finite() && result.y.is_finite() && result.z.is_finite());
    let bound = 0.8f32.powi(4) + 0.05;
    assert!(result.x <= bound && result.y <= bound && result.z <= bound, "reflected energy should decay within the bounce budget, got {:?}", result);
}

#[test]
fn fixed4_sampling_renders_byte_identical_frames_across_two_passes() {
    let mut arena = ResourceArena::new();
    let material = arena.store_material(Material::default());
    let n = Vec3::new(0.0, 0.0, 1.0);
    let vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb, vec![
        vertex(Vec3::new(-1.0, -1.0, 0.0), n),
        vertex(Vec3::new(1.0, -1.0, 0.0), n),
        vertex(Vec3::new(0.0, 1.0, 0.0), n),
    ]);
    let ib = arena.alloc_index_buffer();
    arena.set_index_buffer(ib, vec![0, 1, 2]);
    let model = Model { vertex_buffer: vb, index_buffer: ib, ib_start: 0, ib_end: 3 };

    let config = RenderConfig { render_width: 24, render_height: 24, sub_sample_mode: SubSampleMode::Fixed4, ..RenderConfig::default() };
    let instance = ModelInstance::create(&arena, &model, Mat4::identity(), material, true, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(instance);
    scene.add_light(Light { position: Vec3::new(0.0, 0.0, 10.0), intensity: Vec3::new(1.0, 1.0, 1.0) });

    let resolution = Resolution { width: config.render_width, height: config.render_height };
    let view = front_camera(resolution);

    let render_frame = || {
        let mut grid = ImageGrid::filled(config.render_width, config.render_height, color(0.0, 0.0, 0.0, 0.0));
        for py in 0..config.render_height {
            for px in 0..config.render_width {
                grid.set(px, py, render_pixel(&scene, &arena, &config, &view, 0, 0, px, py));
            }
        }
        grid
    };

    let first = render_frame();
    let second = render_frame();

    for py in 0..config.render_height {
        for px in 0..config.render_width {
            assert_eq!(first.get(px, py), second.get(px, py), "pixel ({px}, {py}) differed between passes");
        }
    }
}

#[test]
fn rasterizer_and_raytracer_agree_on_unit_sphere_silhouette() {
    let mut arena = ResourceArena::new();
    let material = arena.store_material(Material::default());
    let model = unit_sphere_model(&mut arena, 24, 24);

    let config = RenderConfig { render_width: 80, render_height: 80, use_shadows: false, ..RenderConfig::default() };
    let instance = ModelInstance::create(&arena, &model, Mat4::identity(), material, true, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(instance);
    scene.add_light(Light { position: Vec3::new(0.0, 5.0, 5.0), intensity: Vec3::new(1.0, 1.0, 1.0) });

    let resolution = Resolution { width: config.render_width, height: config.render_height };
    let camera = Camera::look_at(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 50.0, resolution.aspect(), 0.1, 100.0);
    let view = View::new(camera, resolution);

    let mut color_buffer = ImageGrid::filled(config.render_width, config.render_height, color(0.0, 0.0, 0.0, 0.0));
    let mut depth_buffer = ImageGrid::filled(config.render_width, config.render_height, 1.0f32);
    rasterize_scene(&scene, &arena, &config, &view, &mut color_buffer, &mut depth_buffer);

    let mut agree = 0u32;
    let mut total = 0u32;
    for py in 0..config.render_height {
        for px in 0..config.render_width {
            let uv = Vec2::new((px as f64 + 0.5) / config.render_width as f64, (py as f64 + 0.5) / config.render_height as f64);
            let ray = view.camera.view_ray(uv, config.max_t);
            let sample = sample_ray(&scene, &arena, &config, &ray);
            let traced_hit = sample.hit_code == HitCode::FrontFace || sample.hit_code == HitCode::BackFace;
            let rasterized_hit = *depth_buffer.get(px, py) < 1.0;

            total += 1;
            if traced_hit == rasterized_hit {
                agree += 1;
            }
        }
    }

    let ratio = agree as f64 / total as f64;
    assert!(ratio >= 0.99, "silhouette agreement too low: {ratio}");
}
