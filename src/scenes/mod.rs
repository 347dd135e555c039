//! Hand-built demo scenes, mirroring `BuildScene`/`CreateMaterials` in the
//! original tool: a lone lit triangle, a shadow-casting pair of planes, and
//! a mirror-walled box. Used by `src/bin/render.rs` and the end-to-end
//! integration tests.

use crate::geometry::model::{Model, ModelInstance};
use crate::geometry::vertex::Vertex;
use crate::math::{Color, Mat4, Vec2, Vec3};
use crate::resources::arena::ResourceArena;
use crate::resources::material::Material;
use crate::scene::{Light, Scene};

fn vertex(p: Vec3, n: Vec3) -> Vertex {
    Vertex::new(p, n, Vec2::new(0.0, 0.0), Color::new(1.0, 1.0, 1.0, 1.0))
}

/// Builds a quad (four triangles: two coincident pairs wound opposite ways)
/// spanning `[-half, half]` in `x`/`z` at `y = 0`. Every instance here is
/// used both as a camera-visible surface and as a shadow-ray occluder with
/// `cull_backfaces = true`; a single-sided quad would let a shadow ray
/// approaching from its back pass straight through, so the quad is closed
/// with a second, oppositely-wound layer facing `-Y` — whichever side a ray
/// approaches from, one of the two layers presents a front face.
fn quad_model(arena: &mut ResourceArena, half: f64) -> Model {
    let up = Vec3::new(0.0, 1.0, 0.0);
    let down = -up;
    let vertices = vec![
        vertex(Vec3::new(-half, 0.0, -half), up),
        vertex(Vec3::new(half, 0.0, -half), up),
        vertex(Vec3::new(half, 0.0, half), up),
        vertex(Vec3::new(-half, 0.0, half), up),
        vertex(Vec3::new(-half, 0.0, -half), down),
        vertex(Vec3::new(half, 0.0, -half), down),
        vertex(Vec3::new(half, 0.0, half), down),
        vertex(Vec3::new(-half, 0.0, half), down),
    ];
    let indices = vec![0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7];

    let vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb, vertices);
    let ib = arena.alloc_index_buffer();
    let ib_end = indices.len();
    arena.set_index_buffer(ib, indices);

    Model { vertex_buffer: vb, index_buffer: ib, ib_start: 0, ib_end }
}

/// A single triangle centered at the origin in the `z = 0` plane, closed
/// with a back-facing twin so it casts shadows regardless of which side a
/// shadow ray approaches it from (see `quad_model`).
fn single_triangle_model(arena: &mut ResourceArena) -> Model {
    let front = Vec3::new(0.0, 0.0, -1.0);
    let back = -front;
    let vertices = vec![
        vertex(Vec3::new(-1.0, -1.0, 0.0), front),
        vertex(Vec3::new(0.0, 1.0, 0.0), front),
        vertex(Vec3::new(1.0, -1.0, 0.0), front),
        vertex(Vec3::new(-1.0, -1.0, 0.0), back),
        vertex(Vec3::new(0.0, 1.0, 0.0), back),
        vertex(Vec3::new(1.0, -1.0, 0.0), back),
    ];
    let indices = vec![0, 1, 2, 3, 5, 4];

    let vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb, vertices);
    let ib = arena.alloc_index_buffer();
    let ib_end = indices.len();
    arena.set_index_buffer(ib, indices);

    Model { vertex_buffer: vb, index_buffer: ib, ib_start: 0, ib_end }
}

fn diffuse_material() -> Material {
    Material { ka: Color::new(1.0, 1.0, 1.0, 1.0), kd: Color::new(1.0, 1.0, 1.0, 1.0), ks: Color::new(0.0, 0.0, 0.0, 1.0), tr: 0.0, ..Material::default() }
}

fn mirror_material() -> Material {
    Material { ka: Color::new(1.0, 1.0, 1.0, 1.0), kd: Color::new(1.0, 1.0, 1.0, 1.0), ks: Color::new(1.0, 1.0, 1.0, 1.0), tr: 0.8, ..Material::default() }
}

/// A single diffuse, front-facing triangle lit by one light. The smallest
/// scene that exercises the ray tracer's shading path end to end.
pub fn single_triangle(config: &crate::config::RenderConfig) -> (Scene, ResourceArena) {
    let mut arena = ResourceArena::new();
    let material = arena.store_material(diffuse_material());
    let model = single_triangle_model(&mut arena);
    let instance = ModelInstance::create(&arena, &model, Mat4::identity(), material, true, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(instance);
    scene.add_light(Light { position: Vec3::new(0.0, 1.0, -5.0), intensity: Vec3::new(1.0, 1.0, 1.0) });
    (scene, arena)
}

/// A ground quad and a small raised "blocker" quad between the ground and
/// a light, so a point on the ground directly under the blocker falls in
/// shadow while the rest of the ground is lit.
pub fn shadow_casting_planes(config: &crate::config::RenderConfig) -> (Scene, ResourceArena) {
    let mut arena = ResourceArena::new();
    let material = arena.store_material(diffuse_material());

    let ground_model = quad_model(&mut arena, 10.0);
    let ground = ModelInstance::create(&arena, &ground_model, Mat4::identity(), material, true, config.octree_leaf_max, config.octree_max_depth);

    let blocker_model = quad_model(&mut arena, 1.0);
    let blocker_transform = Mat4::new_translation(&Vec3::new(0.0, 3.0, 0.0));
    let blocker = ModelInstance::create(&arena, &blocker_model, blocker_transform, material, true, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(ground);
    scene.add_model(blocker);
    scene.add_light(Light { position: Vec3::new(0.0, 8.0, 0.0), intensity: Vec3::new(1.0, 1.0, 1.0) });
    (scene, arena)
}

/// Two parallel mirror walls facing each other, producing bounded
/// recursive reflection that must terminate within `max_bounces`.
pub fn mirror_hallway(config: &crate::config::RenderConfig) -> (Scene, ResourceArena) {
    let mut arena = ResourceArena::new();
    let mirror = arena.store_material(mirror_material());

    let wall_vertices = |n: Vec3| {
        vec![
            vertex(Vec3::new(-5.0, -5.0, 0.0), n),
            vertex(Vec3::new(5.0, -5.0, 0.0), n),
            vertex(Vec3::new(5.0, 5.0, 0.0), n),
            vertex(Vec3::new(-5.0, 5.0, 0.0), n),
        ]
    };

    let vb_a = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb_a, wall_vertices(Vec3::new(0.0, 0.0, 1.0)));
    let ib_a = arena.alloc_index_buffer();
    arena.set_index_buffer(ib_a, vec![0, 1, 2, 0, 2, 3]);
    let wall_a = Model { vertex_buffer: vb_a, index_buffer: ib_a, ib_start: 0, ib_end: 6 };
    let transform_a = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0));
    let instance_a = ModelInstance::create(&arena, &wall_a, transform_a, mirror, false, config.octree_leaf_max, config.octree_max_depth);

    let vb_b = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb_b, wall_vertices(Vec3::new(0.0, 0.0, -1.0)));
    let ib_b = arena.alloc_index_buffer();
    arena.set_index_buffer(ib_b, vec![0, 2, 1, 0, 3, 2]);
    let wall_b = Model { vertex_buffer: vb_b, index_buffer: ib_b, ib_start: 0, ib_end: 6 };
    let transform_b = Mat4::new_translation(&Vec3::new(0.0, 0.0, 5.0));
    let instance_b = ModelInstance::create(&arena, &wall_b, transform_b, mirror, false, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(instance_a);
    scene.add_model(instance_b);
    scene.add_light(Light { position: Vec3::new(0.0, 3.0, 0.0), intensity: Vec3::new(1.0, 1.0, 1.0) });
    (scene, arena)
}

/// The combined demo scene used by the `render` binary: a diffuse ground
/// plane, a raised diffuse triangle, and a mirror wall behind it, lit by
/// two lights. Exercises shadowing, reflection and both material types in
/// one frame, mirroring `BuildScene`'s multi-model composition in the
/// original tool (no external mesh assets are bundled, so geometry is
/// hand-built from the same primitives as the other demo scenes).
pub fn showcase(config: &crate::config::RenderConfig) -> (Scene, ResourceArena) {
    let mut arena = ResourceArena::new();
    let diffuse = arena.store_material(diffuse_material());
    let mirror = arena.store_material(mirror_material());

    let ground_model = quad_model(&mut arena, 12.0);
    let ground = ModelInstance::create(&arena, &ground_model, Mat4::identity(), diffuse, true, config.octree_leaf_max, config.octree_max_depth);

    let triangle_model = single_triangle_model(&mut arena);
    let triangle_transform = Mat4::new_translation(&Vec3::new(0.0, 1.0, 0.0));
    let triangle = ModelInstance::create(&arena, &triangle_model, triangle_transform, diffuse, true, config.octree_leaf_max, config.octree_max_depth);

    let wall_vertices = vec![
        vertex(Vec3::new(-8.0, 0.0, 6.0), Vec3::new(0.0, 0.0, -1.0)),
        vertex(Vec3::new(8.0, 0.0, 6.0), Vec3::new(0.0, 0.0, -1.0)),
        vertex(Vec3::new(8.0, 8.0, 6.0), Vec3::new(0.0, 0.0, -1.0)),
        vertex(Vec3::new(-8.0, 8.0, 6.0), Vec3::new(0.0, 0.0, -1.0)),
    ];
    let wall_vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(wall_vb, wall_vertices);
    let wall_ib = arena.alloc_index_buffer();
    arena.set_index_buffer(wall_ib, vec![0, 1, 2, 0, 2, 3]);
    let wall_model = Model { vertex_buffer: wall_vb, index_buffer: wall_ib, ib_start: 0, ib_end: 6 };
    let wall = ModelInstance::create(&arena, &wall_model, Mat4::identity(), mirror, false, config.octree_leaf_max, config.octree_max_depth);

    let mut scene = Scene::new();
    scene.add_model(ground);
    scene.add_model(triangle);
    scene.add_model(wall);
    scene.add_light(Light { position: Vec3::new(-4.0, 6.0, -4.0), intensity: Vec3::new(0.9, 0.9, 0.9) });
    scene.add_light(Light { position: Vec3::new(4.0, 5.0, -2.0), intensity: Vec3::new(0.5, 0.5, 0.6) });
    (scene, arena)
}
