//! CLI entry point: builds a demo scene, renders it with both the ray
//! tracer and the rasterizer, and writes every output bitmap to
//! `output/`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use hybrid_renderer::camera::{Camera, Resolution, View};
use hybrid_renderer::config::RenderConfig;
use hybrid_renderer::geometry::ray::Ray;
use hybrid_renderer::image_grid::bmp::{write_bmp, write_gray_bmp};
use hybrid_renderer::image_grid::ImageGrid;
use hybrid_renderer::math::{color, Color, Vec3};
use hybrid_renderer::rasterizer::wireframe::{draw_aabb_cube, draw_triangle_edges, draw_world_axes};
use hybrid_renderer::rasterizer::rasterize_scene;
use hybrid_renderer::raytracer::sample_ray;
use hybrid_renderer::scenes;
use hybrid_renderer::scheduler::render_frame_tiled;

/// Three canonical debug views, matching the original tool's
/// `SetupFrontView`/`SetupTopView`/`SetupSideView`.
fn front_view(resolution: Resolution) -> View {
    let camera = Camera::look_at(Vec3::new(0.0, -26.0, 6.0), Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 1.0), 60.0, resolution.aspect(), 0.1, 10_000.0);
    View::new(camera, resolution)
}

fn top_view(resolution: Resolution) -> View {
    let camera = Camera::look_at(Vec3::new(0.0, 0.0, 30.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 60.0, resolution.aspect(), 0.1, 10_000.0);
    View::new(camera, resolution)
}

fn side_view(resolution: Resolution) -> View {
    let camera = Camera::look_at(Vec3::new(26.0, 0.0, 6.0), Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 1.0), 60.0, resolution.aspect(), 0.1, 10_000.0);
    View::new(camera, resolution)
}

fn write_output(grid: &ImageGrid<Color>, dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Err(e) = write_bmp(grid, &path) {
        log::warn!("failed to write {}: {e}", path.display());
    }
}

/// Renders the two per-pixel debug buffers (`dbgDiffuse.bmp`,
/// `dbgNormal.bmp`) by re-sampling the scene at every pixel without full
/// shading, matching the original tool's `dbg.diffuse`/`dbg.normal`.
fn render_debug_buffers(
    scene: &hybrid_renderer::scene::Scene,
    arena: &hybrid_renderer::resources::ResourceArena,
    config: &RenderConfig,
    view: &View,
) -> (ImageGrid<Color>, ImageGrid<Color>) {
    let mut diffuse = ImageGrid::filled(config.render_width, config.render_height, color(1.0, 0.0, 0.0, 1.0));
    let mut normal = ImageGrid::filled(config.render_width, config.render_height, color(1.0, 1.0, 1.0, 1.0));

    for py in 0..config.render_height {
        for px in 0..config.render_width {
            let uv = hybrid_renderer::math::Vec2::new(
                (px as f64 + 0.5) / config.render_width as f64,
                (py as f64 + 0.5) / config.render_height as f64,
            );
            let ray: Ray = view.camera.view_ray(uv, config.max_t);
            let sample = sample_ray(scene, arena, config, &ray);

            diffuse.set(px, py, color((-sample.surface_dot) as f32, (-sample.surface_dot) as f32, (-sample.surface_dot) as f32, 1.0));
            let n = 0.5 * sample.normal + Vec3::new(0.5, 0.5, 0.5);
            normal.set(px, py, color(n.x as f32, n.y as f32, n.z as f32, 1.0));
        }
    }

    (diffuse, normal)
}

/// Draws a wireframe pass over `view`: every triangle's edges, plus
/// optional world-axis and per-instance AABB overlays when enabled.
fn render_wireframe(scene: &hybrid_renderer::scene::Scene, config: &RenderConfig, view: &View) -> ImageGrid<Color> {
    let mut grid = ImageGrid::filled(config.render_width, config.render_height, color(0.75, 0.75, 0.75, 1.0));

    for instance in &scene.models {
        for tri in &instance.tri_cache {
            draw_triangle_edges(&mut grid, view, tri.v0.position, tri.v1.position, tri.v2.position, color(0.0, 0.0, 0.0, 1.0));
        }
        if config.draw_aabb {
            draw_aabb_cube(&mut grid, view, instance.aabb.min, instance.aabb.max, color(1.0, 0.5, 0.0, 1.0));
        }
    }
    draw_world_axes(&mut grid, view, 4.0);

    grid
}

fn main() {
    env_logger::init();
    log::info!("running raytracer/rasterizer");

    let output_dir = PathBuf::from("output");
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        log::error!("could not create output directory: {e}");
        return;
    }

    let config = RenderConfig::default();

    let load_timer = Instant::now();
    let (scene, arena) = scenes::showcase(&config);
    log::info!("load time: {:.2}ms", load_timer.elapsed().as_secs_f64() * 1000.0);

    let resolution = Resolution { width: config.render_width, height: config.render_height };
    let camera_view = front_view(resolution);

    if config.use_raytrace {
        let trace_timer = Instant::now();
        let frame_buffer = render_frame_tiled(&scene, &arena, &config, &camera_view, 0);
        log::info!("trace time: {:.2}ms", trace_timer.elapsed().as_secs_f64() * 1000.0);
        write_output(&frame_buffer, &output_dir, "_frameBuffer_0.bmp");

        let (dbg_diffuse, dbg_normal) = render_debug_buffers(&scene, &arena, &config, &camera_view);
        write_output(&dbg_diffuse, &output_dir, "dbgDiffuse.bmp");
        write_output(&dbg_normal, &output_dir, "dbgNormal.bmp");
    }

    if config.use_rasterize {
        let mut color_buffer = ImageGrid::filled(config.render_width, config.render_height, hybrid_renderer::math::color::BLACK);
        let mut depth_buffer = ImageGrid::filled(config.render_width, config.render_height, 1.0f32);
        rasterize_scene(&scene, &arena, &config, &camera_view, &mut color_buffer, &mut depth_buffer);
        write_output(&color_buffer, &output_dir, "colorBuffer.bmp");

        let normalized_depth = depth_buffer.normalized();
        if let Err(e) = write_gray_bmp(&normalized_depth, &output_dir.join("depthBuffer.bmp")) {
            log::warn!("failed to write depthBuffer.bmp: {e}");
        }
        if let Err(e) = write_gray_bmp(&depth_buffer, &output_dir.join("_zbuffer.bmp")) {
            log::warn!("failed to write _zbuffer.bmp: {e}");
        }
    }

    if config.draw_wireframe {
        let front = render_wireframe(&scene, &config, &camera_view);
        write_output(&front, &output_dir, "dbgWireframe.bmp");

        let top = render_wireframe(&scene, &config, &top_view(resolution));
        write_output(&top, &output_dir, "dbgTopWire.bmp");

        let side = render_wireframe(&scene, &config, &side_view(resolution));
        write_output(&side, &output_dir, "dbgSideWire.bmp");
    }

    log::info!("raytrace finished");
}
