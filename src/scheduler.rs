//! Tile scheduler (C8): partitions the framebuffer into square tiles and
//! dispatches one ray-tracing job per tile across a worker pool.
//!
//! Each worker gets an exclusive `&mut` slice of the color grid's backing
//! storage via row-major chunking, so the "disjoint rectangle" invariant is
//! enforced by the borrow checker rather than by an unsafe aliasing
//! wrapper.

use std::sync::atomic::{AtomicU32, Ordering};

use scoped_threadpool::Pool;

use crate::camera::View;
use crate::config::RenderConfig;
use crate::image_grid::ImageGrid;
use crate::math::Color;
use crate::raytracer::render_pixel;
use crate::resources::arena::ResourceArena;
use crate::scene::Scene;

/// A horizontal strip of `tile_rows` full-width rows, the unit of work
/// handed to one worker thread. The original tool's square tiles are
/// approximated here as row strips so each job's output is a single
/// contiguous slice of the framebuffer's backing `Vec` (a true 2D tile
/// would straddle multiple rows' non-contiguous spans).
struct RowStrip {
    first_row: u32,
    row_count: u32,
    tile_index: u64,
}

fn plan_strips(height: u32, tile_size: u32) -> Vec<RowStrip> {
    let mut strips = Vec::new();
    let mut row = 0;
    let mut tile_index = 0u64;
    while row < height {
        let row_count = tile_size.min(height - row);
        strips.push(RowStrip { first_row: row, row_count, tile_index });
        row += row_count;
        tile_index += 1;
    }
    strips
}

/// Renders the full frame via the ray tracer, dispatched tile-by-tile
/// across a thread pool sized to `num_cpus::get()`. Each pixel's RNG is
/// seeded from `(frame_index, tile_index, px, py, sample_index)` inside
/// `render_pixel` itself (see `raytracer::mix_seed`), so a pixel's value
/// depends only on its own coordinates and `frame_index` — not on tile
/// shape, worker count, or the order strips happen to complete in.
pub fn render_frame_tiled(scene: &Scene, arena: &ResourceArena, config: &RenderConfig, view: &View, frame_index: u64) -> ImageGrid<Color> {
    let mut color_grid = ImageGrid::filled(config.render_width, config.render_height, crate::math::color::BLACK);
    let strips = plan_strips(config.render_height, config.tile_size);
    let worker_count = num_cpus::get().max(1) as u32;

    log::debug!("dispatching {} row-strips across {} workers", strips.len(), worker_count);

    let row_len = color_grid.row_len();
    let width = config.render_width;
    let total_tiles = strips.len() as u32;
    let completed = AtomicU32::new(0);

    let mut pool = Pool::new(worker_count);
    pool.scoped(|scope| {
        let mut remaining = color_grid.as_mut_slice();
        for strip in &strips {
            let pixel_count = row_len * strip.row_count as usize;
            let (tile_slice, rest) = remaining.split_at_mut(pixel_count);
            remaining = rest;
            let completed = &completed;

            scope.execute(move || {
                for local_y in 0..strip.row_count {
                    let py = strip.first_row + local_y;
                    for px in 0..width {
                        let color = render_pixel(scene, arena, config, view, frame_index, strip.tile_index, px, py);
                        tile_slice[local_y as usize * row_len + px as usize] = color;
                    }
                }
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                log::info!("tile {}/{} complete", done, total_tiles);
            });
        }
    });

    color_grid
}
