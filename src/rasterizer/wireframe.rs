//! Debug overlays: Bresenham line rasterization for triangle-edge
//! wireframes, world-axis gizmos, and AABB/octree-cube outlines.

use crate::camera::View;
use crate::image_grid::ImageGrid;
use crate::math::{color, Color, Vec3, Vec4};

fn project_to_screen(v: Vec3, view: &View) -> Option<(i64, i64)> {
    let clip = view.proj_view_matrix * Vec4::new(v.x, v.y, v.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let width = view.target_size.width as f64;
    let height = view.target_size.height as f64;
    let sx = ((ndc_x * 0.5 + 0.5) * width) as i64;
    let sy = ((1.0 - (ndc_y * 0.5 + 0.5)) * height) as i64;
    Some((sx, sy))
}

/// Bresenham line rasterization, clipped to the grid bounds.
pub fn draw_line(grid: &mut ImageGrid<Color>, mut x0: i64, mut y0: i64, x1: i64, y1: i64, c: Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let width = grid.width() as i64;
    let height = grid.height() as i64;

    loop {
        if x0 >= 0 && x0 < width && y0 >= 0 && y0 < height {
            grid.set(x0 as u32, y0 as u32, c);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a triangle's three edges as lines, skipping any edge with a
/// vertex behind the near plane.
pub fn draw_triangle_edges(grid: &mut ImageGrid<Color>, view: &View, v0: Vec3, v1: Vec3, v2: Vec3, c: Color) {
    let pts = [project_to_screen(v0, view), project_to_screen(v1, view), project_to_screen(v2, view)];
    for &(a, b) in &[(0, 1), (1, 2), (2, 0)] {
        if let (Some((ax, ay)), Some((bx, by))) = (pts[a], pts[b]) {
            draw_line(grid, ax, ay, bx, by, c);
        }
    }
}

/// Draws the 12 edges of an axis-aligned box.
pub fn draw_aabb_cube(grid: &mut ImageGrid<Color>, view: &View, min: Vec3, max: Vec3, c: Color) {
    let corners = [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ];

    const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];

    let projected: Vec<Option<(i64, i64)>> = corners.iter().map(|&p| project_to_screen(p, view)).collect();
    for &(a, b) in &EDGES {
        if let (Some((ax, ay)), Some((bx, by))) = (projected[a], projected[b]) {
            draw_line(grid, ax, ay, bx, by, c);
        }
    }
}

/// Draws red/green/blue gizmo lines for the world X/Y/Z axes from the
/// origin out to `length`.
pub fn draw_world_axes(grid: &mut ImageGrid<Color>, view: &View, length: f64) {
    let origin = Vec3::new(0.0, 0.0, 0.0);
    let axes = [
        (Vec3::new(length, 0.0, 0.0), color(1.0, 0.0, 0.0, 1.0)),
        (Vec3::new(0.0, length, 0.0), color(0.0, 1.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, length), color(0.0, 0.0, 1.0, 1.0)),
    ];

    if let Some((ox, oy)) = project_to_screen(origin, view) {
        for (tip, c) in axes {
            if let Some((tx, ty)) = project_to_screen(tip, view) {
                draw_line(grid, ox, oy, tx, ty, c);
            }
        }
    }
}

/// Walks an octree and draws every node's AABB, used for the debug
/// "show acceleration structure" overlay.
pub fn draw_octree(grid: &mut ImageGrid<Color>, view: &View, tree: &crate::geometry::octree::Octree, c: Color) {
    draw_aabb_cube(grid, view, tree.aabb().min, tree.aabb().max, c);
    for child in tree.children() {
        draw_octree(grid, view, child, c);
    }
}
