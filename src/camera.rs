//! Camera & view (C4): view/perspective matrices and pixel -> primary ray
//! construction.

use crate::geometry::ray::Ray;
use crate::math::{Mat4, Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub fov_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(origin: Vec3, forward: Vec3, right: Vec3, up: Vec3, fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Camera {
        Camera {
            origin,
            forward: forward.normalize(),
            right: right.normalize(),
            up: up.normalize(),
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn look_at(origin: Vec3, target: Vec3, world_up: Vec3, fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Camera {
        let forward = (target - origin).normalize();
        let right = forward.cross(&world_up).normalize();
        let up = right.cross(&forward).normalize();
        Camera::new(origin, forward, right, up, fov_degrees, aspect, near, far)
    }

    pub fn to_view_matrix(&self) -> Mat4 {
        // Right-handed, +Z up world space: rows are the basis vectors, with
        // -forward as the look axis so it matches a conventional RH view.
        let r = self.right;
        let u = self.up;
        let f = self.forward;

        Mat4::new(
            r.x, r.y, r.z, -r.dot(&self.origin),
            u.x, u.y, u.z, -u.dot(&self.origin),
            -f.x, -f.y, -f.z, f.dot(&self.origin),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn to_perspective_matrix(&self) -> Mat4 {
        let fov_rad = self.fov_degrees.to_radians();
        let f = 1.0 / (fov_rad / 2.0).tan();
        let (near, far) = (self.near, self.far);

        Mat4::new(
            f / self.aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (far + near) / (near - far), (2.0 * far * near) / (near - far),
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Builds a primary ray through normalized image-plane coordinates `uv`
    /// in `[0, 1]^2`, with `(0.5, 0.5)` at the image center.
    pub fn view_ray(&self, uv: Vec2, max_t: f64) -> Ray {
        let fov_rad = self.fov_degrees.to_radians();
        let half_height = (fov_rad / 2.0).tan();
        let half_width = half_height * self.aspect;

        let px = (uv.x * 2.0 - 1.0) * half_width;
        let py = (1.0 - uv.y * 2.0) * half_height;

        let direction = (self.forward + px * self.right + py * self.up).normalize();
        Ray::new(self.origin, direction, max_t)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[derive(Clone, Copy)]
pub struct View {
    pub camera: Camera,
    pub view_matrix: Mat4,
    pub proj_matrix: Mat4,
    pub proj_view_matrix: Mat4,
    pub target_size: Resolution,
}

impl View {
    pub fn new(camera: Camera, target_size: Resolution) -> View {
        let view_matrix = camera.to_view_matrix();
        let proj_matrix = camera.to_perspective_matrix();
        View {
            camera,
            view_matrix,
            proj_matrix,
            proj_view_matrix: proj_matrix * view_matrix,
            target_size,
        }
    }
}
