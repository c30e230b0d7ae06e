use glam::*;

use crate::ray::Ray;

/// Pinhole camera looking down -z from `origin` at a rectangular window on
/// the plane `z = origin.z - distance`, split into a pixel grid.
pub struct Camera {
    pub origin: Vec3,
    llc: Vec2,
    cell: Vec2,
    distance: f32,
}

impl Camera {
    pub fn new(origin: Vec3, view: Vec2, distance: f32, pixels_w: usize, pixels_h: usize) -> Camera {
        let llc = -view * 0.5;
        let cell = Vec2::new(view.x / pixels_w as f32, view.y / pixels_h as f32);

        return Camera { origin, llc, cell, distance };
    }

    /// Ray through pixel `(x, y)` at `offset` within the cell, where `(0, 0)`
    /// is the cell's lower-left corner and `(1, 1)` its upper-right.
    pub fn create_ray(&self, x: usize, y: usize, offset: Vec2) -> Ray {
        let p = self.llc + (Vec2::new(x as f32, y as f32) + offset) * self.cell;

        return Ray::new(self.origin, Vec3::new(p.x, p.y, -self.distance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pixel_looks_forward() {
        let cam = Camera::new(Vec3::ZERO, Vec2::splat(40.0), 40.0, 2, 2);
        // Corner shared by the four pixels sits on the axis.
        let ray = cam.create_ray(1, 1, Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_lower_left_pixel() {
        let cam = Camera::new(Vec3::ZERO, Vec2::splat(40.0), 40.0, 4, 4);
        let ray = cam.create_ray(0, 0, Vec2::splat(0.5));
        let expected = Vec3::new(-15.0, -15.0, -40.0).normalize();
        assert!((ray.direction - expected).length() < 1e-6);
    }
}
