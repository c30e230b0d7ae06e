use glam::Vec3;

use crate::surface::{Surface, SurfaceKind};

const EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Sphere {
        return Sphere { center, radius };
    }
}

impl Surface for Sphere {
    fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let oc = origin - self.center;
        let a = dir.length_squared();
        let half_b = oc.dot(dir);
        let c = oc.length_squared() - (self.radius * self.radius);

        let discriminant = (half_b * half_b) - (a * c);

        if discriminant.abs() < EPSILON || discriminant < 0.0 {
            return None;
        }

        let discriminant_sqrt = discriminant.sqrt();

        let mut root_lower = (-half_b - discriminant_sqrt) / a;
        let mut root_upper = (-half_b + discriminant_sqrt) / a;

        // A ray leaving the surface reports the far side.
        if root_lower.abs() < EPSILON {
            if root_upper > 0.0 {
                return Some(root_upper);
            }
            root_lower = -1.0;
        }
        if root_upper.abs() < EPSILON {
            root_upper = -1.0;
        }

        return Some(root_lower.min(root_upper));
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        return (point - self.center) / self.radius;
    }

    fn kind(&self) -> SurfaceKind {
        return SurfaceKind::Sphere;
    }
}
