//! Flat convex polygon (triangle or quad).

use glam::Vec3;

use crate::surface::{Surface, SurfaceKind};

const EPSILON: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct Plane {
    vertices: Vec<Vec3>,
    normal: Vec3,
}

impl Plane {
    /// Quad with vertices given counter-clockwise when seen from the front.
    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Plane {
        let normal = (b - a).cross(d - a).normalize();
        return Plane { vertices: vec![a, b, c, d], normal };
    }

    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> Plane {
        let normal = (b - a).cross(c - a).normalize();
        return Plane { vertices: vec![a, b, c], normal };
    }

    fn contains(&self, q: Vec3) -> bool {
        let n = self.vertices.len();
        return (0..n).all(|i| {
            let v = self.vertices[i];
            let edge = self.vertices[(i + 1) % n] - v;
            edge.cross(q - v).dot(self.normal) >= 0.0
        });
    }
}

impl Surface for Plane {
    fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let d_dot_n = dir.dot(self.normal);
        if d_dot_n.abs() < EPSILON {
            return None;
        }

        let t = (self.vertices[0] - origin).dot(self.normal) / d_dot_n;
        if t.abs() < EPSILON {
            return None;
        }

        return self.contains(origin + dir * t).then_some(t);
    }

    fn normal(&self, _point: Vec3) -> Vec3 {
        return self.normal;
    }

    fn kind(&self) -> SurfaceKind {
        return SurfaceKind::Plane;
    }
}
