//! Ray-torus intersection (quartic equation).
//!
//! The torus lies in the horizontal plane through its center, revolving a
//! tube of radius `minor_radius` about the vertical axis at distance
//! `major_radius`.

use glam::{DVec3, Vec3};

use crate::quartic::solve_quartic;
use crate::surface::{Surface, SurfaceKind};

const EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct Torus {
    center: Vec3,
    major_radius: f32,
    minor_radius: f32,
}

impl Torus {
    pub fn new(center: Vec3, major_radius: f32, minor_radius: f32) -> Torus {
        return Torus { center, major_radius, minor_radius };
    }

    /// Quartic coefficients in `t`, highest degree first, for the ray
    /// `origin + t * dir`.
    fn coefficients(&self, origin: Vec3, dir: Vec3) -> [f64; 5] {
        let o = (origin - self.center).as_dvec3();
        let d = dir.as_dvec3();
        let r2 = (self.major_radius as f64).powi(2);
        let a2 = (self.minor_radius as f64).powi(2);

        let sum_dir_sqrd = d.length_squared();
        let e = o.length_squared() - r2 - a2;
        let f = o.dot(d);
        let four_r2 = 4.0 * r2;

        return [
            sum_dir_sqrd * sum_dir_sqrd,
            4.0 * sum_dir_sqrd * f,
            2.0 * sum_dir_sqrd * e + 4.0 * f * f + four_r2 * d.y * d.y,
            4.0 * f * e + 2.0 * four_r2 * o.y * d.y,
            e * e - four_r2 * (a2 - o.y * o.y),
        ];
    }

    /// Value of the implicit torus function at `point`; zero on the surface.
    pub fn implicit(&self, point: Vec3) -> f64 {
        let p: DVec3 = (point - self.center).as_dvec3();
        let r2 = (self.major_radius as f64).powi(2);
        let a2 = (self.minor_radius as f64).powi(2);
        let s = p.length_squared() + r2 - a2;
        return s * s - 4.0 * r2 * (p.x * p.x + p.z * p.z);
    }
}

impl Surface for Torus {
    fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        return solve_quartic(self.coefficients(origin, dir))
            .into_iter()
            .filter(|&t| t > EPSILON)
            .min_by(f64::total_cmp)
            .map(|t| t as f32);
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        let p = point - self.center;
        let param_sqrd = self.major_radius.powi(2) + self.minor_radius.powi(2);
        let sum_sqrd = p.length_squared();

        return Vec3::new(
            4.0 * p.x * (sum_sqrd - param_sqrd),
            4.0 * p.y * (sum_sqrd - param_sqrd + 2.0 * self.major_radius.powi(2)),
            4.0 * p.z * (sum_sqrd - param_sqrd),
        )
        .normalize();
    }

    fn kind(&self) -> SurfaceKind {
        return SurfaceKind::Torus;
    }
}
