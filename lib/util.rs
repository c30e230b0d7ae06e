use glam::*;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

pub fn is_near_zero(v: Vec3) -> bool {
    return v.abs_diff_eq(Vec3::ZERO, f32::EPSILON);
}

/// Random offset in `[0, 1)²`, used to jitter a sample inside its cell.
pub fn rand_in_unit_square<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let unit = Uniform::new(0.0f32, 1.0);
    return Vec2::new(unit.sample(rng), unit.sample(rng));
}

/// Mirror `v` about `normal`. `normal` must be unit length.
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    return v - (2.0 * v.dot(normal) * normal);
}

/// Snell refraction of the unit vector `v` through a surface with unit
/// `normal`, where `eta` is the ratio of indices (outside / inside).
///
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = normal.dot(v);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    let refracted = eta * v - (eta * cos_i + k.sqrt()) * normal;
    if is_near_zero(refracted) {
        return None;
    }
    return Some(refracted);
}
