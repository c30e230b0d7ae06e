//! Finite cylinder standing on the horizontal plane through its center, with
//! an open base and a capped top.

use glam::Vec3;

use crate::surface::{Surface, SurfaceKind};

const EPSILON: f32 = 0.001;
const MISS: f32 = -1.0;

#[derive(Debug, Clone, Copy)]
pub struct Cylinder {
    center: Vec3,
    radius: f32,
    height: f32,
}

impl Cylinder {
    pub fn new(center: Vec3, radius: f32, height: f32) -> Cylinder {
        return Cylinder { center, radius, height };
    }

    fn top(&self) -> f32 {
        return self.center.y + self.height;
    }

    /// Distance at which a ray crosses the plane of the top cap.
    fn cap_distance(&self, origin: Vec3, dir: Vec3) -> f32 {
        return (self.top() - origin.y) / dir.y;
    }
}

impl Surface for Cylinder {
    fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let vdif = origin - self.center;
        let top = self.top();

        let a = dir.x * dir.x + dir.z * dir.z;
        let b = 2.0 * (dir.x * vdif.x + dir.z * vdif.z);
        let c = vdif.x * vdif.x + vdif.z * vdif.z - self.radius * self.radius;

        // Parallel to the axis: the wall can't be crossed, only the cap.
        if a < f32::EPSILON {
            if c <= 0.0 && origin.y > top && dir.y < 0.0 {
                return Some(self.cap_distance(origin, dir));
            }
            return None;
        }

        let delta = b * b - 4.0 * a * c;
        if delta.abs() < EPSILON || delta < 0.0 {
            return None;
        }

        let mut t1 = (-b - delta.sqrt()) / (2.0 * a);
        let mut t2 = (-b + delta.sqrt()) / (2.0 * a);

        if t1.abs() < EPSILON {
            if t2 > 0.0 {
                return Some(t2);
            }
            t1 = MISS;
        }
        if t2.abs() < EPSILON {
            t2 = MISS;
        }

        let y1 = origin.y + t1 * dir.y;
        let y2 = origin.y + t2 * dir.y;

        // Enters through the wall above the top and leaves below it.
        if y1 > top && y2 < top {
            return Some(self.cap_distance(origin, dir));
        }

        if y1 > top || y1 < self.center.y {
            t1 = MISS;
        }
        if y2 > top || y2 < self.center.y {
            t2 = MISS;
        }

        let t = if t1 < t2 {
            if t1 >= 0.0 { t1 } else { t2 }
        } else if t2 >= 0.0 {
            t2
        } else {
            t1
        };

        return (t >= 0.0).then_some(t);
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        let shifted = point - self.center;

        if shifted.y >= self.height {
            return Vec3::Y;
        }

        return Vec3::new(shifted.x / self.radius, 0.0, shifted.z / self.radius);
    }

    fn kind(&self) -> SurfaceKind {
        return SurfaceKind::Cylinder;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_cylinder_perpendicular() {
        let cyl = Cylinder::new(Vec3::ZERO, 5.0, 10.0);
        let t = cyl.intersect(Vec3::new(-10.0, 2.0, 0.0), Vec3::X).unwrap();
        assert_abs_diff_eq!(t, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ray_cylinder_miss_beside() {
        let cyl = Cylinder::new(Vec3::ZERO, 5.0, 10.0);
        assert!(cyl.intersect(Vec3::new(-10.0, 2.0, 6.0), Vec3::X).is_none());
    }

    #[test]
    fn test_ray_cylinder_miss_above() {
        let cyl = Cylinder::new(Vec3::ZERO, 5.0, 10.0);
        assert!(cyl.intersect(Vec3::new(-10.0, 12.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn test_ray_cylinder_miss_below_open_base() {
        let cyl = Cylinder::new(Vec3::ZERO, 5.0, 10.0);
        assert!(cyl.intersect(Vec3::new(-10.0, -1.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn test_ray_from_wall_hits_far_side() {
        let cyl = Cylinder::new(Vec3::ZERO, 5.0, 10.0);
        let t = cyl.intersect(Vec3::new(-5.0, 2.0, 0.0), Vec3::X).unwrap();
        assert_abs_diff_eq!(t, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_vertical_ray_hits_top_cap() {
        let center = Vec3::new(1.0, 2.0, -3.0);
        let cyl = Cylinder::new(center, 2.0, 4.0);
        let origin = center + Vec3::new(0.0, 10.0, 0.0);
        let t = cyl.intersect(origin, Vec3::NEG_Y).unwrap();
        // Plane y = center.y + height lies 6 below the origin.
        assert_abs_diff_eq!(t, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_vertical_ray_outside_radius_misses() {
        let cyl = Cylinder::new(Vec3::ZERO, 2.0, 4.0);
        assert!(cyl.intersect(Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_tilted_ray_through_cap() {
        let cyl = Cylinder::new(Vec3::ZERO, 2.0, 4.0);
        let origin = Vec3::new(0.5, 10.0, 0.0);
        let dir = Vec3::new(0.05, -1.0, 0.0).normalize();
        let t = cyl.intersect(origin, dir).unwrap();
        let hit = origin + dir * t;
        assert_abs_diff_eq!(hit.y, 4.0, epsilon = 1e-4);
        assert!(hit.x.abs() < 2.0);
    }

    #[test]
    fn test_wall_normal_is_radial() {
        let cyl = Cylinder::new(Vec3::ZERO, 5.0, 10.0);
        let n = cyl.normal(Vec3::new(0.0, 3.0, 5.0));
        assert_eq!(n, Vec3::Z);
    }

    #[test]
    fn test_cap_normal_on_raised_cylinder() {
        let cyl = Cylinder::new(Vec3::ZERO, 2.0, 4.0);
        assert_eq!(cyl.normal(Vec3::new(0.5, 4.0, 0.0)), Vec3::Y);

        // The offset is taken from the center, so the cap is still found
        // when the base is raised.
        let raised = Cylinder::new(Vec3::new(0.0, 3.0, 0.0), 2.0, 4.0);
        assert_eq!(raised.normal(Vec3::new(0.5, 7.0, 0.0)), Vec3::Y);
        assert_eq!(raised.normal(Vec3::new(2.0, 5.0, 0.0)), Vec3::X);
    }
}
