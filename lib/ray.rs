use glam::Vec3;

/// Distances at or below this are treated as misses so a ray never
/// re-hits the surface it starts on.
pub const HIT_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length; normalized on construction.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        return Ray { origin, direction: direction.normalize() };
    }

    pub fn at(&self, t: f32) -> Vec3 {
        return self.origin + self.direction * t;
    }
}

/// Nearest intersection found by a scene query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Position of the hit object in the scene.
    pub index: usize,
    pub point: Vec3,
    pub distance: f32,
}
