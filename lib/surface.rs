use glam::*;

use crate::material::Material;
use crate::texture::TextureBinding;

/// Geometry family of a surface. The tracer treats planes differently when
/// chaining refraction through an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Plane,
    Sphere,
    Cylinder,
    Torus,
}

pub trait Surface: Send + Sync {
    /// Distance along the ray to the nearest crossing, or `None` on a miss.
    ///
    /// Implementations may return distances close to zero; the scene query
    /// is responsible for discarding them.
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32>;

    /// Unit normal at a point previously returned as a hit on this surface.
    fn normal(&self, point: Vec3) -> Vec3;

    fn kind(&self) -> SurfaceKind;
}

/// A surface placed in a scene together with its material and optional
/// texture rule.
pub struct SceneObject {
    pub surface: Box<dyn Surface>,
    pub material: Material,
    pub texture: Option<TextureBinding>,
}

impl SceneObject {
    pub fn new(surface: impl Surface + 'static, material: Material) -> SceneObject {
        return SceneObject { surface: Box::new(surface), material, texture: None };
    }

    pub fn with_texture(mut self, texture: TextureBinding) -> SceneObject {
        self.texture = Some(texture);
        return self;
    }

    pub fn kind(&self) -> SurfaceKind {
        return self.surface.kind();
    }
}
