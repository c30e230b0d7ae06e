//! Surface material attributes.

use glam::Vec3;

/// A light-transport effect that can be switched on for a surface.
///
/// The coefficient is kept even while disabled because the shadow blend
/// reads it from any transparent or refractive occluder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub enabled: bool,
    pub coeff: f32,
}

impl Effect {
    pub const fn off(coeff: f32) -> Effect {
        return Effect { enabled: false, coeff };
    }

    pub const fn on(coeff: f32) -> Effect {
        return Effect { enabled: true, coeff };
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    pub enabled: bool,
    pub coeff: f32,
    pub index: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub reflective: Effect,
    pub transparent: Effect,
    pub refractive: Refraction,
    pub specular: bool,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Material {
        return Material {
            color: Vec3::splat(0.8),
            reflective: Effect::off(0.8),
            transparent: Effect::off(0.8),
            refractive: Refraction { enabled: false, coeff: 0.8, index: 1.0 },
            specular: true,
            shininess: 50.0,
        };
    }
}

impl Material {
    pub fn new(color: Vec3) -> Material {
        return Material { color, ..Material::default() };
    }

    pub fn reflective(mut self, coeff: f32) -> Material {
        self.reflective = Effect::on(coeff);
        return self;
    }

    pub fn transparent(mut self, coeff: f32) -> Material {
        self.transparent = Effect::on(coeff);
        return self;
    }

    pub fn refractive(mut self, coeff: f32, index: f32) -> Material {
        self.refractive = Refraction { enabled: true, coeff, index };
        return self;
    }

    pub fn matte(mut self) -> Material {
        self.specular = false;
        return self;
    }

    /// Occluders of this kind let some light through to the shadowed point.
    pub fn passes_light(&self) -> bool {
        return self.transparent.enabled || self.refractive.enabled;
    }
}
