use glam::*;

use crate::material::Material;
use crate::util::reflect;

/// Local (unshadowed) illumination at a surface point.
pub trait Lighting: Send + Sync {
    fn position(&self) -> Vec3;

    /// `view` points from the hit back towards the viewer; `normal` is the
    /// (possibly texture-perturbed) unit surface normal.
    fn shade(&self, view: Vec3, point: Vec3, color: Vec3, normal: Vec3, material: &Material) -> Vec3;
}

/// Point light with Phong ambient, diffuse and white specular terms.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: f32,
}

impl PointLight {
    pub fn new(position: Vec3) -> PointLight {
        return PointLight { position, ambient: 0.2 };
    }
}

impl Lighting for PointLight {
    fn position(&self) -> Vec3 {
        return self.position;
    }

    fn shade(&self, view: Vec3, point: Vec3, color: Vec3, normal: Vec3, material: &Material) -> Vec3 {
        let light_dir = (self.position - point).normalize();
        let l_dot_n = light_dir.dot(normal).max(0.0);

        let mut specular = 0.0;
        if material.specular {
            let r_dot_v = reflect(-light_dir, normal).dot(view.normalize());
            if r_dot_v > 0.0 {
                specular = r_dot_v.powf(material.shininess);
            }
        }

        return self.ambient * color + l_dot_n * color + Vec3::splat(specular);
    }
}
