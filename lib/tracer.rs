//! Recursive Whitted-style shading: local lighting, shadows, and the
//! reflection, transparency and refraction chains.

use glam::Vec3;

use crate::lighting::Lighting;
use crate::noise::MarbleField;
use crate::ray::{Ray, RayHit};
use crate::scene::Scene;
use crate::surface::{SceneObject, SurfaceKind};
use crate::texture::SurfaceSample;
use crate::util::{reflect, refract};

/// Deepest recursion level; primary rays start at depth 1.
pub const MAX_STEPS: u32 = 5;

/// Share of the shaded colour left on a point shadowed by an opaque object.
const SHADOW_FACTOR: f32 = 0.2;

pub const SKY_BLUE: Vec3 = Vec3::new(135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0);

/// Everything a ray needs to be shaded. Built once, then shared read-only
/// by all render workers.
pub struct Tracer {
    pub scene: Scene,
    pub light: Box<dyn Lighting>,
    pub marble: MarbleField,
    pub background: Vec3,
}

impl Tracer {
    pub fn new(scene: Scene, light: impl Lighting + 'static, marble: MarbleField) -> Tracer {
        return Tracer { scene, light: Box::new(light), marble, background: SKY_BLUE };
    }

    pub fn with_background(mut self, background: Vec3) -> Tracer {
        self.background = background;
        return self;
    }

    /// Colour seen along `ray`. The result is not clamped.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Vec3 {
        let Some(hit) = self.scene.closest_hit(ray) else {
            return self.background;
        };
        let obj = self.scene.get(hit.index);
        let material = &obj.material;

        let surface = self.surface_at(obj, &hit);
        let shaded = self.light.shade(-ray.direction, hit.point, surface.color, surface.normal, material);
        let mut color = self.shadow(hit.point, surface.color, shaded);

        if depth >= MAX_STEPS {
            return color;
        }

        if material.reflective.enabled {
            let rho = material.reflective.coeff * surface.reflectivity_scale;
            let reflected = Ray::new(hit.point, reflect(ray.direction, surface.normal));
            color += rho * self.trace(&reflected, depth + 1);
        }

        if material.transparent.enabled {
            let coeff = material.transparent.coeff;
            let through = Ray::new(hit.point, ray.direction);
            color = color * (1.0 - coeff) + coeff * self.trace(&through, depth + 1);
        }

        if material.refractive.enabled {
            let coeff = material.refractive.coeff;
            color = color * (1.0 - coeff) + coeff * self.refracted(obj, &hit, ray, depth);
        }

        return color;
    }

    fn surface_at(&self, obj: &SceneObject, hit: &RayHit) -> SurfaceSample {
        let normal = obj.surface.normal(hit.point);
        return match &obj.texture {
            Some(binding) => binding.apply(hit.point, normal, obj.material.color, &self.marble),
            None => SurfaceSample::plain(obj.material.color, normal),
        };
    }

    /// Attenuate `shaded` if something sits between `point` and the light.
    fn shadow(&self, point: Vec3, base: Vec3, shaded: Vec3) -> Vec3 {
        let to_light = self.light.position() - point;
        let shadow_ray = Ray::new(point, to_light);

        let Some(blocker) = self.scene.closest_hit(&shadow_ray) else {
            return shaded;
        };
        if blocker.distance >= to_light.length() {
            return shaded;
        }

        let occluder = &self.scene.get(blocker.index).material;
        if !occluder.passes_light() {
            return shaded * SHADOW_FACTOR;
        }

        // The blue channel weighs the occluder colour by its reflection
        // coefficient rather than its transparency.
        let tc = occluder.transparent.coeff;
        let rc = occluder.reflective.coeff;
        let tint = occluder.color;
        return Vec3::new(
            tc * (tc * base.x + (1.0 - tc) * 0.5 * tint.x),
            tc * (tc * base.y + (1.0 - tc) * 0.5 * tint.y),
            tc * (tc * base.z + (1.0 - rc) * 0.5 * tint.z),
        );
    }

    /// Colour seen through a refractive object entered at `hit`.
    ///
    /// Curved objects are always exited by refracting a second time where the
    /// inner ray leaves. A plane only does so when the inner ray lands on
    /// another refractive plane; otherwise the inner ray is traced as is.
    fn refracted(&self, obj: &SceneObject, hit: &RayHit, ray: &Ray, depth: u32) -> Vec3 {
        let index = obj.material.refractive.index;
        let eta = 1.0 / index;

        let n = obj.surface.normal(hit.point);
        let inner_dir = bend(ray.direction, n, eta);
        let inner = Ray::new(hit.point, inner_dir);

        let exit = self.scene.closest_hit(&inner).filter(|exit| {
            if obj.kind() != SurfaceKind::Plane {
                return true;
            }
            let other = self.scene.get(exit.index);
            other.kind() == SurfaceKind::Plane && other.material.refractive.enabled
        });

        let next = match exit {
            Some(exit) => {
                let m = obj.surface.normal(exit.point);
                Ray::new(exit.point, bend(inner_dir, -m, index))
            }
            None => inner,
        };

        return self.trace(&next, depth + 1);
    }
}

/// Refract, falling back to mirror reflection past the critical angle.
fn bend(v: Vec3, normal: Vec3, eta: f32) -> Vec3 {
    return refract(v, normal, eta).unwrap_or_else(|| reflect(v, normal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::PointLight;
    use crate::material::Material;
    use crate::noise::{MarbleParams, NoiseField};
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use crate::surface::SceneObject;
    use crate::texture::{MaterialMaps, SolidTexture, TextureBinding};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn marble() -> MarbleField {
        let noise = NoiseField::generate(4, 4, &mut StdRng::seed_from_u64(3)).unwrap();
        MarbleField::build(&noise, MarbleParams { turb_size: 2.0, ..Default::default() })
    }

    fn tracer(scene: Scene, light: Vec3) -> Tracer {
        Tracer::new(scene, PointLight::new(light), marble())
    }

    fn wall(z: f32) -> Plane {
        Plane::quad(
            Vec3::new(-50.0, -50.0, z),
            Vec3::new(50.0, -50.0, z),
            Vec3::new(50.0, 50.0, z),
            Vec3::new(-50.0, 50.0, z),
        )
    }

    #[test]
    fn test_miss_returns_background() {
        let t = tracer(Scene::new(), Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 1), SKY_BLUE);
    }

    #[test]
    fn test_unshadowed_matte_wall() {
        let mut scene = Scene::new();
        scene.push(SceneObject::new(wall(-10.0), Material::new(Vec3::new(1.0, 0.0, 0.0)).matte()));
        // Light on the axis in front of the wall: diffuse term 1, ambient 0.2.
        let t = tracer(scene, Vec3::new(0.0, 0.0, 0.0));
        let c = t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 1);
        assert!((c - Vec3::new(1.2, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_opaque_blocker_darkens() {
        let mut scene = Scene::new();
        scene.push(SceneObject::new(wall(-10.0), Material::new(Vec3::new(1.0, 0.0, 0.0)).matte()));
        scene.push(SceneObject::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.5), Material::default()));
        let t = tracer(scene, Vec3::new(0.0, 0.0, 0.0));
        // Look at the wall from off-axis so the sphere is not in view.
        let origin = Vec3::new(5.0, 0.0, 0.0);
        let c = t.trace(&Ray::new(origin, Vec3::new(-5.0, 0.0, -10.0)), 1);
        let unshadowed = Vec3::new(1.2, 0.0, 0.0);
        assert!((c - unshadowed * SHADOW_FACTOR).length() < 1e-5);
    }

    #[test]
    fn test_transparent_blocker_uses_tinted_blend() {
        let mut scene = Scene::new();
        scene.push(SceneObject::new(wall(-10.0), Material::new(Vec3::new(0.4, 0.6, 0.8)).matte()));
        let glass = Material::new(Vec3::new(0.0, 1.0, 1.0)).transparent(0.6).reflective(0.3);
        scene.push(SceneObject::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.5), glass));
        let t = tracer(scene, Vec3::new(0.0, 0.0, 0.0));
        let c = t.trace(&Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-5.0, 0.0, -10.0)), MAX_STEPS);

        let (tc, rc) = (0.6f32, 0.3f32);
        let expected = Vec3::new(
            tc * (tc * 0.4 + (1.0 - tc) * 0.5 * 0.0),
            tc * (tc * 0.6 + (1.0 - tc) * 0.5 * 1.0),
            tc * (tc * 0.8 + (1.0 - rc) * 0.5 * 1.0),
        );
        assert!((c - expected).length() < 1e-5, "{c} != {expected}");
    }

    #[test]
    fn test_no_recursion_at_max_depth() {
        let mut scene = Scene::new();
        let mirror = Material::new(Vec3::new(0.0, 0.0, 1.0)).matte().reflective(1.0);
        scene.push(SceneObject::new(wall(-10.0), mirror));
        let t = tracer(scene, Vec3::ZERO);
        let at_max = t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), MAX_STEPS);
        assert!((at_max - Vec3::new(0.0, 0.0, 1.2)).length() < 1e-5);

        // One level above the limit the reflection of the sky is added.
        let below = t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), MAX_STEPS - 1);
        assert!((below - (at_max + SKY_BLUE)).length() < 1e-5);
    }

    #[test]
    fn test_refraction_through_unit_index_sphere_sees_background() {
        let mut scene = Scene::new();
        let glass = Material::new(Vec3::ZERO).matte().refractive(1.0, 1.0);
        scene.push(SceneObject::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0), glass));
        let t = tracer(scene, Vec3::new(0.0, 0.0, 100.0)).with_background(Vec3::new(0.1, 0.2, 0.3));
        let c = t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 1);
        // coeff 1 replaces the local colour entirely.
        assert!((c - Vec3::new(0.1, 0.2, 0.3)).length() < 1e-5);
    }

    fn pane(center: Vec3, half: f32) -> Plane {
        Plane::quad(
            center + Vec3::new(-half, -half, 0.0),
            center + Vec3::new(half, -half, 0.0),
            center + Vec3::new(half, half, 0.0),
            center + Vec3::new(-half, half, 0.0),
        )
    }

    const SKY: Vec3 = Vec3::new(0.1, 0.2, 0.3);

    /// Small refractive pane at z = -10 struck at (5, 0, -10) by a ray from
    /// the origin, followed by `exit`.
    fn pane_pair(exit: SceneObject) -> (Tracer, Ray) {
        let mut scene = Scene::new();
        let glass = Material::new(Vec3::ZERO).matte().refractive(1.0, 1.5);
        scene.push(SceneObject::new(pane(Vec3::new(5.0, 0.0, -10.0), 1.0), glass));
        scene.push(exit);
        let t = tracer(scene, Vec3::new(0.0, 0.0, 100.0)).with_background(SKY);
        (t, Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -2.0)))
    }

    fn inner_ray() -> Ray {
        let inner = refract(Vec3::new(1.0, 0.0, -2.0).normalize(), Vec3::Z, 1.0 / 1.5).unwrap();
        Ray::new(Vec3::new(5.0, 0.0, -10.0), inner)
    }

    #[test]
    fn test_plane_to_refractive_plane_refracts_again() {
        let exit_glass = Material::new(Vec3::new(0.0, 1.0, 0.0)).matte().refractive(0.5, 1.5);
        let (t, ray) = pane_pair(SceneObject::new(pane(Vec3::new(0.0, 0.0, -12.0), 50.0), exit_glass));

        // Bending back through the entry normal at the exit sends the ray
        // towards +z, past the small entry pane and out to the sky.
        let out = bend(inner_ray().direction, -Vec3::Z, 1.5);
        assert!((out - Vec3::new(1.0, 0.0, 2.0).normalize()).length() < 1e-5);

        let c = t.trace(&ray, 1);
        assert!((c - SKY).length() < 1e-5, "{c}");
    }

    #[test]
    fn test_plane_to_opaque_plane_traces_inner_ray() {
        let backing = Material::new(Vec3::new(0.0, 1.0, 0.0)).matte();
        let (t, ray) = pane_pair(SceneObject::new(pane(Vec3::new(0.0, 0.0, -12.0), 50.0), backing));

        let c = t.trace(&ray, 1);
        let direct = t.trace(&inner_ray(), 2);
        assert!((c - direct).length() < 1e-5);
        assert!(c.y > 0.0);
        assert!((c - SKY).length() > 0.1);
    }

    #[test]
    fn test_plane_to_curved_surface_traces_inner_ray() {
        let ball = Material::new(Vec3::new(0.0, 1.0, 0.0)).refractive(0.5, 1.5);
        let (t, ray) = pane_pair(SceneObject::new(Sphere::new(Vec3::new(5.6, 0.0, -20.0), 3.0), ball));

        let c = t.trace(&ray, 1);
        let direct = t.trace(&inner_ray(), 2);
        assert!((c - direct).length() < 1e-5);
        assert!((c - SKY).length() > 0.05);
    }

    #[test]
    fn test_metallic_map_scales_reflection() {
        let maps = MaterialMaps::albedo(Arc::new(SolidTexture(Vec3::new(0.0, 0.0, 1.0))))
            .with_metallic(Arc::new(SolidTexture(Vec3::splat(0.25))));
        let binding = TextureBinding::Planar { origin: Vec2::splat(-50.0), extent: Vec2::splat(100.0), maps };
        let mirror = Material::new(Vec3::ONE).matte().reflective(1.0);

        let mut scene = Scene::new();
        scene.push(SceneObject::new(wall(-10.0), mirror).with_texture(binding));
        let t = tracer(scene, Vec3::ZERO);

        let at_max = t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), MAX_STEPS);
        assert!((at_max - Vec3::new(0.0, 0.0, 1.2)).length() < 1e-5);
        let below = t.trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), MAX_STEPS - 1);
        assert!((below - (at_max + 0.25 * SKY_BLUE)).length() < 1e-5);
    }

    #[test]
    fn test_bend_falls_back_to_reflection() {
        let v = Vec3::new(1.0, -0.1, 0.0).normalize();
        let b = bend(v, Vec3::Y, 1.5);
        assert!((b - reflect(v, Vec3::Y)).length() < 1e-6);
    }
}
