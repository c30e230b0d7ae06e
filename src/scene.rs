//! The demo scene: a checkered floor and brick wall, four spheres, a glass
//! box, a torus and a brick pillar, with an optional crystal.

use std::path::Path;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use log::warn;

use whitted::cylinder::Cylinder;
use whitted::material::Material;
use whitted::plane::Plane;
use whitted::scene::Scene;
use whitted::sphere::Sphere;
use whitted::surface::SceneObject;
use whitted::texture::{BitmapTexture, MaterialMaps, SolidTexture, Texture, TextureBinding};
use whitted::torus::Torus;

pub const LIGHT_POS: Vec3 = Vec3::new(10.0, 40.0, -3.0);

const BOARD_WIDTH: f32 = 5.0;
const BOARD_PRIMARY: Vec3 = Vec3::new(0.8, 0.8, 0.8);
const BOARD_SECONDARY: Vec3 = Vec3::new(0.25, 0.25, 0.25);
const BRICK_COLOR: Vec3 = Vec3::new(1.0, 0.8, 0.0);

/// Bitmaps used by the scene, with flat stand-ins for any that fail to load.
pub struct SceneTextures {
    pub brick: MaterialMaps,
    pub pillar: MaterialMaps,
}

impl SceneTextures {
    pub fn load(albedo: &Path, normal: &Path, metallic: Option<&Path>) -> SceneTextures {
        let albedo = load_or(albedo, BRICK_COLOR);
        let normal = load_or(normal, Vec3::new(0.5, 0.5, 1.0));

        let brick = MaterialMaps::albedo(albedo).with_normal(normal);
        let mut pillar = brick.clone();
        if let Some(path) = metallic {
            pillar = pillar.with_metallic(load_or(path, Vec3::ONE));
        }
        return SceneTextures { brick, pillar };
    }
}

fn load_or(path: &Path, fallback: Vec3) -> Arc<dyn Texture> {
    return match BitmapTexture::open(path) {
        Ok(texture) => Arc::new(texture),
        Err(err) => {
            warn!("{err}; using a flat colour instead");
            Arc::new(SolidTexture(fallback))
        }
    };
}

pub fn build(textures: &SceneTextures, with_crystal: bool) -> Scene {
    let mut scene = Scene::new();

    let floor = Plane::quad(
        Vec3::new(-200.0, -15.0, 0.0),
        Vec3::new(200.0, -15.0, 0.0),
        Vec3::new(200.0, -15.0, -400.0),
        Vec3::new(-200.0, -15.0, -400.0),
    );
    scene.push(SceneObject::new(floor, Material::default().matte().reflective(0.25)).with_texture(
        TextureBinding::Checker { tile: BOARD_WIDTH, primary: BOARD_PRIMARY, secondary: BOARD_SECONDARY },
    ));

    let wall = Plane::quad(
        Vec3::new(-200.0, -15.0, -150.0),
        Vec3::new(200.0, -15.0, -150.0),
        Vec3::new(200.0, 35.0, -150.0),
        Vec3::new(-200.0, 35.0, -150.0),
    );
    scene.push(SceneObject::new(wall, Material::new(BRICK_COLOR).matte()).with_texture(TextureBinding::Planar {
        origin: Vec2::new(-200.0, -15.0),
        extent: Vec2::new(100.0, 100.0),
        maps: textures.brick.clone(),
    }));

    scene.push(SceneObject::new(
        Sphere::new(Vec3::new(-5.0, 0.0, -90.0), 15.0),
        Material::new(Vec3::new(0.0, 0.0, 1.0)).reflective(0.8),
    ));
    scene.push(SceneObject::new(
        Sphere::new(Vec3::new(5.0, -2.0, -70.0), 4.0),
        Material::new(Vec3::new(1.0, 0.0, 0.0)).refractive(0.65, 1.01).reflective(0.5),
    ));

    let marble_center = Vec3::new(10.0, 10.0, -60.0);
    scene.push(
        SceneObject::new(Sphere::new(marble_center, 3.0), Material::new(Vec3::new(0.0, 0.5, 1.0)))
            .with_texture(TextureBinding::Marble { center: marble_center }),
    );

    scene.push(SceneObject::new(
        Sphere::new(Vec3::new(15.0, -10.0, -40.0), 5.0),
        Material::new(Vec3::new(0.0, 1.0, 0.0)).transparent(0.8).reflective(0.5),
    ));

    glass_box(&mut scene);

    scene.push(SceneObject::new(
        Torus::new(Vec3::new(2.0, -10.0, -40.0), 4.0, 2.0),
        Material::new(Vec3::new(0.0, 0.2, 0.0)).reflective(0.4),
    ));

    let pillar_base = Vec3::new(-22.0, -15.0, -70.0);
    scene.push(
        SceneObject::new(Cylinder::new(pillar_base, 3.0, 12.0), Material::new(BRICK_COLOR).reflective(0.3))
            .with_texture(TextureBinding::Cylindrical {
                center: pillar_base,
                height: 12.0,
                maps: textures.pillar.clone(),
            }),
    );

    if with_crystal {
        crystal(&mut scene, 1.0, Vec3::new(-7.5, -15.0, -35.0), Vec3::new(1.0, 0.0, 1.0));
    }

    return scene;
}

/// Six refractive, reflective faces of a red cube.
fn glass_box(scene: &mut Scene) {
    let material = Material::new(Vec3::new(1.0, 0.0, 0.0)).refractive(0.5, 1.03).reflective(0.8);
    let v = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

    let faces = [
        Plane::quad(v(-15.0, -14.99, -50.0), v(-5.0, -14.99, -50.0), v(-5.0, -14.99, -60.0), v(-15.0, -14.99, -60.0)),
        Plane::quad(v(-15.0, -5.0, -50.0), v(-5.0, -5.0, -50.0), v(-5.0, -5.0, -60.0), v(-15.0, -5.0, -60.0)),
        Plane::quad(v(-15.0, -15.0, -60.0), v(-5.0, -15.0, -60.0), v(-5.0, -5.0, -60.0), v(-15.0, -5.0, -60.0)),
        Plane::quad(v(-15.0, -15.0, -50.0), v(-5.0, -15.0, -50.0), v(-5.0, -5.0, -50.0), v(-15.0, -5.0, -50.0)),
        Plane::quad(v(-15.0, -15.0, -50.0), v(-15.0, -15.0, -60.0), v(-15.0, -5.0, -60.0), v(-15.0, -5.0, -50.0)),
        Plane::quad(v(-5.0, -15.0, -50.0), v(-5.0, -15.0, -60.0), v(-5.0, -5.0, -60.0), v(-5.0, -5.0, -50.0)),
    ];
    for face in faces {
        scene.push(SceneObject::new(face, material));
    }
}

/// Faceted crystal of sixteen planes standing on `location`.
fn crystal(scene: &mut Scene, scale: f32, location: Vec3, color: Vec3) {
    let material = Material::new(color).reflective(0.6).refractive(0.3, 1.05);
    let p = |x: f32, y: f32, z: f32| location + Vec3::new(x, y, z) * scale;

    let corners = [Vec2::new(0.5, 0.5), Vec2::new(-0.5, 0.5), Vec2::new(-0.5, -0.5), Vec2::new(0.5, -0.5)];
    let sides = [Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, -1.0), Vec2::new(1.0, 0.0)];
    let ring = corners.map(|c| p(c.x, 1.0, c.y));
    let waist = sides.map(|s| p(s.x, 7.0, s.y));
    let shoulder = corners.map(|c| p(c.x, 8.5, c.y));
    let tip = p(0.0, 9.5, 0.0);

    // waist[i] sits between corners i and i + 1.
    let mut faces = Vec::with_capacity(16);
    for i in 0..4 {
        let next = (i + 1) % 4;
        let prev = (i + 3) % 4;
        faces.push(Plane::triangle(location, ring[i], ring[next]));
        faces.push(Plane::triangle(ring[next], ring[i], waist[i]));
        faces.push(Plane::quad(ring[i], waist[prev], shoulder[i], waist[i]));
        faces.push(Plane::quad(waist[i], shoulder[i], tip, shoulder[next]));
    }

    for face in faces {
        scene.push(SceneObject::new(face, material));
    }
}
