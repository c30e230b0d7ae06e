//! Texture sampling and the per-object rules that override a surface's base
//! colour, normal or reflectivity at a hit point.

use std::f32::consts::PI;
use std::path::Path;
use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::error::{RenderError, Result};
use crate::noise::MarbleField;

pub trait Texture: Send + Sync {
    /// Colour at normalized `(u, v)`. Coordinates outside `[0, 1)` wrap.
    fn sample_at(&self, u: f32, v: f32) -> Vec3;
}

/// Decoded bitmap, stored bottom row first so `v = 0` is the bottom edge.
pub struct BitmapTexture {
    width: usize,
    height: usize,
    texels: Vec<Vec3>,
}

impl BitmapTexture {
    pub fn open(path: impl AsRef<Path>) -> Result<BitmapTexture> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| RenderError::Texture { path: path.to_path_buf(), source })?
            .to_rgb8();

        let (width, height) = (image.width() as usize, image.height() as usize);
        let mut texels = Vec::with_capacity(width * height);
        for y in (0..image.height()).rev() {
            for x in 0..image.width() {
                let p = image.get_pixel(x, y);
                texels.push(Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0);
            }
        }

        log::debug!("loaded {}x{} texture from {}", width, height, path.display());
        return Ok(BitmapTexture { width, height, texels });
    }

    pub fn from_texels(width: usize, height: usize, texels: Vec<Vec3>) -> Result<BitmapTexture> {
        if width == 0 || height == 0 || texels.len() != width * height {
            return Err(RenderError::InvalidConfig(format!(
                "texture of {}x{} needs {} texels, got {}",
                width,
                height,
                width * height,
                texels.len()
            )));
        }
        return Ok(BitmapTexture { width, height, texels });
    }
}

impl Texture for BitmapTexture {
    fn sample_at(&self, u: f32, v: f32) -> Vec3 {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);
        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);
        return self.texels[y * self.width + x];
    }
}

/// Single colour everywhere; stands in for a bitmap that failed to load.
pub struct SolidTexture(pub Vec3);

impl Texture for SolidTexture {
    fn sample_at(&self, _u: f32, _v: f32) -> Vec3 {
        return self.0;
    }
}

/// Bitmaps applied together through one UV mapping.
#[derive(Clone)]
pub struct MaterialMaps {
    pub albedo: Arc<dyn Texture>,
    /// Tangent-space normal map, channels encoded as `(n + 1) / 2`.
    pub normal: Option<Arc<dyn Texture>>,
    /// Red channel scales the surface's reflection coefficient.
    pub metallic: Option<Arc<dyn Texture>>,
}

impl MaterialMaps {
    pub fn albedo(albedo: Arc<dyn Texture>) -> MaterialMaps {
        return MaterialMaps { albedo, normal: None, metallic: None };
    }

    pub fn with_normal(mut self, normal: Arc<dyn Texture>) -> MaterialMaps {
        self.normal = Some(normal);
        return self;
    }

    pub fn with_metallic(mut self, metallic: Arc<dyn Texture>) -> MaterialMaps {
        self.metallic = Some(metallic);
        return self;
    }

    fn sample(&self, uv: Vec2, normal: Vec3, tangent: Vec3) -> SurfaceSample {
        let normal = match &self.normal {
            Some(map) => perturb(normal, tangent, map.sample_at(uv.x, uv.y)),
            None => normal,
        };
        return SurfaceSample {
            color: self.albedo.sample_at(uv.x, uv.y),
            normal,
            reflectivity_scale: self.metallic.as_ref().map_or(1.0, |m| m.sample_at(uv.x, uv.y).x),
        };
    }
}

/// How an object's appearance varies over its surface.
#[derive(Clone)]
pub enum TextureBinding {
    /// Alternating squares of side `tile` on the world x/z grid.
    Checker { tile: f32, primary: Vec3, secondary: Vec3 },
    /// Bitmaps stretched over the world x/y rectangle starting at `origin`.
    Planar { origin: Vec2, extent: Vec2, maps: MaterialMaps },
    /// Marble field wrapped spherically about `center`, tinting the base colour.
    Marble { center: Vec3 },
    /// Bitmaps wrapped around a vertical axis through `center`.
    Cylindrical { center: Vec3, height: f32, maps: MaterialMaps },
}

/// Appearance of a surface at one hit point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub color: Vec3,
    pub normal: Vec3,
    pub reflectivity_scale: f32,
}

impl SurfaceSample {
    pub fn plain(color: Vec3, normal: Vec3) -> SurfaceSample {
        return SurfaceSample { color, normal, reflectivity_scale: 1.0 };
    }
}

impl TextureBinding {
    pub fn apply(&self, point: Vec3, normal: Vec3, base: Vec3, marble: &MarbleField) -> SurfaceSample {
        return match self {
            TextureBinding::Checker { tile, primary, secondary } => {
                let cell = |c: f32| ((if c < 0.0 { -c + tile } else { c }) / tile) as i32;
                let k = (cell(point.z) % 2) ^ (cell(point.x) % 2);
                let color = if k == 0 { *primary } else { *secondary };
                SurfaceSample::plain(color, normal)
            }
            TextureBinding::Planar { origin, extent, maps } => {
                let uv = Vec2::new(
                    ((point.x - origin.x) / extent.x) % 1.0,
                    ((point.y - origin.y) / extent.y) % 1.0,
                );
                maps.sample(uv, normal, Vec3::X)
            }
            TextureBinding::Marble { center } => {
                let local = (point - *center).normalize();
                let u = 0.5 + local.x.atan2(local.z) / (2.0 * PI);
                let v = 0.5 - local.y.clamp(-1.0, 1.0).asin() / PI;
                SurfaceSample::plain(marble.sample_at(u, v) * base, normal)
            }
            TextureBinding::Cylindrical { center, height, maps } => {
                let rel = point - *center;
                let uv = Vec2::new(0.5 + rel.x.atan2(rel.z) / (2.0 * PI), rel.y / height);
                maps.sample(uv, normal, Vec3::new(normal.z, 0.0, -normal.x))
            }
        };
    }
}

/// Tilt `normal` by a tangent-space normal-map texel.
fn perturb(normal: Vec3, tangent: Vec3, texel: Vec3) -> Vec3 {
    let mut tangent = tangent - normal * normal.dot(tangent);
    if tangent.length_squared() < 1e-8 {
        let hint = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        tangent = hint - normal * normal.dot(hint);
    }
    let tangent = tangent.normalize();
    let bitangent = normal.cross(tangent);
    let m = texel * 2.0 - Vec3::ONE;
    return (tangent * m.x + bitangent * m.y + normal * m.z).normalize_or_zero();
}
