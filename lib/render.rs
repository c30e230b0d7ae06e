//! Parallel frame rendering over disjoint column bands.

use std::time::Instant;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::tracer::Tracer;
use crate::util::rand_in_unit_square;

/// Rays cast per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Supersampling {
    /// One ray through the pixel centre.
    Off,
    /// Four rays at the centres of the pixel's quadrants.
    #[default]
    Grid,
    /// Four rays, each at a random position inside its quadrant.
    Jittered,
}

const QUADRANTS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 0.5),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.5, 0.5),
];

#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// World-space size of the image window.
    pub view: Vec2,
    /// Distance from the eye to the image window.
    pub eye_distance: f32,
    pub workers: usize,
    pub supersampling: Supersampling,
    /// Seeds the per-band jitter generators.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        return RenderConfig {
            width: 1024,
            height: 1024,
            view: Vec2::splat(40.0),
            eye_distance: 40.0,
            workers: 4,
            supersampling: Supersampling::Grid,
            seed: 0,
        };
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.width > u16::MAX as usize || self.height > u16::MAX as usize {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} exceeds {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if self.workers == 0 {
            return Err(RenderError::InvalidConfig("at least one worker is required".into()));
        }
        if !(self.view.x > 0.0 && self.view.y > 0.0 && self.eye_distance > 0.0) {
            return Err(RenderError::InvalidConfig("view window and eye distance must be positive".into()));
        }
        return Ok(());
    }

    /// Columns handled by each worker; the last band may be narrower.
    pub fn band_width(&self) -> usize {
        return (self.width + self.workers - 1) / self.workers;
    }
}

/// Colours of a rendered frame. `(0, 0)` is the bottom-left pixel.
///
/// Stored column by column so that a band of columns is one contiguous slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Vec3>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        return PixelBuffer { width, height, pixels: vec![Vec3::ZERO; width * height] };
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Vec3) -> PixelBuffer {
        let pixels = (0..width).flat_map(|x| (0..height).map(move |y| (x, y))).map(|(x, y)| f(x, y)).collect();
        return PixelBuffer { width, height, pixels };
    }

    pub fn width(&self) -> usize {
        return self.width;
    }

    pub fn height(&self) -> usize {
        return self.height;
    }

    pub fn get(&self, x: usize, y: usize) -> Vec3 {
        return self.pixels[x * self.height + y];
    }
}

pub struct Renderer<'a> {
    tracer: &'a Tracer,
    config: RenderConfig,
    camera: Camera,
}

impl<'a> Renderer<'a> {
    pub fn new(tracer: &'a Tracer, config: RenderConfig) -> Result<Renderer<'a>> {
        config.validate()?;
        let camera = Camera::new(Vec3::ZERO, config.view, config.eye_distance, config.width, config.height);
        return Ok(Renderer { tracer, config, camera });
    }

    /// Render one frame. Each worker owns a band of whole columns and writes
    /// only into it; the call returns once every band is done.
    pub fn render(&self) -> Result<PixelBuffer> {
        let config = &self.config;
        let pool = rayon::ThreadPoolBuilder::new().num_threads(config.workers).build()?;

        log::info!(
            "rendering {}x{} on {} workers ({:?} sampling)",
            config.width,
            config.height,
            config.workers,
            config.supersampling
        );
        let start = Instant::now();

        let mut buffer = PixelBuffer::new(config.width, config.height);
        let band = config.band_width();
        let height = config.height;

        pool.install(|| {
            buffer.pixels.par_chunks_mut(band * height).enumerate().for_each(|(i, columns)| {
                let first = i * band;
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
                for (dx, column) in columns.chunks_mut(height).enumerate() {
                    for (y, pixel) in column.iter_mut().enumerate() {
                        *pixel = self.sample(first + dx, y, &mut rng);
                    }
                }
                log::debug!("band {} (columns {}..{}) done", i, first, first + columns.len() / height);
            });
        });

        log::info!("render finished in {:.2?}", start.elapsed());
        return Ok(buffer);
    }

    fn sample<R: Rng + ?Sized>(&self, x: usize, y: usize, rng: &mut R) -> Vec3 {
        let trace = |offset: Vec2| self.tracer.trace(&self.camera.create_ray(x, y, offset), 1);

        return match self.config.supersampling {
            Supersampling::Off => trace(Vec2::splat(0.5)),
            Supersampling::Grid => QUADRANTS.iter().map(|q| trace(*q + Vec2::splat(0.25))).sum::<Vec3>() / 4.0,
            Supersampling::Jittered => {
                QUADRANTS.iter().map(|q| trace(*q + rand_in_unit_square(rng) * 0.5)).sum::<Vec3>() / 4.0
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = RenderConfig { workers: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let config = RenderConfig { width: 70_000, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_band_width_covers_all_columns() {
        let config = RenderConfig { width: 10, workers: 4, ..Default::default() };
        assert_eq!(config.band_width(), 3);
        assert!(config.band_width() * config.workers >= config.width);
    }

    #[test]
    fn test_pixel_buffer_indexing() {
        let buf = PixelBuffer::from_fn(3, 2, |x, y| Vec3::new(x as f32, y as f32, 0.0));
        assert_eq!(buf.get(2, 1), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(buf.get(0, 1), Vec3::new(0.0, 1.0, 0.0));
    }
}
