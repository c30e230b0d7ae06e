//! Value noise, turbulence and the marble texture built from them.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::error::{RenderError, Result};

/// Grid of uniform random samples in `[0, 1)`, addressed toroidally.
#[derive(Debug, Clone)]
pub struct NoiseField {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl NoiseField {
    pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<NoiseField> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfig(format!("noise field {}x{} is empty", width, height)));
        }
        let samples = (0..width * height).map(|_| rng.gen::<f32>()).collect();
        return Ok(NoiseField { width, height, samples });
    }

    pub fn width(&self) -> usize {
        return self.width;
    }

    pub fn height(&self) -> usize {
        return self.height;
    }

    fn at(&self, x: usize, y: usize) -> f32 {
        return self.samples[y * self.width + x];
    }

    /// Blend of the cell containing `(x, y)` and its backward neighbours.
    ///
    /// The weights follow the lodev value-noise layout: the `fract` weight goes
    /// to the forward cell on both axes. Coordinates are expected to be
    /// non-negative; below zero `fract` turns negative and the blend no longer
    /// repeats with the grid period.
    pub fn smooth(&self, x: f32, y: f32) -> f32 {
        let fract_x = x - x.trunc();
        let fract_y = y - y.trunc();

        let w = self.width as i64;
        let h = self.height as i64;

        let x1 = (x.trunc() as i64).rem_euclid(w) as usize;
        let y1 = (y.trunc() as i64).rem_euclid(h) as usize;
        let x2 = (x1 + self.width - 1) % self.width;
        let y2 = (y1 + self.height - 1) % self.height;

        let mut value = 0.0;
        value += fract_x * fract_y * self.at(x1, y1);
        value += (1.0 - fract_x) * fract_y * self.at(x2, y1);
        value += fract_x * (1.0 - fract_y) * self.at(x1, y2);
        value += (1.0 - fract_x) * (1.0 - fract_y) * self.at(x2, y2);
        return value;
    }

    /// Octave sum of smoothed noise from `size` down to 1, scaled so the
    /// result stays below 256.
    pub fn turbulence(&self, x: f32, y: f32, size: f32) -> f32 {
        let initial_size = size;
        let mut size = size;
        let mut value = 0.0;

        while size >= 1.0 {
            value += self.smooth(x / size, y / size) * size;
            size /= 2.0;
        }

        return 128.0 * value / initial_size;
    }
}

/// Shape of the marble veins.
#[derive(Debug, Clone, Copy)]
pub struct MarbleParams {
    pub x_period: f32,
    pub y_period: f32,
    pub turb_power: f32,
    pub turb_size: f32,
}

impl Default for MarbleParams {
    fn default() -> MarbleParams {
        return MarbleParams { x_period: 5.0, y_period: 10.0, turb_power: 2.0, turb_size: 128.0 };
    }
}

/// Grayscale marble intensities precomputed from a [`NoiseField`].
#[derive(Debug, Clone)]
pub struct MarbleField {
    width: usize,
    height: usize,
    intensity: Vec<f32>,
}

impl MarbleField {
    pub fn build(noise: &NoiseField, params: MarbleParams) -> MarbleField {
        let (width, height) = (noise.width(), noise.height());
        let mut intensity = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let (xf, yf) = (x as f32, y as f32);
                let phase = xf * params.x_period / width as f32
                    + yf * params.y_period / height as f32
                    + params.turb_power * noise.turbulence(xf, yf, params.turb_size) / 256.0;
                intensity.push((phase * PI).sin().abs());
            }
        }

        log::debug!("built {}x{} marble field", width, height);
        return MarbleField { width, height, intensity };
    }

    pub fn width(&self) -> usize {
        return self.width;
    }

    pub fn height(&self) -> usize {
        return self.height;
    }

    /// Intensity at a cell; indices wrap at the edges.
    pub fn intensity(&self, x: i64, y: i64) -> f32 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        return self.intensity[y * self.width + x];
    }

    /// Marble colour at normalized `(u, v)`; `v` counts rows from the far end.
    pub fn sample_at(&self, u: f32, v: f32) -> Vec3 {
        let x = (u * self.width as f32).round() as i64;
        let y = self.height as i64 - (v * self.height as f32).round() as i64;
        return Vec3::splat(self.intensity(x, y));
    }
}
