//! Recursive ray tracer for small analytic scenes.
//!
//! A [`Tracer`](tracer::Tracer) shades rays against an ordered
//! [`Scene`](scene::Scene) of planes, spheres, capped cylinders and tori,
//! adding shadows and reflection, transparency and refraction up to
//! [`MAX_STEPS`](tracer::MAX_STEPS) levels deep. A
//! [`Renderer`](render::Renderer) drives it over the image in parallel column
//! bands and [`export`] writes the result as a TGA file.

pub mod camera;
pub mod cylinder;
pub mod error;
pub mod export;
pub mod lighting;
pub mod material;
pub mod noise;
pub mod plane;
pub mod quartic;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod surface;
pub mod texture;
pub mod torus;
pub mod tracer;
pub mod util;

pub use error::{RenderError, Result};
