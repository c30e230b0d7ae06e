use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::Vec2;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use whitted::export::write_tga;
use whitted::lighting::PointLight;
use whitted::noise::{MarbleField, MarbleParams, NoiseField};
use whitted::render::{RenderConfig, Renderer, Supersampling};
use whitted::tracer::Tracer;

mod scene;

use scene::SceneTextures;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sampling {
    Off,
    Grid,
    Jittered,
}

impl From<Sampling> for Supersampling {
    fn from(sampling: Sampling) -> Supersampling {
        return match sampling {
            Sampling::Off => Supersampling::Off,
            Sampling::Grid => Supersampling::Grid,
            Sampling::Jittered => Supersampling::Jittered,
        };
    }
}

/// Render the demo scene to a TGA file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 1024)]
    width: usize,

    #[arg(long, default_value_t = 1024)]
    height: usize,

    /// Worker threads; each renders one band of columns.
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    #[arg(long, value_enum, default_value_t = Sampling::Grid)]
    sampling: Sampling,

    #[arg(short, long, default_value = "render_output.tga")]
    output: PathBuf,

    /// Skip writing the image.
    #[arg(long)]
    no_export: bool,

    #[arg(long, default_value = "textures/brick_albedo.bmp")]
    brick_albedo: PathBuf,

    #[arg(long, default_value = "textures/brick_normal.bmp")]
    brick_normal: PathBuf,

    /// Metallic map for the pillar.
    #[arg(long)]
    pillar_metallic: Option<PathBuf>,

    /// Side length of the marble noise field.
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    noise_size: u32,

    /// Seeds the marble noise and jittered sampling.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Add the faceted crystal in front of the glass box.
    #[arg(long)]
    crystal: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let size = args.noise_size as usize;
    let noise = NoiseField::generate(size, size, &mut rng).context("bad noise size")?;
    let marble = MarbleField::build(&noise, MarbleParams::default());

    let textures = SceneTextures::load(&args.brick_albedo, &args.brick_normal, args.pillar_metallic.as_deref());
    let scene = scene::build(&textures, args.crystal);
    info!("built scene with {} objects", scene.len());

    let tracer = Tracer::new(scene, PointLight::new(scene::LIGHT_POS), marble);

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        view: Vec2::splat(40.0),
        eye_distance: 40.0,
        workers: args.workers,
        supersampling: args.sampling.into(),
        seed: args.seed,
    };
    let pixels = Renderer::new(&tracer, config)
        .and_then(|renderer| renderer.render())
        .context("render failed")?;

    if args.no_export {
        return Ok(());
    }

    if let Err(err) = write_tga(&args.output, &pixels) {
        error!("{err}");
    }

    return Ok(());
}
