use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ocean_fft::prelude::*;

/// Command-line tool to simulate an ocean surface with the Tessendorf FFT algorithm
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid resolution (samples per side, power of two)
    #[arg(short = 'n', long, default_value_t = 64)]
    resolution: usize,

    /// Physical size of the ocean patch in meters
    #[arg(short, long, default_value_t = 64.0)]
    length: f32,

    /// Phillips spectrum amplitude
    #[arg(short, long, default_value_t = 0.0005)]
    amplitude: f32,

    /// Wind velocity X component
    #[arg(long, default_value_t = 0.0)]
    wind_x: f32,

    /// Wind velocity Z component
    #[arg(long, default_value_t = 32.0)]
    wind_z: f32,

    /// Horizontal displacement scale (negative sharpens crests)
    #[arg(short, long, default_value_t = -1.0, allow_hyphen_values = true)]
    choppiness: f32,

    /// Random seed for the initial spectrum
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Time of the first frame in seconds
    #[arg(short, long, default_value_t = 0.0)]
    time: f64,

    /// Number of frames to export
    #[arg(short, long, default_value_t = 1)]
    frames: usize,

    /// Time step between frames in seconds
    #[arg(long, default_value_t = 1.0 / 30.0)]
    frame_step: f64,

    /// Number of tiles along X in the exported scene
    #[arg(long, default_value_t = 1)]
    tiles_x: usize,

    /// Number of tiles along Z in the exported scene
    #[arg(long, default_value_t = 1)]
    tiles_z: usize,

    /// Transform the fields on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Output file path; frames get a numeric suffix when more than one is exported
    #[arg(short, long, default_value = "ocean_surface.glb")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.frames > 0, "at least one frame must be exported");

    let config = OceanConfig {
        choppiness: args.choppiness,
        seed: args.seed,
        parallel: !args.sequential,
        ..OceanConfig::new(
            args.resolution,
            args.amplitude,
            glam::Vec2::new(args.wind_x, args.wind_z),
            args.length,
        )
    };

    log::info!(
        "Ocean patch: {}x{} samples over {} m, wind=({}, {}), amplitude={}, choppiness={}",
        args.resolution,
        args.resolution,
        args.length,
        args.wind_x,
        args.wind_z,
        args.amplitude,
        args.choppiness
    );

    let start = Instant::now();
    let mut ocean = Ocean::new(config).context("failed to initialise the ocean spectrum")?;
    log::info!("Initial spectrum computed in {:.2?}", start.elapsed());

    for frame in 0..args.frames {
        let t = args.time + frame as f64 * args.frame_step;

        let start = Instant::now();
        ocean.evaluate_waves(t);
        let elapsed = start.elapsed();

        if let Some((min_height, max_height)) = ocean.surface().height_range() {
            log::info!(
                "Frame {} at t={:.3}s: height range {:.4}..{:.4} m, evaluated in {:.2?}",
                frame,
                t,
                min_height,
                max_height,
                elapsed
            );
        }

        let path = frame_path(&args.output, frame, args.frames);
        ocean
            .surface()
            .save_glb_tiled(&path, args.tiles_x, args.tiles_z)
            .with_context(|| format!("failed to export frame {} to {}", frame, path.display()))?;
    }

    log::info!("Done!");
    Ok(())
}

/// `ocean.glb` for a single frame, `ocean_007.glb` for frame 7 of many.
fn frame_path(output: &Path, frame: usize, frames: usize) -> PathBuf {
    if frames == 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ocean_surface".to_string());
    let extension = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "glb".to_string());
    output.with_file_name(format!("{}_{:03}.{}", stem, frame, extension))
}
