//! Headless driver: builds a scene, runs it at a fixed step and reports
//! where each population ended up.
//!
//! Run with: `cargo run --release -- --frames 900 --flip-every 300`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use treemorph::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "treemorph", version, about = "Run the morphing tree headless")]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame, must be positive
    #[arg(short, long, default_value_t = 1.0 / 60.0, value_parser = parse_delta)]
    delta: f32,

    /// Flip the toggle every N frames (0 = never)
    #[arg(long, default_value_t = 0)]
    flip_every: u64,

    /// Seed for dataset generation, overrides the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn parse_delta(s: &str) -> Result<f32, String> {
    let delta: f32 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if delta.is_finite() && delta > 0.0 {
        Ok(delta)
    } else {
        Err(format!("frame delta must be a positive number of seconds, got {s}"))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MorphConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MorphConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut scene = Scene::builder()
        .with_config(config)
        .build()
        .context("building scene")?;
    let mut clock = FrameClock::fixed(args.delta);
    let mut stats = FrameStats::new();

    log::info!("mode: {} (control: {})", scene.state(), scene.state().action_label());

    for frame in 1..=args.frames {
        scene.frame(clock.tick());
        scene.render(&mut stats);

        if args.flip_every > 0 && frame % args.flip_every == 0 {
            let previous = scene.state();
            let state = scene.flip();
            log::info!("frame {frame}: {} -> {}", previous.action_label(), state);
        }
    }

    log::info!(
        "ran {} frames, {:.2}s simulated, final mode: {}",
        stats.frames(),
        clock.elapsed(),
        scene.state()
    );
    for kind in [PopulationKind::Needle, PopulationKind::Ornament, PopulationKind::Topper] {
        if let Some(s) = stats.get(kind) {
            log::info!(
                "{:>8}: {:>5} instances, centroid ({:.2}, {:.2}, {:.2}), spread {:.2}",
                kind.name(),
                s.instances,
                s.centroid.x,
                s.centroid.y,
                s.centroid.z,
                s.spread
            );
        }
    }

    Ok(())
}
