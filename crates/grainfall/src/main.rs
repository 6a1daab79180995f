//! Grainfall - headless falling-sand runner

use anyhow::Context;
use clap::Parser;
use grainfall::{Runner, RunnerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to load instead of grainfall.ron
    #[arg(long)]
    config: Option<String>,

    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,

    /// Random seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Path of the PNG snapshot
    #[arg(long)]
    output: Option<String>,

    /// Start with the emitters switched off
    #[arg(long)]
    no_emitters: bool,

    /// Skip the demo scene
    #[arg(long)]
    empty: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunnerConfig::load_from(path),
        None => RunnerConfig::load(),
    }
    .context("Failed to load configuration")?;

    // Command line flags win over every config layer
    if let Some(frames) = args.frames {
        config.run.frames = frames;
    }
    if args.seed.is_some() {
        config.run.seed = args.seed;
    }
    if let Some(output) = args.output {
        config.run.snapshot_path = output;
    }
    if args.no_emitters {
        config.run.emitters_enabled = false;
    }
    if args.empty {
        config.run.demo_scene = false;
    }

    log::info!("Starting Grainfall");

    let mut runner = Runner::new(config)?;
    if let Some(report) = runner.run()? {
        log::info!(
            "Finished after {} frames with {} active particles",
            report.frame,
            report.active_particles
        );
    }
    Ok(())
}
