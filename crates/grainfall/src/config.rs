//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `grainfall.ron` file (if exists)
//! 3. Environment variables prefixed with `GRAINFALL_`
//!
//! Example environment variable: `GRAINFALL_RUN__FRAMES=1200`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use grainfall_core::{EngineOptions, GridConfig};

/// Default config file name, looked up with a `.ron` extension
pub const CONFIG_FILE: &str = "grainfall";

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub engine: EngineOptions,

    #[serde(default)]
    pub run: RunConfig,
}

/// What the headless run does
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to simulate
    pub frames: u64,
    /// Random seed; the wall clock is used when unset
    pub seed: Option<u32>,
    /// Start with the four emitters running
    pub emitters_enabled: bool,
    /// Starting density of every emitter (0.05-1.0)
    pub emitter_density: f32,
    /// Build the demo scene before the first frame
    pub demo_scene: bool,
    /// Log a frame report every this many frames (0 disables)
    pub report_interval: u64,
    /// PNG written after the last frame
    pub snapshot_path: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            seed: None,
            emitters_enabled: true,
            emitter_density: 0.3,
            demo_scene: true,
            report_interval: 60,
            snapshot_path: "grainfall.png".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration with layered priority
    ///
    /// 1. Compiled defaults (lowest priority)
    /// 2. `grainfall.ron` file in current directory
    /// 3. Environment variables prefixed with `GRAINFALL_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same layering with an explicit config file path
    pub fn load_from(file: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("grid.width", 300)?
            .set_default("grid.height", 170)?
            .set_default("grid.dashboard_height", 12)?
            .set_default("engine.particle_swaps", true)?
            .set_default("run.frames", 600)?
            .set_default("run.emitters_enabled", true)?
            .set_default("run.emitter_density", 0.3)?
            .set_default("run.demo_scene", true)?
            .set_default("run.report_interval", 60)?
            .set_default("run.snapshot_path", "grainfall.png")?
            // Layer 2: Config file (optional)
            .add_source(
                File::with_name(file)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (GRAINFALL_RUN__FRAMES, etc.)
            .add_source(Environment::with_prefix("GRAINFALL").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
