//! Headless frame loop: emitters, sweep, reports, snapshot

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use grainfall_core::tools::{DEFAULT_DENSITY, EmitterBank};
use grainfall_core::{FrameReport, Sandbox};
use grainfall_simulation::Materials;

use crate::config::RunnerConfig;
use crate::{scene, snapshot};

/// Runner state
pub struct Runner {
    sandbox: Sandbox,
    bank: EmitterBank,
    materials: Materials,
    config: RunnerConfig,
    seed: u32,
}

/// Seed taken from the wall clock when none is configured
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as u32)
        .unwrap_or_default()
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Result<Self> {
        let seed = config.run.seed.unwrap_or_else(clock_seed);
        let mut sandbox = Sandbox::with_seed(config.grid, config.engine, seed)
            .context("Failed to create sandbox")?;

        let mut bank = EmitterBank::for_width(config.grid.width);
        bank.adjust_density(config.run.emitter_density - DEFAULT_DENSITY);
        if !config.run.emitters_enabled {
            bank.toggle_all();
        }

        if config.run.demo_scene {
            scene::build(sandbox.grid_mut());
        }

        log::info!(
            "Runner ready: seed {seed}, {} frames, emitters {}",
            config.run.frames,
            if config.run.emitters_enabled { "on" } else { "off" }
        );

        Ok(Self {
            sandbox,
            bank,
            materials: Materials::new(),
            config,
            seed,
        })
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Emit, then advance the sandbox by one frame
    pub fn run_frame(&mut self) -> FrameReport {
        self.sandbox.run_emitters(&self.bank);
        self.sandbox.step()
    }

    /// Run every configured frame and write the snapshot
    ///
    /// Returns the report of the last frame, if any frame ran.
    pub fn run(&mut self) -> Result<Option<FrameReport>> {
        let interval = self.config.run.report_interval;
        let mut last = None;

        for _ in 0..self.config.run.frames {
            let report = self.run_frame();
            if interval > 0 && report.frame % interval == 0 {
                log::info!(
                    "Frame {}: {} active particles, {} moved, {} reactions",
                    report.frame,
                    report.active_particles,
                    report.counters.pixels_moved,
                    report.counters.reactions
                );
            }
            last = Some(report);
        }

        if !self.config.run.snapshot_path.is_empty() {
            snapshot::save(
                self.sandbox.grid(),
                &self.materials,
                &self.config.run.snapshot_path,
            )?;
        }

        Ok(last)
    }
}
