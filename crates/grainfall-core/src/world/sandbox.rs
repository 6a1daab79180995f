//! Sandbox - owns the grid and drives the per-frame sweep

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::simulation::MaterialKind;
use crate::tools::{self, EmitterBank};
use crate::world::grid::{Grid, GridConfig, GridError};
use crate::world::rng_trait::{FAST_RAND_MAX, FastRand, SandRng};
use crate::world::{CellularAutomataUpdater, FrameCounters, SimStats, StillbornSystem};

/// Mobile particles only get a movement attempt when a draw reaches this
const MOVEMENT_GATE: u32 = FAST_RAND_MAX / 13;

/// Tunables of the movement engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Let lighter liquids sink below denser ones sitting on top
    pub particle_swaps: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            particle_swaps: true,
        }
    }
}

/// Summary of one simulated frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames stepped so far, this one included
    pub frame: u64,
    /// Non-empty, non-static cells after the frame
    pub active_particles: usize,
    pub counters: FrameCounters,
}

/// The simulation: a grid, its random source and the engine options
pub struct Sandbox<R: SandRng = FastRand> {
    grid: Grid,
    rng: R,
    options: EngineOptions,
    counters: FrameCounters,
    frame: u64,
    active_particles: usize,
}

impl Sandbox<FastRand> {
    /// Sandbox driven by the classic generator
    pub fn with_seed(
        config: GridConfig,
        options: EngineOptions,
        seed: u32,
    ) -> Result<Self, GridError> {
        Self::new(config, options, FastRand::new(seed))
    }
}

impl<R: SandRng> Sandbox<R> {
    pub fn new(config: GridConfig, options: EngineOptions, rng: R) -> Result<Self, GridError> {
        let grid = Grid::new(config)?;
        log::info!(
            "Sandbox created: {}x{} cells, {} dashboard rows, particle swaps {}",
            config.width,
            config.height,
            config.dashboard_height,
            if options.particle_swaps { "on" } else { "off" }
        );

        Ok(Self {
            grid,
            rng,
            options,
            counters: FrameCounters::default(),
            frame: 0,
            active_particles: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Active particle count from the last settle pass
    pub fn active_particles(&self) -> usize {
        self.active_particles
    }

    /// Empty the whole grid, dashboard band included
    pub fn clear(&mut self) {
        tools::clear(&mut self.grid);
        self.active_particles = 0;
        log::info!("Sandbox cleared");
    }

    pub fn draw_disc(&mut self, center: IVec2, radius: u32, kind: MaterialKind) {
        tools::draw_disc(&mut self.grid, center, radius, kind);
    }

    pub fn draw_line(&mut self, from: IVec2, to: IVec2, radius: u32, kind: MaterialKind) {
        tools::draw_line(&mut self.grid, from, to, radius, kind);
    }

    /// Scatter `kind` over row 1; returns the number of cells written
    pub fn emit(&mut self, center_x: i32, width: u32, kind: MaterialKind, density: f32) -> usize {
        tools::emit(&mut self.grid, &mut self.rng, center_x, width, kind, density)
    }

    /// Run every enabled emitter of `bank` once
    pub fn run_emitters(&mut self, bank: &EmitterBank) -> usize {
        bank.emit_all(&mut self.grid, &mut self.rng)
    }

    /// Advance one frame
    ///
    /// Clears the sink border, sweeps every simulated row, then returns all
    /// moved particles to rest while counting them.
    pub fn step(&mut self) -> FrameReport {
        self.counters.reset();

        self.grid.clear_sink_border();
        self.sweep();
        self.active_particles = self.grid.settle();
        self.frame += 1;

        let report = FrameReport {
            frame: self.frame,
            active_particles: self.active_particles,
            counters: self.counters,
        };
        log::debug!(
            "Frame {}: {} active, {} moved, {} reactions, {} state changes",
            report.frame,
            report.active_particles,
            report.counters.pixels_moved,
            report.counters.reactions,
            report.counters.state_changes
        );
        report
    }

    /// Visit the simulated rows top to bottom, each in a random direction
    ///
    /// Relies on the sink border cleared by [`Sandbox::step`].
    fn sweep(&mut self) {
        let last_column = self.grid.width() - 2;
        for y in 0..self.grid.simulated_height() {
            if self.rng.coin() {
                for x in (1..=last_column).rev() {
                    self.update_cell(x, y);
                }
            } else {
                for x in 1..=last_column {
                    self.update_cell(x, y);
                }
            }
        }
    }

    /// Dispatch one cell to the static rules or the movement engine
    fn update_cell(&mut self, x: usize, y: usize) {
        let cell = self.grid.at(self.grid.index(x, y));
        if cell.is_empty() {
            return;
        }

        let n = self.grid.neighborhood(x, y);
        let stats: &mut dyn SimStats = &mut self.counters;

        if cell.is_stillborn() {
            StillbornSystem::update(&mut self.grid, &n, &mut self.rng, stats);
            return;
        }

        // The gate is drawn before the rest check, so moved cells still
        // consume a value
        let passes_gate = self.rng.next_raw() >= MOVEMENT_GATE;
        if cell.moved {
            return;
        }
        if passes_gate {
            CellularAutomataUpdater::update_mobile(
                &mut self.grid,
                &n,
                &self.options,
                stats,
                &mut self.rng,
            );
        } else {
            stats.record_gate_skip();
        }
    }
}
