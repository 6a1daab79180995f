//! World management - grid, sweep and particle rules

mod ca_update;
mod chemistry_system;
pub mod grid;
pub mod rng_trait;
pub mod sandbox;
pub mod stats;
mod stillborn_system;

pub use ca_update::{CellularAutomataUpdater, Lateral, SwapPartners};
pub use chemistry_system::{ChemistrySystem, Flow, ReactionRule};
pub use grid::{Grid, GridConfig, GridError, MIN_DIMENSION, Neighborhood};
pub use rng_trait::{FAST_RAND_MAX, FastRand, SandRng};
pub use sandbox::{EngineOptions, FrameReport, Sandbox};
pub use stats::{FrameCounters, NoopStats, SimStats};
pub use stillborn_system::{StillbornRule, StillbornSystem};
