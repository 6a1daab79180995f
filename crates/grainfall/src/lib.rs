//! # Grainfall
//!
//! Headless runner for the falling-sand sandbox: loads a layered
//! configuration, pours the emitters into the grid for a number of frames
//! and writes a PNG snapshot of the result.

pub mod config;
pub mod runner;
pub mod scene;
pub mod snapshot;

pub use config::{RunConfig, RunnerConfig};
pub use runner::Runner;
