pub mod simulation;
pub mod tools;
pub mod world;

pub use world::{EngineOptions, FrameReport, Grid, GridConfig, GridError, Sandbox};
