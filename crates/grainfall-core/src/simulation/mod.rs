//! Simulation data - materials and cells

// Re-export from grainfall-simulation
pub use grainfall_simulation::{Cell, MaterialCategory, MaterialDef, MaterialKind, Materials};
