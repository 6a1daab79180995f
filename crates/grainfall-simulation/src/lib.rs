//! Material taxonomy and cell encoding for Grainfall
//!
//! This crate provides the foundational data types for the particle simulation:
//! - Material kinds and their sweep categories (MaterialKind, MaterialCategory)
//! - Presentation data (MaterialDef, Materials)
//! - The per-cell value with its rest/moved state (Cell)

mod cell;
mod materials;

pub use cell::Cell;
pub use materials::{MaterialCategory, MaterialDef, MaterialKind, Materials};
