//! PNG snapshots of the simulated band

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};

use grainfall_core::Grid;
use grainfall_simulation::Materials;

/// Render the simulated rows of `grid`, one pixel per cell
///
/// The dashboard band is left out; moved cells use their rest colour.
pub fn render(grid: &Grid, materials: &Materials) -> RgbaImage {
    let width = grid.width() as u32;
    let height = grid.simulated_height() as u32;

    ImageBuffer::from_fn(width, height, |x, y| {
        let cell = grid.at(grid.index(x as usize, y as usize));
        Rgba(materials.get_color(cell.kind))
    })
}

/// Render `grid` and save it as a PNG at `path`
pub fn save(grid: &Grid, materials: &Materials, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    render(grid, materials)
        .save(path)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    log::info!("Snapshot saved to {}", path.display());
    Ok(())
}
