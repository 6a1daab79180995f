//! Demo scene drawn before the first frame

use glam::IVec2;

use grainfall_core::Grid;
use grainfall_core::tools::Pen;
use grainfall_simulation::MaterialKind;

/// Point at fractions of the simulated band
fn at(grid: &Grid, fx: f32, fy: f32) -> IVec2 {
    let w = grid.width() as f32;
    let h = grid.simulated_height() as f32;
    IVec2::new((w * fx) as i32, (h * fy) as i32)
}

/// Draw a few static structures for the emitters to pour onto
///
/// Everything is laid out relative to the grid size: two funnel ramps under
/// the emitters, an ironwall basin, a plant shelf over a torch and an ice
/// block on a stove.
pub fn build(grid: &mut Grid) {
    let mut pen = Pen::new(MaterialKind::Wall, 1);

    // Funnel ramps under the water/sand and salt/oil emitters
    pen.stroke(grid, at(grid, 0.08, 0.35), at(grid, 0.30, 0.45));
    pen.stroke(grid, at(grid, 0.92, 0.35), at(grid, 0.70, 0.45));

    // Basin that rusts once water reaches it
    pen.set_material(MaterialKind::IronWall);
    pen.stroke(grid, at(grid, 0.40, 0.70), at(grid, 0.40, 0.85));
    pen.stroke(grid, at(grid, 0.40, 0.85), at(grid, 0.60, 0.85));
    pen.stroke(grid, at(grid, 0.60, 0.85), at(grid, 0.60, 0.70));

    // Plants over a torch
    pen.set_material(MaterialKind::Plant);
    pen.stroke(grid, at(grid, 0.10, 0.75), at(grid, 0.25, 0.75));
    pen.set_material(MaterialKind::Torch);
    pen.shrink();
    pen.stroke(grid, at(grid, 0.17, 0.80), at(grid, 0.18, 0.80));

    // Ice block on a stove
    pen.set_material(MaterialKind::Stove);
    pen.stroke(grid, at(grid, 0.75, 0.85), at(grid, 0.88, 0.85));
    pen.set_material(MaterialKind::Ice);
    pen.grow();
    pen.stroke(grid, at(grid, 0.78, 0.78), at(grid, 0.85, 0.78));

    log::info!("Demo scene built");
}
