//! Brush and emitter primitives that write into the grid

mod emitter;
mod pen;

pub use emitter::{DEFAULT_DENSITY, DENSITY_STEP, EMITTER_BAND_WIDTH, Emitter, EmitterBank};
pub use pen::{MAX_PEN_SIZE, MIN_PEN_SIZE, PALETTE, Pen};

use glam::IVec2;

use crate::simulation::{Cell, MaterialKind};
use crate::world::SandRng;
use crate::world::grid::Grid;

/// Row emitters write into; row 0 is cleared every frame
pub const EMIT_ROW: i32 = 1;

/// Empty every cell of the grid
pub fn clear(grid: &mut Grid) {
    grid.clear();
}

/// Fill a disc of rest `kind` cells around `center`
///
/// Cells with squared distance up to `radius²` are written; the scan starts
/// one cell further out on the low side and is clipped to the grid.
pub fn draw_disc(grid: &mut Grid, center: IVec2, radius: u32, kind: MaterialKind) {
    let r = radius as i64;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let width = grid.width() as i64;
    let height = grid.height() as i64;

    let x_end = (cx + r).min(width - 1);
    let y_end = (cy + r).min(height - 1);
    let cell = Cell::rest(kind);
    // Offsets of a far-away centre reach 2^33, beyond i64 once squared
    let r_squared = (r as i128) * (r as i128);

    for x in (cx - r - 1).max(0)..=x_end {
        for y in (cy - r - 1).max(0)..=y_end {
            let (dx, dy) = ((x - cx) as i128, (y - cy) as i128);
            if dx * dx + dy * dy <= r_squared {
                grid.set(x as i32, y as i32, cell);
            }
        }
    }
}

/// Sample `i` of a `steps`-sample segment along one axis
fn lerp(start: i32, end: i32, i: i64, steps: i64) -> i64 {
    let start = start as i128;
    ((start * steps as i128 + i as i128 * (end as i128 - start)) / steps as i128) as i64
}

/// Samples `[first, last]` whose coordinate on one axis can lie in `[lo, hi]`
///
/// Padded by one sample on each side; the discs themselves are clipped.
fn axis_samples(start: i32, end: i32, steps: i64, lo: i64, hi: i64) -> Option<(i64, i64)> {
    let (s, e) = (start as i128, end as i128);
    if s == e {
        return (lo as i128 <= s && s <= hi as i128).then_some((0, steps));
    }

    // A sample is within one cell of the exact line, so widen the band by one
    let delta = e - s;
    let a = (lo as i128 - 1 - s) * steps as i128 / delta;
    let b = (hi as i128 + 1 - s) * steps as i128 / delta;
    let first = (a.min(b) - 1).max(0);
    let last = (a.max(b) + 1).min(steps as i128);
    (first <= last).then_some((first as i64, last as i64))
}

/// Stamp discs along the segment `from -> to`, endpoints included
///
/// Sample `i` of `steps = max(|dx|, |dy|)` sits at `trunc(a*to + (1-a)*from)`
/// with `a = i / steps`, evaluated exactly so neighbouring samples never
/// skip a cell. Samples whose disc cannot reach the grid are not visited.
pub fn draw_line(grid: &mut Grid, from: IVec2, to: IVec2, radius: u32, kind: MaterialKind) {
    if from == to {
        draw_disc(grid, to, radius, kind);
        return;
    }

    let dx = (to.x as i64 - from.x as i64).abs();
    let dy = (to.y as i64 - from.y as i64).abs();
    let steps = dx.max(dy);
    log::trace!("Line {from} -> {to}: {steps} steps, radius {radius}");

    let reach = radius as i64 + 1;
    let x_range = axis_samples(from.x, to.x, steps, -reach, grid.width() as i64 - 1 + reach);
    let y_range = axis_samples(from.y, to.y, steps, -reach, grid.height() as i64 - 1 + reach);
    let (Some((x_first, x_last)), Some((y_first, y_last))) = (x_range, y_range) else {
        return;
    };

    for i in x_first.max(y_first)..=x_last.min(y_last) {
        let x = lerp(from.x, to.x, i, steps);
        let y = lerp(from.y, to.y, i, steps);
        // Samples lie between the endpoints, so they fit in i32
        draw_disc(grid, IVec2::new(x as i32, y as i32), radius, kind);
    }
}

/// Scatter `kind` over `[center_x - width/2, center_x + width/2)` of row 1
///
/// Every column costs one random draw whether or not it lies on the grid.
/// Returns the number of cells written.
pub fn emit<R: SandRng>(
    grid: &mut Grid,
    rng: &mut R,
    center_x: i32,
    width: u32,
    kind: MaterialKind,
    density: f32,
) -> usize {
    let half = (width / 2) as i32;
    let start = center_x - half;
    let end = center_x + half;

    if end <= 0 || start >= grid.width() as i32 {
        log::warn!(
            "Emitter band [{start}, {end}) lies outside the {}-column grid",
            grid.width()
        );
    }

    let cell = Cell::rest(kind);
    let mut written = 0;
    for x in start..end {
        if rng.check_probability(density) && grid.in_bounds(x, EMIT_ROW) {
            grid.set(x, EMIT_ROW, cell);
            written += 1;
        }
    }
    written
}
