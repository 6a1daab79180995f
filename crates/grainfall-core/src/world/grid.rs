//! Flat cell grid with a one-cell sink border
//!
//! Cells live in a single `Vec` indexed by `x + width * y`. Only the rows
//! above the dashboard band are simulated. The top row and the last
//! simulated row are cleared before every sweep and the sweep never centres
//! on column 0 or `width - 1`, so every `x ± 1` / `y ± 1` access made by the
//! rules lands inside the allocation without a per-access bounds check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::Cell;

/// Smallest accepted width and simulated height
pub const MIN_DIMENSION: u32 = 3;

/// Errors raised when constructing a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid width {width} must be at least {MIN_DIMENSION}")]
    TooNarrow { width: u32 },
    #[error("dashboard height {dashboard_height} must be less than grid height {height}")]
    DashboardTooTall { height: u32, dashboard_height: u32 },
    #[error("dashboard height must be at least 1 so the sink row has a row beneath it")]
    NoDashboard,
    #[error("simulated band of {rows} rows is shorter than {MIN_DIMENSION}")]
    TooShort { rows: u32 },
    #[error("failed to allocate {cells} cells")]
    Allocation { cells: usize },
}

/// Play-field dimensions, fixed for the life of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width in cells
    pub width: u32,
    /// Total height in cells, dashboard band included
    pub height: u32,
    /// Rows at the bottom reserved for the UI; never swept
    pub dashboard_height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 170,
            dashboard_height: 12,
        }
    }
}

impl GridConfig {
    /// Reject dimensions too small for the sink border and the sweep
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width < MIN_DIMENSION {
            return Err(GridError::TooNarrow { width: self.width });
        }
        if self.dashboard_height >= self.height {
            return Err(GridError::DashboardTooTall {
                height: self.height,
                dashboard_height: self.dashboard_height,
            });
        }
        if self.dashboard_height == 0 {
            return Err(GridError::NoDashboard);
        }
        let rows = self.height - self.dashboard_height;
        if rows < MIN_DIMENSION {
            return Err(GridError::TooShort { rows });
        }
        Ok(())
    }
}

/// Indices of a cell and its four orthogonal neighbours
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    pub x: usize,
    pub y: usize,
    pub same: usize,
    pub above: usize,
    pub below: usize,
    /// `x - 1`
    pub west: usize,
    /// `x + 1`
    pub east: usize,
}

/// The simulation grid
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    dashboard_height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;

        let width = config.width as usize;
        let height = config.height as usize;
        let len = width
            .checked_mul(height)
            .ok_or(GridError::Allocation { cells: usize::MAX })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { cells: len })?;
        cells.resize(len, Cell::EMPTY);

        Ok(Self {
            width,
            height,
            dashboard_height: config.dashboard_height as usize,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dashboard_height(&self) -> usize {
        self.dashboard_height
    }

    /// Number of rows the sweep visits
    pub fn simulated_height(&self) -> usize {
        self.height - self.dashboard_height
    }

    /// Last simulated row; cleared every frame
    pub fn sink_row(&self) -> usize {
        self.simulated_height() - 1
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of grid");
        x + self.width * y
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at coordinates, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[self.index(x as usize, y as usize)])
    }

    /// Set a cell; writes outside the grid are ignored
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            let index = self.index(x as usize, y as usize);
            self.cells[index] = cell;
        }
    }

    #[inline]
    pub fn at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    #[inline]
    pub fn put(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Neighbour indices for a sweep centre
    ///
    /// Only valid strictly inside the border: `1 <= x <= width-2` and
    /// `1 <= y < height-1`.
    #[inline]
    pub fn neighborhood(&self, x: usize, y: usize) -> Neighborhood {
        debug_assert!(
            x >= 1 && x + 1 < self.width,
            "sweep column {x} touches the side border"
        );
        debug_assert!(
            y >= 1 && y + 1 < self.height,
            "sweep row {y} touches the top or bottom edge"
        );
        let same = x + self.width * y;
        Neighborhood {
            x,
            y,
            same,
            above: same - self.width,
            below: same + self.width,
            west: same - 1,
            east: same + 1,
        }
    }

    /// Index of `(x + dx, y + dy)` relative to a sweep centre
    #[inline]
    pub fn offset(&self, n: &Neighborhood, dx: isize, dy: isize) -> usize {
        let x = n.x as isize + dx;
        let y = n.y as isize + dy;
        debug_assert!(
            x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height,
            "offset ({dx}, {dy}) from ({}, {}) leaves the grid",
            n.x,
            n.y
        );
        x as usize + self.width * y as usize
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell, dashboard band included
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Empty the top row and the last simulated row
    pub fn clear_sink_border(&mut self) {
        let width = self.width;
        let sink_start = self.sink_row() * width;
        self.cells[..width].fill(Cell::EMPTY);
        self.cells[sink_start..sink_start + width].fill(Cell::EMPTY);
    }

    /// Return every moved cell to rest and count active particles
    pub fn settle(&mut self) -> usize {
        let mut active = 0;
        for cell in &mut self.cells {
            if cell.is_active() {
                active += 1;
            }
            cell.moved = false;
        }
        active
    }

    /// Number of cells holding a moved variant
    pub fn moved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.moved).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::MaterialKind;

    fn small_config() -> GridConfig {
        GridConfig {
            width: 8,
            height: 10,
            dashboard_height: 2,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_narrow_grid() {
        let config = GridConfig {
            width: 2,
            ..small_config()
        };
        assert_eq!(
            Grid::new(config).unwrap_err(),
            GridError::TooNarrow { width: 2 }
        );
    }

    #[test]
    fn test_rejects_dashboard_covering_grid() {
        let config = GridConfig {
            width: 8,
            height: 10,
            dashboard_height: 10,
        };
        assert!(matches!(
            Grid::new(config),
            Err(GridError::DashboardTooTall { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_dashboard() {
        let config = GridConfig {
            dashboard_height: 0,
            ..small_config()
        };
        assert_eq!(Grid::new(config).unwrap_err(), GridError::NoDashboard);
    }

    #[test]
    fn test_rejects_short_band() {
        let config = GridConfig {
            width: 8,
            height: 4,
            dashboard_height: 2,
        };
        assert_eq!(Grid::new(config).unwrap_err(), GridError::TooShort { rows: 2 });
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(small_config()).unwrap();
        assert_eq!(grid.cells().len(), 80);
        assert!(grid.cells().iter().all(Cell::is_empty));
        assert_eq!(grid.simulated_height(), 8);
        assert_eq!(grid.sink_row(), 7);
    }

    #[test]
    fn test_get_set_round_trip_and_bounds() {
        let mut grid = Grid::new(small_config()).unwrap();
        grid.set(3, 4, Cell::SAND);
        assert_eq!(grid.get(3, 4), Some(Cell::SAND));
        assert_eq!(grid.at(grid.index(3, 4)), Cell::SAND);

        grid.set(-1, 4, Cell::SAND);
        grid.set(8, 4, Cell::SAND);
        assert_eq!(grid.get(-1, 4), None);
        assert_eq!(grid.get(8, 0), None);
        assert_eq!(grid.get(0, 10), None);
    }

    #[test]
    fn test_neighborhood_indices() {
        let grid = Grid::new(small_config()).unwrap();
        let n = grid.neighborhood(3, 4);
        assert_eq!(n.same, grid.index(3, 4));
        assert_eq!(n.above, grid.index(3, 3));
        assert_eq!(n.below, grid.index(3, 5));
        assert_eq!(n.west, grid.index(2, 4));
        assert_eq!(n.east, grid.index(4, 4));
        assert_eq!(grid.offset(&n, 1, 1), grid.index(4, 5));
        assert_eq!(grid.offset(&n, -1, -1), grid.index(2, 3));
    }

    #[test]
    fn test_neighborhood_at_border_columns_stays_in_grid() {
        let grid = Grid::new(small_config()).unwrap();
        let len = grid.cells().len();
        for y in 1..=grid.sink_row() {
            for x in [1, grid.width() - 2] {
                let n = grid.neighborhood(x, y);
                for index in [n.above, n.below, n.west, n.east] {
                    assert!(index < len);
                }
                for (dx, dy) in [(-1, 1), (1, 1), (-1, -1), (1, -1)] {
                    assert!(grid.offset(&n, dx, dy) < len);
                }
            }
        }
    }

    #[test]
    fn test_clear_sink_border() {
        let mut grid = Grid::new(small_config()).unwrap();
        for x in 0..8 {
            grid.set(x, 0, Cell::WALL);
            grid.set(x, 3, Cell::WALL);
            grid.set(x, 7, Cell::WALL);
            grid.set(x, 8, Cell::WALL);
        }
        grid.clear_sink_border();

        for x in 0..8 {
            assert_eq!(grid.get(x, 0), Some(Cell::EMPTY));
            assert_eq!(grid.get(x, 3), Some(Cell::WALL));
            assert_eq!(grid.get(x, 7), Some(Cell::EMPTY));
            // Dashboard band is left alone
            assert_eq!(grid.get(x, 8), Some(Cell::WALL));
        }
    }

    #[test]
    fn test_clear_includes_dashboard() {
        let mut grid = Grid::new(small_config()).unwrap();
        grid.set(1, 9, Cell::WALL);
        grid.set(4, 4, Cell::WATER);
        grid.clear();
        assert!(grid.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_settle_resets_moved_and_counts_active() {
        let mut grid = Grid::new(small_config()).unwrap();
        grid.set(1, 1, Cell::MOVED_SAND);
        grid.set(2, 1, Cell::WATER);
        grid.set(3, 1, Cell::WALL);
        grid.set(4, 1, Cell::rest(MaterialKind::Torch));
        grid.set(5, 1, Cell::MOVED_FIRE);

        assert_eq!(grid.moved_count(), 2);
        assert_eq!(grid.settle(), 3);
        assert_eq!(grid.moved_count(), 0);
        assert_eq!(grid.get(1, 1), Some(Cell::SAND));
        assert_eq!(grid.get(5, 1), Some(Cell::FIRE));
    }

    #[test]
    fn test_settle_resets_moved_static_and_empty_cells() {
        let mut grid = Grid::new(small_config()).unwrap();
        grid.set(1, 2, Cell::moved(MaterialKind::Wall));
        grid.set(2, 2, Cell::moved(MaterialKind::Nothing));

        assert_eq!(grid.settle(), 0);
        assert_eq!(grid.moved_count(), 0);
        assert_eq!(grid.get(1, 2), Some(Cell::WALL));
        assert_eq!(grid.get(2, 2), Some(Cell::EMPTY));
    }
}
