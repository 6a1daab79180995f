//! Fixed emitter bands that rain material into the top of the grid

use serde::{Deserialize, Serialize};

use super::emit;
use crate::simulation::MaterialKind;
use crate::world::SandRng;
use crate::world::grid::Grid;

/// Columns covered by each default emitter
pub const EMITTER_BAND_WIDTH: u32 = 20;

/// Density every default emitter starts with
pub const DEFAULT_DENSITY: f32 = 0.3;

/// Step used by [`EmitterBank::adjust_density`] callers
pub const DENSITY_STEP: f32 = 0.05;

const MIN_DENSITY: f32 = 0.05;
const MAX_DENSITY: f32 = 1.0;

/// One vertical band of emission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub kind: MaterialKind,
    pub center_x: i32,
    pub width: u32,
    /// Probability of filling each column per frame
    pub density: f32,
    pub enabled: bool,
}

impl Emitter {
    pub fn new(kind: MaterialKind, center_x: i32) -> Self {
        Self {
            kind,
            center_x,
            width: EMITTER_BAND_WIDTH,
            density: DEFAULT_DENSITY,
            enabled: true,
        }
    }

    /// Emit once if enabled; returns the number of cells written
    pub fn emit<R: SandRng>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        if !self.enabled {
            return 0;
        }
        emit(grid, rng, self.center_x, self.width, self.kind, self.density)
    }
}

/// The four emitters of the sandbox: water, sand, salt and oil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterBank {
    pub emitters: Vec<Emitter>,
}

impl EmitterBank {
    /// Default bands spread evenly around the centre of a grid of `width`
    pub fn for_width(width: u32) -> Self {
        let center = (width / 2) as i32;
        let sixth = (width / 6) as i32;

        Self {
            emitters: vec![
                Emitter::new(MaterialKind::Water, center - sixth * 2),
                Emitter::new(MaterialKind::Sand, center - sixth),
                Emitter::new(MaterialKind::Salt, center + sixth),
                Emitter::new(MaterialKind::Oil, center + sixth * 2),
            ],
        }
    }

    /// Flip every emitter on or off
    pub fn toggle_all(&mut self) {
        for emitter in &mut self.emitters {
            emitter.enabled = !emitter.enabled;
        }
        log::debug!(
            "Emitters toggled: {} of {} enabled",
            self.emitters.iter().filter(|e| e.enabled).count(),
            self.emitters.len()
        );
    }

    /// Shift every density by `delta`, clamped to [0.05, 1.0]
    pub fn adjust_density(&mut self, delta: f32) {
        for emitter in &mut self.emitters {
            emitter.density = (emitter.density + delta).clamp(MIN_DENSITY, MAX_DENSITY);
        }
    }

    /// Run every enabled emitter in order; returns the cells written
    pub fn emit_all<R: SandRng>(&self, grid: &mut Grid, rng: &mut R) -> usize {
        self.emitters
            .iter()
            .map(|emitter| emitter.emit(grid, rng))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Cell;
    use crate::world::FastRand;
    use crate::world::grid::GridConfig;

    #[test]
    fn test_default_bank_layout() {
        let bank = EmitterBank::for_width(300);
        let centers: Vec<i32> = bank.emitters.iter().map(|e| e.center_x).collect();
        assert_eq!(centers, vec![50, 100, 200, 250]);

        let kinds: Vec<MaterialKind> = bank.emitters.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MaterialKind::Water,
                MaterialKind::Sand,
                MaterialKind::Salt,
                MaterialKind::Oil
            ]
        );
        assert!(bank.emitters.iter().all(|e| e.enabled));
        assert!(bank.emitters.iter().all(|e| e.width == 20));
        assert!(bank.emitters.iter().all(|e| e.density == DEFAULT_DENSITY));
    }

    #[test]
    fn test_toggle_all() {
        let mut bank = EmitterBank::for_width(300);
        bank.emitters[0].enabled = false;
        bank.toggle_all();
        assert!(bank.emitters[0].enabled);
        assert!(!bank.emitters[1].enabled);
    }

    #[test]
    fn test_adjust_density_clamps() {
        let mut bank = EmitterBank::for_width(300);
        for _ in 0..30 {
            bank.adjust_density(DENSITY_STEP);
        }
        assert!(bank.emitters.iter().all(|e| e.density == 1.0));

        for _ in 0..30 {
            bank.adjust_density(-DENSITY_STEP);
        }
        assert!(bank.emitters.iter().all(|e| e.density == MIN_DENSITY));
    }

    #[test]
    fn test_disabled_emitter_writes_nothing_and_draws_nothing() {
        let mut grid = Grid::new(GridConfig::default()).unwrap();
        let mut rng = FastRand::new(1);
        let mut emitter = Emitter::new(MaterialKind::Water, 50);
        emitter.enabled = false;

        assert_eq!(emitter.emit(&mut grid, &mut rng), 0);
        assert_eq!(rng, FastRand::new(1));
    }

    #[test]
    fn test_emit_all_fills_row_one() {
        let mut grid = Grid::new(GridConfig::default()).unwrap();
        let mut rng = FastRand::new(9);
        let mut bank = EmitterBank::for_width(300);
        for emitter in &mut bank.emitters {
            emitter.density = 1.0;
        }

        assert_eq!(bank.emit_all(&mut grid, &mut rng), 80);
        assert_eq!(grid.get(40, 1), Some(Cell::WATER));
        assert_eq!(grid.get(109, 1), Some(Cell::SAND));
        assert_eq!(grid.get(190, 1), Some(Cell::SALT));
        assert_eq!(grid.get(259, 1), Some(Cell::OIL));
        assert_eq!(grid.get(150, 1), Some(Cell::EMPTY));
        assert!((0..300).all(|x| grid.get(x, 2) == Some(Cell::EMPTY)));
    }
}
