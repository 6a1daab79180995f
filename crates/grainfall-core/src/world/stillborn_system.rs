//! Reactions of static materials
//!
//! Static cells never relocate. Once per frame each one may transform itself
//! or its orthogonal neighbours in place. Comparisons are exact: a rule that
//! looks for `WATER` ignores moved water unless it says otherwise.

use crate::simulation::{Cell, MaterialKind};
use crate::world::grid::{Grid, Neighborhood};
use crate::world::{SandRng, SimStats};

/// Signature shared by every static rule
pub type StillbornRule<R> = fn(&mut Grid, &Neighborhood, &mut R, &mut dyn SimStats);

/// Applies the per-kind rules of static materials
pub struct StillbornSystem;

impl StillbornSystem {
    /// Rule for a static kind; `None` for inert kinds (wall, ice)
    pub fn rule_for<R: SandRng>(kind: MaterialKind) -> Option<StillbornRule<R>> {
        let rule: StillbornRule<R> = match kind {
            MaterialKind::Void => Self::update_void,
            MaterialKind::IronWall => Self::update_ironwall,
            MaterialKind::Torch => Self::update_torch,
            MaterialKind::Plant => Self::update_plant,
            MaterialKind::Ember => Self::update_ember,
            MaterialKind::Stove => Self::update_stove,
            MaterialKind::Rust => Self::update_rust,
            MaterialKind::WaterSpout | MaterialKind::SandSpout | MaterialKind::OilSpout => {
                Self::update_spout
            }
            MaterialKind::SaltSpout => Self::update_salt_spout,
            _ => return None,
        };
        Some(rule)
    }

    /// Run the rule for the static cell at `n`
    pub fn update<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let kind = grid.at(n.same).kind;
        debug_assert!(kind.is_stillborn(), "{kind:?} is not static");
        if let Some(rule) = Self::rule_for::<R>(kind) {
            rule(grid, n, rng, stats);
        }
    }

    fn transform(grid: &mut Grid, index: usize, cell: Cell, stats: &mut dyn SimStats) {
        grid.put(index, cell);
        stats.record_state_change();
    }

    /// West, above, east, below; order used by the random neighbour picks
    fn pick_neighbor<R: SandRng>(n: &Neighborhood, rng: &mut R) -> usize {
        match rng.pick(4) {
            0 => n.west,
            1 => n.above,
            2 => n.east,
            _ => n.below,
        }
    }

    /// Clears every orthogonal neighbour
    fn update_void<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        _rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        for index in [n.above, n.below, n.east, n.west] {
            if !grid.at(index).is_empty() {
                Self::transform(grid, index, Cell::EMPTY, stats);
            }
        }
    }

    /// Rusts when touching rust above or to either side. A rusty cell below
    /// has no effect.
    fn update_ironwall<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if rng.one_in(200)
            && [n.above, n.east, n.west]
                .iter()
                .any(|&index| grid.at(index) == Cell::RUST)
        {
            Self::transform(grid, n.same, Cell::RUST, stats);
        }
    }

    /// Spawns fire above and to the sides on a coin flip; always boils
    /// adjacent water into steam
    fn update_torch<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let targets = [n.above, n.west, n.east];

        if rng.coin() {
            for index in targets {
                let cell = grid.at(index);
                if cell.is_empty() || cell == Cell::MOVED_FIRE {
                    Self::transform(grid, index, Cell::MOVED_FIRE, stats);
                }
            }
        }

        for index in targets {
            if grid.at(index).kind == MaterialKind::Water {
                Self::transform(grid, index, Cell::MOVED_STEAM, stats);
            }
        }
    }

    /// Grows slowly into neighbouring water
    fn update_plant<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if rng.coin() {
            let index = Self::pick_neighbor(n, rng);
            if grid.at(index) == Cell::WATER {
                Self::transform(grid, index, Cell::PLANT, stats);
            }
        }
    }

    /// Drips fire downward, ignites one neighbouring plant, burns out
    fn update_ember<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let below = grid.at(n.below);
        if below.is_empty() || below.is_burnable() {
            Self::transform(grid, n.below, Cell::FIRE, stats);
        }

        let index = Self::pick_neighbor(n, rng);
        if grid.at(index) == Cell::PLANT {
            Self::transform(grid, index, Cell::FIRE, stats);
        }

        if rng.one_in(18) {
            Self::transform(grid, n.same, Cell::EMPTY, stats);
        }
    }

    /// Boils water, separates salt water and ignites oil sitting on top
    fn update_stove<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if rng.one_in(4) && grid.at(n.above) == Cell::WATER {
            Self::transform(grid, n.above, Cell::STEAM, stats);
        }

        if rng.one_in(4) && grid.at(n.above) == Cell::SALTWATER {
            Self::transform(grid, n.above, Cell::SALT, stats);
            // Steam goes two rows up; nothing to write on the second row
            if n.y >= 2 {
                let above_two = grid.offset(n, 0, -2);
                Self::transform(grid, above_two, Cell::STEAM, stats);
            }
        }

        if rng.one_in(8) && grid.at(n.above) == Cell::OIL {
            Self::transform(grid, n.above, Cell::EMBER, stats);
        }
    }

    /// Crumbles away very slowly
    fn update_rust<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if rng.one_in(7000) {
            Self::transform(grid, n.same, Cell::EMPTY, stats);
        }
    }

    /// Water, sand and oil spouts: drop one moved particle into empty space
    fn update_spout<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let output = match grid.at(n.same).kind {
            MaterialKind::WaterSpout => MaterialKind::Water,
            MaterialKind::SandSpout => MaterialKind::Sand,
            MaterialKind::OilSpout => MaterialKind::Oil,
            _ => return,
        };

        if rng.one_in(6) && grid.at(n.below).is_empty() {
            Self::transform(grid, n.below, Cell::moved(output), stats);
        }
    }

    /// Drops salt, or salts the water already below it
    fn update_salt_spout<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        if !rng.one_in(6) {
            return;
        }

        if grid.at(n.below).is_empty() {
            Self::transform(grid, n.below, Cell::MOVED_SALT, stats);
        }
        if grid.at(n.below).kind == MaterialKind::Water {
            Self::transform(grid, n.below, Cell::MOVED_SALTWATER, stats);
        }
    }
}
