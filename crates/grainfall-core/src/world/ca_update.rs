//! Cellular automata update logic - particle movement physics

use crate::simulation::{Cell, MaterialKind};
use crate::world::chemistry_system::{ChemistrySystem, Flow};
use crate::world::grid::{Grid, Neighborhood};
use crate::world::sandbox::EngineOptions;
use crate::world::{SandRng, SimStats};

/// Sideways neighbours of a visit, in the order they are tried
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lateral {
    /// -1 or +1
    pub sign: isize,
    /// `(x + sign, y)`
    pub first: usize,
    /// `(x - sign, y)`
    pub second: usize,
}

impl Lateral {
    pub fn new(grid: &Grid, n: &Neighborhood, sign: isize) -> Self {
        Self {
            sign,
            first: grid.offset(n, sign, 0),
            second: grid.offset(n, -sign, 0),
        }
    }

    /// Random side: west first on an even draw, east first otherwise
    pub fn pick<R: SandRng>(grid: &Grid, n: &Neighborhood, rng: &mut R) -> Self {
        let sign = if rng.coin() { -1 } else { 1 };
        Self::new(grid, n, sign)
    }
}

/// Denser materials a particle sinks through when they sit on top of it.
///
/// `always` partners swap unconditionally; the `gated` partner swaps on a
/// one-in-three roll. Only the last listed partner is gated.
#[derive(Clone, Copy, Debug)]
pub struct SwapPartners {
    pub always: &'static [Cell],
    pub gated: Cell,
}

/// Cellular automata updater - handles particle movement physics
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Swap partners for a kind; `None` for kinds that never swap
    pub fn swap_partners(kind: MaterialKind) -> Option<SwapPartners> {
        match kind {
            MaterialKind::Water => Some(SwapPartners {
                always: &[Cell::SAND, Cell::MUD],
                gated: Cell::SALTWATER,
            }),
            MaterialKind::Oil => Some(SwapPartners {
                always: &[],
                gated: Cell::WATER,
            }),
            MaterialKind::SaltWater => Some(SwapPartners {
                always: &[Cell::DIRT, Cell::MUD],
                gated: Cell::SAND,
            }),
            _ => None,
        }
    }

    /// Move a rest particle that passed the movement gate
    ///
    /// Runs primary motion, lateral selection, reactions, the optional
    /// density swap and finally the sideways spread, stopping at the first
    /// step that settles the visit.
    pub fn update_mobile<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        options: &EngineOptions,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let kind = grid.at(n.same).kind;
        debug_assert!(
            !kind.is_stillborn() && kind != MaterialKind::Nothing,
            "{kind:?} is not mobile"
        );
        let moved = Cell::moved(kind);

        if Self::primary_motion(grid, n, kind, stats, rng) {
            return;
        }

        let lateral = Lateral::pick(grid, n, rng);

        if ChemistrySystem::react(kind, grid, n, &lateral, rng, stats) == Flow::Stop {
            return;
        }

        if options.particle_swaps && Self::try_density_swap(grid, n, kind, moved, stats, rng) {
            return;
        }

        Self::spread(grid, n, &lateral, kind, moved, stats);
    }

    /// Fall for heavy particles, rise for floating ones
    ///
    /// Returns `true` when the visit is over.
    fn primary_motion<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        kind: MaterialKind,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        if !kind.is_floating() {
            if grid.at(n.below).is_empty() && rng.all_but_one_in(8) {
                grid.put(n.below, Cell::moved(kind));
                grid.put(n.same, Cell::EMPTY);
                stats.record_pixel_moved();
                return true;
            }
            return false;
        }

        // Slow down
        if rng.one_in(3) {
            return true;
        }

        let above = grid.at(n.above);
        if (above.is_empty() || above == Cell::FIRE)
            && rng.all_but_one_in(8)
            && kind != MaterialKind::Elec
        {
            if kind == MaterialKind::Fire && rng.one_in(20) {
                grid.put(n.same, Cell::EMPTY);
            } else {
                // Carries the rest value up
                let current = grid.at(n.same);
                grid.put(n.above, current);
                grid.put(n.same, Cell::EMPTY);
                stats.record_pixel_moved();
            }
            return true;
        }

        false
    }

    /// Sink below a denser partner sitting on top
    fn try_density_swap<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        kind: MaterialKind,
        moved: Cell,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> bool {
        let Some(partners) = Self::swap_partners(kind) else {
            return false;
        };

        let above = grid.at(n.above);
        let swaps = partners.always.contains(&above) || (above == partners.gated && rng.one_in(3));
        if swaps {
            grid.put(n.same, above);
            grid.put(n.above, moved);
            stats.record_pixel_moved();
        }
        swaps
    }

    /// Try the two diagonals, then the two sides
    ///
    /// Heavy particles use the lower diagonals, steam the upper ones, fire
    /// does not spread.
    fn spread(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        kind: MaterialKind,
        moved: Cell,
        stats: &mut dyn SimStats,
    ) {
        let dy = match kind {
            MaterialKind::Steam => -1,
            _ if kind.is_floating() => return,
            _ => 1,
        };

        let candidates = [
            grid.offset(n, lateral.sign, dy),
            grid.offset(n, -lateral.sign, dy),
            lateral.first,
            lateral.second,
        ];

        if let Some(&target) = candidates
            .iter()
            .find(|&&index| grid.at(index).is_empty())
        {
            grid.put(target, moved);
            grid.put(n.same, Cell::EMPTY);
            stats.record_pixel_moved();
        }
    }
}
