//! Chemistry for mobile particles: burning, boiling, dissolving, corrosion
//!
//! Reactions run after primary motion failed to relocate the particle and
//! before the density swap. A reaction may rewrite the particle itself; the
//! later movement steps still write the moved variant of the kind the visit
//! started with.

use crate::simulation::{Cell, MaterialKind};
use crate::world::ca_update::Lateral;
use crate::world::grid::{Grid, Neighborhood};
use crate::world::{SandRng, SimStats};

/// Whether the visit continues to the swap and spreading steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Signature shared by every mobile reaction
pub type ReactionRule<R> = fn(&mut Grid, &Neighborhood, &Lateral, &mut R, &mut dyn SimStats) -> Flow;

/// Handles the per-kind reactions of mobile and floating particles
pub struct ChemistrySystem;

impl ChemistrySystem {
    /// Reaction for a mobile kind; `None` for kinds that only move
    pub fn reaction_for<R: SandRng>(kind: MaterialKind) -> Option<ReactionRule<R>> {
        let rule: ReactionRule<R> = match kind {
            MaterialKind::Elec => Self::react_elec,
            MaterialKind::Steam => Self::react_steam,
            MaterialKind::Fire => Self::react_fire,
            MaterialKind::Water => Self::react_water,
            MaterialKind::Acid => Self::react_acid,
            MaterialKind::Salt => Self::react_salt,
            MaterialKind::SaltWater => Self::react_saltwater,
            MaterialKind::Oil => Self::react_oil,
            _ => return None,
        };
        Some(rule)
    }

    /// Run the reaction for `kind`, if it has one
    pub fn react<R: SandRng>(
        kind: MaterialKind,
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        match Self::reaction_for::<R>(kind) {
            Some(rule) => rule(grid, n, lateral, rng, stats),
            None => Flow::Continue,
        }
    }

    fn rewrite(grid: &mut Grid, index: usize, cell: Cell, stats: &mut dyn SimStats) {
        grid.put(index, cell);
        stats.record_reaction();
    }

    /// Above, below, first side, second side
    fn pick_neighbor<R: SandRng>(n: &Neighborhood, lateral: &Lateral, rng: &mut R) -> usize {
        match rng.pick(4) {
            0 => n.above,
            1 => n.below,
            2 => lateral.first,
            _ => lateral.second,
        }
    }

    /// Random neighbour of ice melts back to water
    fn melt_random_ice<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) {
        let index = Self::pick_neighbor(n, lateral, rng);
        if grid.at(index) == Cell::ICE {
            Self::rewrite(grid, index, Cell::WATER, stats);
        }
    }

    /// Electricity fizzles out half the time
    fn react_elec<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        _lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        if rng.coin() {
            Self::rewrite(grid, n.same, Cell::EMPTY, stats);
        }
        Flow::Continue
    }

    /// Condenses, evaporates, or bubbles up through anything that is
    /// neither static nor floating
    fn react_steam<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        _lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        if rng.one_in(1000) {
            Self::rewrite(grid, n.same, Cell::MOVED_WATER, stats);
            return Flow::Stop;
        }
        if rng.one_in(500) {
            Self::rewrite(grid, n.same, Cell::EMPTY, stats);
            return Flow::Stop;
        }

        let above = grid.at(n.above);
        if !above.is_stillborn() && !above.is_floating() {
            if rng.one_in(15) {
                Self::rewrite(grid, n.same, Cell::EMPTY, stats);
            } else {
                grid.put(n.same, above);
                grid.put(n.above, Cell::MOVED_STEAM);
                stats.record_pixel_moved();
            }
            return Flow::Stop;
        }

        Flow::Continue
    }

    /// Dies out without fuel above, melts ice, spreads to burnable cells
    fn react_fire<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        if !grid.at(n.above).is_burnable() && rng.one_in(10) {
            Self::rewrite(grid, n.same, Cell::EMPTY, stats);
            return Flow::Stop;
        }

        if rng.one_in(4) {
            for index in [n.above, n.below, lateral.first, lateral.second] {
                if grid.at(index) == Cell::ICE {
                    Self::rewrite(grid, index, Cell::WATER, stats);
                    Self::rewrite(grid, n.same, Cell::EMPTY, stats);
                }
            }
        }

        let index = Self::pick_neighbor(n, lateral, rng);
        let target = grid.at(index);
        if target.is_burnable() {
            let burnt = if target.kind.burns_as_ember() {
                Cell::EMBER
            } else {
                Cell::FIRE
            };
            Self::rewrite(grid, index, burnt, stats);
        }

        Flow::Continue
    }

    /// Rusts iron, boils next to fire, soaks dirt and dissolves salt
    fn react_water<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        if rng.one_in(200) && grid.at(n.below) == Cell::IRONWALL {
            Self::rewrite(grid, n.below, Cell::RUST, stats);
        }

        if [n.below, n.above, lateral.first, lateral.second]
            .iter()
            .any(|&index| grid.at(index) == Cell::FIRE)
        {
            Self::rewrite(grid, n.same, Cell::MOVED_STEAM, stats);
        }

        for index in [n.below, n.above] {
            if grid.at(index) == Cell::DIRT {
                Self::rewrite(grid, index, Cell::MOVED_MUD, stats);
                Self::rewrite(grid, n.same, Cell::EMPTY, stats);
            }
        }

        for index in [n.above, n.below] {
            if grid.at(index).kind == MaterialKind::Salt {
                Self::rewrite(grid, index, Cell::MOVED_SALTWATER, stats);
                Self::rewrite(grid, n.same, Cell::EMPTY, stats);
            }
        }

        if rng.one_in(60) {
            Self::melt_random_ice(grid, n, lateral, rng, stats);
        }

        Flow::Continue
    }

    /// Dissolves one random neighbour unless it resists acid
    fn react_acid<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        let index = Self::pick_neighbor(n, lateral, rng);
        let target = grid.at(index);
        let resists = matches!(
            target.kind,
            MaterialKind::Wall | MaterialKind::IronWall | MaterialKind::Water | MaterialKind::Acid
        );
        if !resists && !target.is_empty() {
            Self::rewrite(grid, index, Cell::EMPTY, stats);
        }
        Flow::Continue
    }

    fn react_salt<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        if rng.one_in(20) {
            Self::melt_random_ice(grid, n, lateral, rng, stats);
        }
        Flow::Continue
    }

    /// Melts ice more slowly than dry salt
    fn react_saltwater<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        if rng.one_in(40) {
            Self::melt_random_ice(grid, n, lateral, rng, stats);
        }
        Flow::Continue
    }

    /// Catches fire from a burning neighbour
    fn react_oil<R: SandRng>(
        grid: &mut Grid,
        n: &Neighborhood,
        lateral: &Lateral,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Flow {
        let index = Self::pick_neighbor(n, lateral, rng);
        if grid.at(index) == Cell::FIRE {
            Self::rewrite(grid, n.same, Cell::FIRE, stats);
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::GridConfig;
    use crate::world::{FrameCounters, NoopStats};

    struct ScriptedRng {
        values: Vec<u32>,
        cursor: usize,
    }

    impl ScriptedRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                cursor: 0,
            }
        }
    }

    impl SandRng for ScriptedRng {
        fn next_raw(&mut self) -> u32 {
            let index = self.cursor.min(self.values.len() - 1);
            self.cursor += 1;
            self.values[index]
        }
    }

    fn make_grid() -> Grid {
        Grid::new(GridConfig {
            width: 7,
            height: 9,
            dashboard_height: 2,
        })
        .unwrap()
    }

    /// Reacts the cell at (3, 3) with `first` to the east
    fn react(grid: &mut Grid, rng: &mut ScriptedRng) -> Flow {
        let n = grid.neighborhood(3, 3);
        let lateral = Lateral::new(grid, &n, 1);
        let kind = grid.at(n.same).kind;
        ChemistrySystem::react(kind, grid, &n, &lateral, rng, &mut NoopStats)
    }

    #[test]
    fn test_water_over_dirt_makes_mud() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(3, 4, Cell::DIRT);

        let flow = react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(grid.get(3, 4), Some(Cell::MOVED_MUD));
        assert_eq!(grid.get(3, 3), Some(Cell::EMPTY));
    }

    #[test]
    fn test_water_dissolves_moved_salt() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(3, 2, Cell::MOVED_SALT);

        react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(grid.get(3, 2), Some(Cell::MOVED_SALTWATER));
        assert_eq!(grid.get(3, 3), Some(Cell::EMPTY));
    }

    #[test]
    fn test_water_next_to_fire_boils() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(2, 3, Cell::FIRE);

        react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(grid.get(3, 3), Some(Cell::MOVED_STEAM));
    }

    #[test]
    fn test_water_ignores_moved_fire() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(2, 3, Cell::MOVED_FIRE);

        react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(grid.get(3, 3), Some(Cell::WATER));
    }

    #[test]
    fn test_water_rusts_ironwall_below() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(3, 4, Cell::IRONWALL);

        react(&mut grid, &mut ScriptedRng::new(&[200, 1]));
        assert_eq!(grid.get(3, 4), Some(Cell::RUST));
    }

    #[test]
    fn test_water_melts_ice() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(4, 3, Cell::ICE);

        // 1 -> no rust; 60 -> melt roll; 2 -> first side (east)
        react(&mut grid, &mut ScriptedRng::new(&[1, 60, 2]));
        assert_eq!(grid.get(4, 3), Some(Cell::WATER));
    }

    #[test]
    fn test_steam_condenses_on_rare_roll() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::STEAM);

        let flow = react(&mut grid, &mut ScriptedRng::new(&[0]));
        assert_eq!(flow, Flow::Stop);
        assert_eq!(grid.get(3, 3), Some(Cell::MOVED_WATER));
    }

    #[test]
    fn test_steam_bubbles_through_water() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::STEAM);
        grid.set(3, 2, Cell::WATER);

        let flow = react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(flow, Flow::Stop);
        assert_eq!(grid.get(3, 3), Some(Cell::WATER));
        assert_eq!(grid.get(3, 2), Some(Cell::MOVED_STEAM));
    }

    #[test]
    fn test_steam_blocked_by_wall_continues() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::STEAM);
        grid.set(3, 2, Cell::WALL);

        let flow = react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(grid.get(3, 3), Some(Cell::STEAM));
    }

    #[test]
    fn test_fire_dies_without_fuel() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::FIRE);

        let flow = react(&mut grid, &mut ScriptedRng::new(&[10]));
        assert_eq!(flow, Flow::Stop);
        assert_eq!(grid.get(3, 3), Some(Cell::EMPTY));
    }

    #[test]
    fn test_fire_under_oil_skips_burnout_roll() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::FIRE);
        grid.set(3, 2, Cell::OIL);

        // No burnout draw: 1 -> no melt; 0 -> pick above
        let flow = react(&mut grid, &mut ScriptedRng::new(&[1, 0]));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(grid.get(3, 2), Some(Cell::FIRE));
        assert_eq!(grid.get(3, 3), Some(Cell::FIRE));
    }

    #[test]
    fn test_fire_turns_plant_into_ember() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::FIRE);
        grid.set(3, 4, Cell::PLANT);

        // 1 -> no burnout; 1 -> no melt; 1 -> pick below
        react(&mut grid, &mut ScriptedRng::new(&[1, 1, 1]));
        assert_eq!(grid.get(3, 4), Some(Cell::EMBER));
    }

    #[test]
    fn test_fire_melts_ice() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::FIRE);
        grid.set(2, 3, Cell::ICE);

        react(&mut grid, &mut ScriptedRng::new(&[1, 4, 1]));
        assert_eq!(grid.get(2, 3), Some(Cell::WATER));
        assert_eq!(grid.get(3, 3), Some(Cell::EMPTY));
    }

    #[test]
    fn test_acid_spares_water() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::ACID);
        grid.set(3, 2, Cell::MOVED_WATER);
        grid.set(3, 4, Cell::SAND);

        react(&mut grid, &mut ScriptedRng::new(&[0]));
        assert_eq!(grid.get(3, 2), Some(Cell::MOVED_WATER));

        react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(grid.get(3, 4), Some(Cell::EMPTY));
    }

    #[test]
    fn test_acid_eats_ice_but_not_wall() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::ACID);
        grid.set(4, 3, Cell::ICE);
        grid.set(2, 3, Cell::WALL);

        react(&mut grid, &mut ScriptedRng::new(&[2]));
        assert_eq!(grid.get(4, 3), Some(Cell::EMPTY));

        react(&mut grid, &mut ScriptedRng::new(&[3]));
        assert_eq!(grid.get(2, 3), Some(Cell::WALL));
    }

    #[test]
    fn test_salt_melts_ice_on_roll() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::SALT);
        grid.set(3, 4, Cell::ICE);

        react(&mut grid, &mut ScriptedRng::new(&[1]));
        assert_eq!(grid.get(3, 4), Some(Cell::ICE));

        react(&mut grid, &mut ScriptedRng::new(&[20, 1]));
        assert_eq!(grid.get(3, 4), Some(Cell::WATER));
    }

    #[test]
    fn test_saltwater_melts_ice_on_roll() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::SALTWATER);
        grid.set(3, 2, Cell::ICE);

        react(&mut grid, &mut ScriptedRng::new(&[40, 0]));
        assert_eq!(grid.get(3, 2), Some(Cell::WATER));
    }

    #[test]
    fn test_oil_ignites_from_fire() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::OIL);
        grid.set(4, 3, Cell::FIRE);

        react(&mut grid, &mut ScriptedRng::new(&[2]));
        assert_eq!(grid.get(3, 3), Some(Cell::FIRE));
    }

    #[test]
    fn test_elec_fizzles_on_even_roll() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::ELEC);

        react(&mut grid, &mut ScriptedRng::new(&[3]));
        assert_eq!(grid.get(3, 3), Some(Cell::ELEC));

        react(&mut grid, &mut ScriptedRng::new(&[4]));
        assert_eq!(grid.get(3, 3), Some(Cell::EMPTY));
    }

    #[test]
    fn test_sand_has_no_reaction() {
        assert!(ChemistrySystem::reaction_for::<ScriptedRng>(MaterialKind::Sand).is_none());
        assert!(ChemistrySystem::reaction_for::<ScriptedRng>(MaterialKind::Mud).is_none());
    }

    #[test]
    fn test_reactions_are_counted() {
        let mut grid = make_grid();
        grid.set(3, 3, Cell::WATER);
        grid.set(3, 4, Cell::DIRT);

        let n = grid.neighborhood(3, 3);
        let lateral = Lateral::new(&grid, &n, 1);
        let mut stats = FrameCounters::default();
        let mut rng = ScriptedRng::new(&[1]);
        ChemistrySystem::react(
            MaterialKind::Water,
            &mut grid,
            &n,
            &lateral,
            &mut rng,
            &mut stats,
        );
        assert_eq!(stats.reactions, 2);
    }
}
