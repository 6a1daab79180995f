//! Cell value stored in every grid slot

use crate::MaterialKind;
use serde::{Deserialize, Serialize};

/// A single grid cell
///
/// `moved` marks a mobile cell that was displaced earlier in the current
/// sweep and must not move again until the end-of-frame settle pass clears
/// it. Static kinds and empty cells are always at rest.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: MaterialKind,
    pub moved: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell::rest(MaterialKind::Nothing);

    pub const WALL: Cell = Cell::rest(MaterialKind::Wall);
    pub const IRONWALL: Cell = Cell::rest(MaterialKind::IronWall);
    pub const ICE: Cell = Cell::rest(MaterialKind::Ice);
    pub const RUST: Cell = Cell::rest(MaterialKind::Rust);
    pub const EMBER: Cell = Cell::rest(MaterialKind::Ember);
    pub const PLANT: Cell = Cell::rest(MaterialKind::Plant);

    pub const WATER: Cell = Cell::rest(MaterialKind::Water);
    pub const MOVED_WATER: Cell = Cell::moved(MaterialKind::Water);
    pub const DIRT: Cell = Cell::rest(MaterialKind::Dirt);
    pub const SALT: Cell = Cell::rest(MaterialKind::Salt);
    pub const MOVED_SALT: Cell = Cell::moved(MaterialKind::Salt);
    pub const OIL: Cell = Cell::rest(MaterialKind::Oil);
    pub const MOVED_OIL: Cell = Cell::moved(MaterialKind::Oil);
    pub const SAND: Cell = Cell::rest(MaterialKind::Sand);
    pub const MOVED_SAND: Cell = Cell::moved(MaterialKind::Sand);
    pub const SALTWATER: Cell = Cell::rest(MaterialKind::SaltWater);
    pub const MOVED_SALTWATER: Cell = Cell::moved(MaterialKind::SaltWater);
    pub const MUD: Cell = Cell::rest(MaterialKind::Mud);
    pub const MOVED_MUD: Cell = Cell::moved(MaterialKind::Mud);
    pub const ACID: Cell = Cell::rest(MaterialKind::Acid);
    pub const MOVED_ACID: Cell = Cell::moved(MaterialKind::Acid);

    pub const STEAM: Cell = Cell::rest(MaterialKind::Steam);
    pub const MOVED_STEAM: Cell = Cell::moved(MaterialKind::Steam);
    pub const FIRE: Cell = Cell::rest(MaterialKind::Fire);
    pub const MOVED_FIRE: Cell = Cell::moved(MaterialKind::Fire);

    pub const ELEC: Cell = Cell::rest(MaterialKind::Elec);

    /// Cell eligible to move on the next visit
    pub const fn rest(kind: MaterialKind) -> Self {
        Self { kind, moved: false }
    }

    /// Cell already displaced during the current sweep
    pub const fn moved(kind: MaterialKind) -> Self {
        Self { kind, moved: true }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == MaterialKind::Nothing
    }

    pub fn is_stillborn(&self) -> bool {
        self.kind.is_stillborn()
    }

    pub fn is_floating(&self) -> bool {
        self.kind.is_floating()
    }

    pub fn is_burnable(&self) -> bool {
        self.kind.is_burnable()
    }

    /// Non-empty and not static; counted as an active particle
    pub fn is_active(&self) -> bool {
        !self.is_empty() && !self.is_stillborn()
    }

    /// Same kind, back at rest
    pub fn settled(self) -> Self {
        Self::rest(self.kind)
    }
}

impl From<MaterialKind> for Cell {
    fn from(kind: MaterialKind) -> Self {
        Cell::rest(kind)
    }
}
