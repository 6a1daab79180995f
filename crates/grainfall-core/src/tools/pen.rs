//! Pen for drawing materials

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::draw_line;
use crate::simulation::MaterialKind;
use crate::world::grid::Grid;

pub const MIN_PEN_SIZE: u32 = 1;
pub const MAX_PEN_SIZE: u32 = 32;

/// Selectable materials in toolbar order; the last entry is the eraser
pub const PALETTE: [MaterialKind; 19] = [
    MaterialKind::Water,
    MaterialKind::Sand,
    MaterialKind::Salt,
    MaterialKind::Oil,
    MaterialKind::Fire,
    MaterialKind::Acid,
    MaterialKind::Dirt,
    MaterialKind::WaterSpout,
    MaterialKind::SandSpout,
    MaterialKind::SaltSpout,
    MaterialKind::OilSpout,
    MaterialKind::Wall,
    MaterialKind::Torch,
    MaterialKind::Stove,
    MaterialKind::Plant,
    MaterialKind::Ice,
    MaterialKind::IronWall,
    MaterialKind::Void,
    MaterialKind::Nothing,
];

/// Pen state: selected material, radius and a temporary eraser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    material: MaterialKind,
    size: u32,
    /// Material to restore when the eraser is released
    held: Option<MaterialKind>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            material: MaterialKind::Wall,
            size: 2,
            held: None,
        }
    }
}

impl Pen {
    /// Create a pen for the given material and radius
    pub fn new(material: MaterialKind, size: u32) -> Self {
        Self {
            material,
            size: size.clamp(MIN_PEN_SIZE, MAX_PEN_SIZE),
            held: None,
        }
    }

    pub fn material(&self) -> MaterialKind {
        self.material
    }

    pub fn set_material(&mut self, material: MaterialKind) {
        self.material = material;
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Double the radius, up to 32
    pub fn grow(&mut self) {
        self.size = (self.size * 2).min(MAX_PEN_SIZE);
    }

    /// Halve the radius, down to 1
    pub fn shrink(&mut self) {
        self.size = (self.size / 2).max(MIN_PEN_SIZE);
    }

    /// Select the next palette entry, wrapping around
    pub fn select_next(&mut self) {
        let index = self.palette_index().map_or(0, |i| (i + 1) % PALETTE.len());
        self.material = PALETTE[index];
    }

    /// Select the previous palette entry, wrapping around
    pub fn select_previous(&mut self) {
        let index = self
            .palette_index()
            .map_or(PALETTE.len() - 1, |i| (i + PALETTE.len() - 1) % PALETTE.len());
        self.material = PALETTE[index];
    }

    fn palette_index(&self) -> Option<usize> {
        PALETTE.iter().position(|&kind| kind == self.material)
    }

    /// Switch to the eraser until [`Pen::end_erase`]
    pub fn begin_erase(&mut self) {
        if self.held.is_none() {
            self.held = Some(self.material);
            self.material = MaterialKind::Nothing;
        }
    }

    /// Restore the material selected before [`Pen::begin_erase`]
    pub fn end_erase(&mut self) {
        if let Some(material) = self.held.take() {
            self.material = material;
        }
    }

    pub fn is_erasing(&self) -> bool {
        self.held.is_some()
    }

    /// Draw a stroke from the previous cursor position to the current one
    pub fn stroke(&self, grid: &mut Grid, from: IVec2, to: IVec2) {
        log::trace!(
            "Pen stroke {from} -> {to} with {:?}, size {}",
            self.material,
            self.size
        );
        draw_line(grid, from, to, self.size, self.material);
    }
}
