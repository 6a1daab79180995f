//! Material definitions and registry

use serde::{Deserialize, Serialize};

/// Every material a cell can hold.
///
/// Discriminants are the classic sand-game ids of the *rest* variant. The
/// moved variant of a mobile material used to be `id + 1`; here it is carried
/// by [`crate::Cell::moved`] instead, so ids 4, 15 and all odd ids above 15
/// are never produced by this enum.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    // Static
    #[default]
    Nothing = 0,
    Wall = 1,
    IronWall = 2,
    Torch = 3,
    Stove = 5,
    Ice = 6,
    Rust = 7,
    Ember = 8,
    Plant = 9,
    Void = 10,
    WaterSpout = 11,
    SandSpout = 12,
    SaltSpout = 13,
    OilSpout = 14,

    // Elemental
    Water = 16,
    Dirt = 18,
    Salt = 20,
    Oil = 22,
    Sand = 24,

    // Combined
    SaltWater = 26,
    Mud = 28,
    Acid = 30,

    // Floating
    Steam = 32,
    Fire = 34,

    // Electricity
    Elec = 36,
}

/// How the sweep treats a material
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCategory {
    /// Empty space, skipped by the sweep
    Empty,
    /// Never relocates; transforms itself or its neighbours in place
    Static,
    /// Falls, spreads sideways (elemental and combined materials)
    Mobile,
    /// Rises instead of falling (steam, fire)
    Floating,
    /// Electricity. Subject to the falling rule, not the rising one
    Electrical,
}

impl MaterialKind {
    /// All kinds in id order
    pub const ALL: [MaterialKind; 25] = [
        MaterialKind::Nothing,
        MaterialKind::Wall,
        MaterialKind::IronWall,
        MaterialKind::Torch,
        MaterialKind::Stove,
        MaterialKind::Ice,
        MaterialKind::Rust,
        MaterialKind::Ember,
        MaterialKind::Plant,
        MaterialKind::Void,
        MaterialKind::WaterSpout,
        MaterialKind::SandSpout,
        MaterialKind::SaltSpout,
        MaterialKind::OilSpout,
        MaterialKind::Water,
        MaterialKind::Dirt,
        MaterialKind::Salt,
        MaterialKind::Oil,
        MaterialKind::Sand,
        MaterialKind::SaltWater,
        MaterialKind::Mud,
        MaterialKind::Acid,
        MaterialKind::Steam,
        MaterialKind::Fire,
        MaterialKind::Elec,
    ];

    /// Numeric id of the rest variant
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn category(self) -> MaterialCategory {
        match self as u8 {
            0 => MaterialCategory::Empty,
            1..=14 => MaterialCategory::Static,
            16..=31 => MaterialCategory::Mobile,
            32..=35 => MaterialCategory::Floating,
            _ => MaterialCategory::Electrical,
        }
    }

    /// Static and not empty
    pub fn is_stillborn(self) -> bool {
        self.category() == MaterialCategory::Static
    }

    pub fn is_floating(self) -> bool {
        self.category() == MaterialCategory::Floating
    }

    /// Can be set alight by fire or an ember
    pub fn is_burnable(self) -> bool {
        matches!(self, MaterialKind::Plant | MaterialKind::Oil)
    }

    /// Burnable material that turns into an ember rather than plain fire
    pub fn burns_as_ember(self) -> bool {
        self == MaterialKind::Plant
    }
}

/// Definition of a material's presentation properties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDef {
    pub kind: MaterialKind,
    pub name: String,

    /// Base color (RGBA)
    pub color: [u8; 4],
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Nothing,
            name: "unknown".to_string(),
            color: [255, 0, 255, 255], // Magenta for missing materials
        }
    }
}

/// Registry of all materials
pub struct Materials {
    materials: Vec<MaterialDef>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: Vec::new(),
        };
        materials.register_defaults();
        materials
    }

    fn register_defaults(&mut self) {
        use MaterialKind::*;

        // Empty space renders as the black play-field background
        self.register(Nothing, "nothing", [0, 0, 0, 255]);

        // Static
        self.register(Wall, "wall", [100, 100, 100, 255]);
        self.register(IronWall, "ironwall", [110, 110, 110, 255]);
        self.register(Torch, "torch", [139, 69, 19, 255]);
        self.register(Stove, "stove", [74, 74, 74, 255]);
        self.register(Ice, "ice", [175, 238, 238, 255]);
        self.register(Rust, "rust", [110, 40, 10, 255]);
        self.register(Ember, "ember", [127, 25, 25, 255]);
        self.register(Plant, "plant", [0, 150, 0, 255]);
        self.register(Void, "void", [60, 60, 60, 255]);

        // Spouts
        self.register(WaterSpout, "waterspout", [0, 0, 128, 255]);
        self.register(SandSpout, "sandspout", [240, 230, 140, 255]);
        self.register(SaltSpout, "saltspout", [238, 233, 233, 255]);
        self.register(OilSpout, "oilspout", [108, 44, 44, 255]);

        // Elemental
        self.register(Water, "water", [32, 32, 255, 255]);
        self.register(Dirt, "dirt", [205, 175, 149, 255]);
        self.register(Salt, "salt", [255, 255, 255, 255]);
        self.register(Oil, "oil", [128, 64, 64, 255]);
        self.register(Sand, "sand", [238, 204, 128, 255]);

        // Combined
        self.register(SaltWater, "saltwater", [65, 105, 225, 255]);
        self.register(Mud, "mud", [139, 69, 19, 255]);
        self.register(Acid, "acid", [173, 255, 47, 255]);

        // Floating
        self.register(Steam, "steam", [95, 158, 160, 255]);
        self.register(Fire, "fire", [255, 50, 50, 255]);

        self.register(Elec, "elec", [255, 255, 0, 255]);
    }

    fn register(&mut self, kind: MaterialKind, name: &str, color: [u8; 4]) {
        let id = kind.id() as usize;

        // Ensure vec is large enough
        if self.materials.len() <= id {
            self.materials.resize(id + 1, MaterialDef::default());
        }

        self.materials[id] = MaterialDef {
            kind,
            name: name.to_string(),
            color,
        };
    }

    /// Get material definition by kind
    pub fn get(&self, kind: MaterialKind) -> &MaterialDef {
        match self.materials.get(kind.id() as usize) {
            Some(def) => def,
            None => {
                log::warn!("Material {:?} has no registered definition", kind);
                &self.materials[0]
            }
        }
    }

    /// Get color for a material
    pub fn get_color(&self, kind: MaterialKind) -> [u8; 4] {
        self.get(kind).color
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
