// src/map/cell.rs
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The closed set of tags a layout cell can carry.
///
/// The discriminants are the integer codes used in exported layouts
/// (`0` is solid, everything else is walkable floor for the exporter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Empty = 0,
    Room = 1,
    Corridor = 2,
    SpawnT = 3,
    SpawnCt = 4,
    Bombsite = 5,
    MidArea = 6,
    Chokepoint = 7,
    Connector = 8,
    Cover = 9,
}

impl CellType {
    pub const ALL: [CellType; 10] = [
        CellType::Empty,
        CellType::Room,
        CellType::Corridor,
        CellType::SpawnT,
        CellType::SpawnCt,
        CellType::Bombsite,
        CellType::MidArea,
        CellType::Chokepoint,
        CellType::Connector,
        CellType::Cover,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<CellType> {
        CellType::ALL.get(code as usize).copied()
    }

    /// Upper-case name used in the exported cell-type legend.
    pub fn name(self) -> &'static str {
        match self {
            CellType::Empty => "EMPTY",
            CellType::Room => "ROOM",
            CellType::Corridor => "CORRIDOR",
            CellType::SpawnT => "SPAWN_T",
            CellType::SpawnCt => "SPAWN_CT",
            CellType::Bombsite => "BOMBSITE",
            CellType::MidArea => "MID_AREA",
            CellType::Chokepoint => "CHOKEPOINT",
            CellType::Connector => "CONNECTOR",
            CellType::Cover => "COVER",
        }
    }

    /// Traversable and see-through. Rooms, chokepoints and cover are not
    /// open; cover counts as a wall for both sightlines and cover isolation.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            CellType::Corridor
                | CellType::Bombsite
                | CellType::MidArea
                | CellType::SpawnT
                | CellType::SpawnCt
                | CellType::Connector
        )
    }

    /// Single-character glyph for terminal rendering.
    pub fn glyph(self) -> char {
        match self {
            CellType::Empty => '#',
            CellType::Room => 'R',
            CellType::Corridor => '.',
            CellType::SpawnT => 'T',
            CellType::SpawnCt => 'C',
            CellType::Bombsite => 'B',
            CellType::MidArea => 'M',
            CellType::Chokepoint => 'K',
            CellType::Connector => '+',
            CellType::Cover => 'o',
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CellType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for CellType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        CellType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid cell type code {}", code)))
    }
}
