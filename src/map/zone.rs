// src/map/zone.rs

use crate::map::{CellType, ShapeKind};
use crate::utils::{Cell, Rect};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Which team a spawn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, Serialize)]
pub enum Team {
    T,
    CT,
}

impl Team {
    pub fn cell_type(self) -> CellType {
        match self {
            Team::T => CellType::SpawnT,
            Team::CT => CellType::SpawnCt,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::T => f.write_str("T"),
            Team::CT => f.write_str("CT"),
        }
    }
}

/// The gameplay role a placed zone fulfils.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneRole {
    Spawn(Team),
    Site(String),
    Mid(usize),
}

impl ZoneRole {
    /// Zone-table key: `T_spawn`, `CT_spawn`, `site_<id>`, `mid_<n>`.
    pub fn zone_name(&self) -> String {
        match self {
            ZoneRole::Spawn(team) => format!("{}_spawn", team),
            ZoneRole::Site(id) => format!("site_{}", id),
            ZoneRole::Mid(index) => format!("mid_{}", index),
        }
    }

    pub fn cell_type(&self) -> CellType {
        match self {
            ZoneRole::Spawn(team) => team.cell_type(),
            ZoneRole::Site(_) => CellType::Bombsite,
            ZoneRole::Mid(_) => CellType::MidArea,
        }
    }
}

impl fmt::Display for ZoneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneRole::Spawn(team) => write!(f, "spawn-{}", team),
            ZoneRole::Site(id) => write!(f, "site-{}", id),
            ZoneRole::Mid(index) => write!(f, "mid-{}", index),
        }
    }
}

impl Serialize for ZoneRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A placed logical area. Never moved or resized after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    #[serde(flatten)]
    pub bounds: Rect,
    pub name: String,
    pub shape: ShapeKind,
    pub role: ZoneRole,
    pub cell_type: CellType,
    /// Occupied cells, in rasterization order.
    #[serde(skip)]
    pub cells: Vec<Cell>,
}

impl Zone {
    /// Builds a zone from its stamped cells; `None` if `cells` is empty.
    pub fn from_cells(role: ZoneRole, shape: ShapeKind, cells: Vec<Cell>) -> Option<Zone> {
        let bounds = Rect::bounding(cells.iter())?;
        Some(Zone {
            bounds,
            name: role.zone_name(),
            shape,
            cell_type: role.cell_type(),
            role,
            cells,
        })
    }

    pub fn center(&self) -> Cell {
        self.bounds.center()
    }
}

/// Placed zones keyed by name, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a zone. A zone with an existing name replaces the earlier entry
    /// but keeps its original position.
    pub fn insert(&mut self, zone: Zone) {
        match self.zones.iter_mut().find(|z| z.name == zone.name) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name.as_str()).collect()
    }

    pub fn spawn(&self, team: Team) -> Option<&Zone> {
        self.zones.iter().find(|z| z.role == ZoneRole::Spawn(team))
    }

    pub fn sites(&self) -> Vec<&Zone> {
        self.zones
            .iter()
            .filter(|z| matches!(z.role, ZoneRole::Site(_)))
            .collect()
    }

    pub fn mids(&self) -> Vec<&Zone> {
        self.zones
            .iter()
            .filter(|z| matches!(z.role, ZoneRole::Mid(_)))
            .collect()
    }
}

impl Serialize for ZoneTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.zones.len()))?;
        for zone in &self.zones {
            map.serialize_entry(&zone.name, zone)?;
        }
        map.end()
    }
}
