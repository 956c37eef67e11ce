//! Static master data: ship and gear records, and the lookup service the estimator reads.

mod load;

pub use load::{load_fleet_snapshot, load_master_table, master_table_from_json, MasterDataError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static record for a ship ID. Abyssal records often lack slot data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipMaster {
    #[serde(rename = "api_id")]
    pub id: i64,
    #[serde(rename = "api_name", default)]
    pub name: String,
    /// Default gear ID per equipment slot.
    #[serde(rename = "api_slot", default)]
    pub slots: Option<Vec<i64>>,
    /// Default aircraft capacity per slot, parallel to `slots`.
    #[serde(rename = "api_maxeq", default)]
    pub maxeq: Option<Vec<i64>>,
}

impl ShipMaster {
    pub fn default_capacity(&self, slot_idx: usize) -> Option<i64> {
        self.maxeq.as_ref()?.get(slot_idx).copied()
    }
}

/// Static record for a gear ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearMaster {
    #[serde(rename = "api_id")]
    pub id: i64,
    #[serde(rename = "api_name", default)]
    pub name: String,
    /// Category-type tuple. Index 1 is the category, index 2 the type code.
    #[serde(rename = "api_type", default)]
    pub kind: Vec<i64>,
    #[serde(rename = "api_tyku", default)]
    pub tyku: Option<i64>,
}

impl GearMaster {
    pub fn category(&self) -> Option<i64> {
        self.kind.get(1).copied()
    }

    pub fn type2(&self) -> Option<i64> {
        self.kind.get(2).copied()
    }

    /// Anti-air stat, absent treated as zero.
    pub fn anti_air(&self) -> i64 {
        self.tyku.unwrap_or(0)
    }
}

/// A ship ID tagged with the namespace it resolves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipRef {
    Normal(i64),
    Abyssal(i64),
}

impl ShipRef {
    pub fn id(self) -> i64 {
        match self {
            ShipRef::Normal(id) | ShipRef::Abyssal(id) => id,
        }
    }
}

/// Read-only master data service.
pub trait MasterLookup {
    fn is_abyssal_ship(&self, id: i64) -> bool;

    /// Abyssal ship record. Without `exact_match` a normal-namespace record of
    /// the same ID is accepted when the abyssal table has none.
    fn abyssal_ship(&self, id: i64, exact_match: bool) -> Option<&ShipMaster>;

    fn ship(&self, id: i64) -> Option<&ShipMaster>;

    fn slotitem(&self, gear_id: i64) -> Option<&GearMaster>;

    fn ship_ref(&self, id: i64) -> ShipRef {
        if self.is_abyssal_ship(id) {
            ShipRef::Abyssal(id)
        } else {
            ShipRef::Normal(id)
        }
    }

    fn resolve_ship(&self, r: ShipRef) -> Option<&ShipMaster> {
        match r {
            ShipRef::Abyssal(id) => self.abyssal_ship(id, false),
            ShipRef::Normal(id) => self.ship(id),
        }
    }
}

/// In-memory master tables, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct MasterTable {
    ships: HashMap<i64, ShipMaster>,
    abyssal_ships: HashMap<i64, ShipMaster>,
    gears: HashMap<i64, GearMaster>,
    abyssal_id_threshold: i64,
}

impl MasterTable {
    pub fn new(abyssal_id_threshold: i64) -> Self {
        Self {
            abyssal_id_threshold,
            ..Self::default()
        }
    }

    pub fn with_ship(mut self, ship: ShipMaster) -> Self {
        self.insert_ship(ship);
        self
    }

    pub fn with_abyssal_ship(mut self, ship: ShipMaster) -> Self {
        self.insert_abyssal_ship(ship);
        self
    }

    pub fn with_gear(mut self, gear: GearMaster) -> Self {
        self.insert_gear(gear);
        self
    }

    /// Returns the previous record with the same ID, if any.
    pub fn insert_ship(&mut self, ship: ShipMaster) -> Option<ShipMaster> {
        self.ships.insert(ship.id, ship)
    }

    pub fn insert_abyssal_ship(&mut self, ship: ShipMaster) -> Option<ShipMaster> {
        self.abyssal_ships.insert(ship.id, ship)
    }

    pub fn insert_gear(&mut self, gear: GearMaster) -> Option<GearMaster> {
        self.gears.insert(gear.id, gear)
    }

    pub fn abyssal_id_threshold(&self) -> i64 {
        self.abyssal_id_threshold
    }

    /// (normal ships, abyssal ships, gears)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.ships.len(), self.abyssal_ships.len(), self.gears.len())
    }
}

impl MasterLookup for MasterTable {
    fn is_abyssal_ship(&self, id: i64) -> bool {
        id > self.abyssal_id_threshold
    }

    fn abyssal_ship(&self, id: i64, exact_match: bool) -> Option<&ShipMaster> {
        match self.abyssal_ships.get(&id) {
            Some(s) => Some(s),
            None if !exact_match => self.ships.get(&id),
            None => None,
        }
    }

    fn ship(&self, id: i64) -> Option<&ShipMaster> {
        self.ships.get(&id)
    }

    fn slotitem(&self, gear_id: i64) -> Option<&GearMaster> {
        self.gears.get(&gear_id)
    }
}
