//! Data-gap map produced alongside an estimate.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Why a single gear slot could not be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearIssue {
    /// No gear master record.
    MissingGear,
    /// Anti-air fighter whose slot capacity is unknown; carries the known stat.
    MissingCapacity { anti_air: i64 },
    /// Reconnaissance plane whose slot capacity is unknown.
    MissingReconCapacity,
}

/// Per-ship state. A ship without an entry was fully processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipIssue {
    /// No ship master record.
    MissingShip,
    /// Ship known, but neither the snapshot nor the master gives a slot layout.
    UnknownLayout,
    /// Ship processed; these gears could not be counted. Never empty.
    Gears(BTreeMap<i64, GearIssue>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionMap {
    fleet_missing: bool,
    ships: BTreeMap<i64, ShipIssue>,
}

impl ExceptionMap {
    /// Marker for a snapshot without any ship IDs.
    pub fn fleet_missing() -> Self {
        Self {
            fleet_missing: true,
            ships: BTreeMap::new(),
        }
    }

    pub fn is_fleet_missing(&self) -> bool {
        self.fleet_missing
    }

    pub fn is_empty(&self) -> bool {
        !self.fleet_missing && self.ships.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ships.len() + usize::from(self.fleet_missing)
    }

    pub fn get(&self, ship_id: i64) -> Option<&ShipIssue> {
        self.ships.get(&ship_id)
    }

    /// Ship entries in ascending ship ID order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &ShipIssue)> {
        self.ships.iter().map(|(id, issue)| (*id, issue))
    }

    /// Record an issue for `ship_id`. A ship ID seen twice in one fleet keeps
    /// the latest whole-ship state, while gear issues accumulate.
    pub fn with_issue(mut self, ship_id: i64, issue: ShipIssue) -> Self {
        let merged = match (self.ships.remove(&ship_id), issue) {
            (Some(ShipIssue::Gears(mut prev)), ShipIssue::Gears(next)) => {
                prev.extend(next);
                ShipIssue::Gears(prev)
            }
            (_, issue) => issue,
        };
        self.ships.insert(ship_id, merged);
        self
    }
}

impl Serialize for GearIssue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            GearIssue::MissingGear => serializer.serialize_none(),
            GearIssue::MissingCapacity { anti_air } => serializer.serialize_i64(*anti_air),
            GearIssue::MissingReconCapacity => serializer.serialize_str("recon"),
        }
    }
}

impl Serialize for ShipIssue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ShipIssue::MissingShip => serializer.serialize_none(),
            ShipIssue::UnknownLayout => serializer.serialize_map(Some(0))?.end(),
            ShipIssue::Gears(gears) => {
                let mut map = serializer.serialize_map(Some(gears.len()))?;
                for (gear_id, issue) in gears {
                    map.serialize_entry(&gear_id.to_string(), issue)?;
                }
                map.end()
            }
        }
    }
}

/// Serializes to the client's JSON shape: `{"ship": null}` for a missing fleet,
/// otherwise ship ID keys mapping to `null`, `{}` or a gear map.
impl Serialize for ExceptionMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        if self.fleet_missing {
            map.serialize_entry("ship", &None::<()>)?;
        }
        for (ship_id, issue) in &self.ships {
            map.serialize_entry(&ship_id.to_string(), issue)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gears(entries: &[(i64, GearIssue)]) -> ShipIssue {
        ShipIssue::Gears(entries.iter().copied().collect())
    }

    #[test]
    fn serializes_client_shape() {
        let map = ExceptionMap::default()
            .with_issue(1501, ShipIssue::MissingShip)
            .with_issue(1502, ShipIssue::UnknownLayout)
            .with_issue(
                1503,
                gears(&[
                    (12, GearIssue::MissingGear),
                    (15, GearIssue::MissingCapacity { anti_air: 10 }),
                    (20, GearIssue::MissingReconCapacity),
                ]),
            );
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "1501": null,
                "1502": {},
                "1503": {"12": null, "15": 10, "20": "recon"}
            })
        );
        let missing = serde_json::to_value(ExceptionMap::fleet_missing()).unwrap();
        assert_eq!(missing, serde_json::json!({"ship": null}));
    }

    #[test]
    fn gear_issues_accumulate_for_repeated_ship() {
        let map = ExceptionMap::default()
            .with_issue(1501, gears(&[(1, GearIssue::MissingGear)]))
            .with_issue(1501, gears(&[(2, GearIssue::MissingReconCapacity)]));
        assert_eq!(
            map.get(1501),
            Some(&gears(&[
                (1, GearIssue::MissingGear),
                (2, GearIssue::MissingReconCapacity)
            ]))
        );
    }

    #[test]
    fn later_layout_state_replaces_entry() {
        let map = ExceptionMap::default()
            .with_issue(1501, gears(&[(1, GearIssue::MissingGear)]))
            .with_issue(1501, ShipIssue::UnknownLayout);
        assert_eq!(map.get(1501), Some(&ShipIssue::UnknownLayout));
        let map = map.with_issue(1501, gears(&[(3, GearIssue::MissingGear)]));
        assert_eq!(map.get(1501), Some(&gears(&[(3, GearIssue::MissingGear)])));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_and_len() {
        assert!(ExceptionMap::default().is_empty());
        let missing = ExceptionMap::fleet_missing();
        assert!(!missing.is_empty());
        assert_eq!(missing.len(), 1);
        assert!(missing.is_fleet_missing());
    }
}
