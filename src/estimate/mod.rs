//! Enemy fighter power estimation from ID-only fleet data.
//!
//! The estimate is built from master data defaults, overridden per ship by
//! whatever slot layout and capacities the battle packet carried. Anything that
//! cannot be resolved is recorded in an [`ExceptionMap`] instead of failing, so
//! callers can show a partial number together with how much of it is known.

mod exceptions;

pub use exceptions::{ExceptionMap, GearIssue, ShipIssue};

use crate::config::{EstimatorConfig, MAX_FLEET_SIZE, MAX_SLOTS};
use crate::master::{GearMaster, MasterLookup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Add;

/// Opponent fleet as reported by a battle packet. All three sequences are parallel by ship index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// `None`, zero and negative IDs are empty positions.
    #[serde(default)]
    pub ship_ids: Option<Vec<Option<i64>>>,
    /// Per-ship gear IDs, replacing the master default layout.
    #[serde(default)]
    pub slots: Option<Vec<Option<Vec<i64>>>>,
    /// Per-ship slot capacities, replacing master defaults slot by slot.
    #[serde(default)]
    pub maxeq: Option<Vec<Option<Vec<i64>>>>,
}

impl FleetSnapshot {
    pub fn from_ids(ids: &[i64]) -> Self {
        Self {
            ship_ids: Some(ids.iter().copied().map(Some).collect()),
            ..Self::default()
        }
    }

    fn slot_override(&self, ship_idx: usize) -> Option<&[i64]> {
        self.slots.as_ref()?.get(ship_idx)?.as_deref()
    }

    fn capacity_override(&self, ship_idx: usize, slot_idx: usize) -> Option<i64> {
        self.maxeq
            .as_ref()?
            .get(ship_idx)?
            .as_ref()?
            .get(slot_idx)
            .copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AirPowerTotals {
    pub power: i64,
    /// Capacity of slots that contributed to `power`.
    pub capacity: i64,
    /// Capacity of fighter-type slots whose anti-air stat is zero.
    pub no_air_power_capacity: i64,
    /// Reconnaissance capacity; matters for land-base air battle only.
    pub recon_capacity: i64,
}

impl Add for AirPowerTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            power: self.power.saturating_add(rhs.power),
            capacity: self.capacity.saturating_add(rhs.capacity),
            no_air_power_capacity: self
                .no_air_power_capacity
                .saturating_add(rhs.no_air_power_capacity),
            recon_capacity: self.recon_capacity.saturating_add(rhs.recon_capacity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateResult {
    /// The snapshot named no ships at all.
    NoFleetData { exceptions: ExceptionMap },
    Estimate {
        total_power: i64,
        total_capacity: i64,
        no_air_power_capacity: i64,
        recon_capacity: i64,
        exceptions: ExceptionMap,
    },
}

impl EstimateResult {
    fn from_parts(totals: AirPowerTotals, exceptions: ExceptionMap) -> Self {
        EstimateResult::Estimate {
            total_power: totals.power,
            total_capacity: totals.capacity,
            no_air_power_capacity: totals.no_air_power_capacity,
            recon_capacity: totals.recon_capacity,
            exceptions,
        }
    }

    pub fn exceptions(&self) -> &ExceptionMap {
        match self {
            EstimateResult::NoFleetData { exceptions } => exceptions,
            EstimateResult::Estimate { exceptions, .. } => exceptions,
        }
    }

    pub fn totals(&self) -> Option<AirPowerTotals> {
        match self {
            EstimateResult::NoFleetData { .. } => None,
            EstimateResult::Estimate {
                total_power,
                total_capacity,
                no_air_power_capacity,
                recon_capacity,
                ..
            } => Some(AirPowerTotals {
                power: *total_power,
                capacity: *total_capacity,
                no_air_power_capacity: *no_air_power_capacity,
                recon_capacity: *recon_capacity,
            }),
        }
    }

    pub fn total_power(&self) -> Option<i64> {
        self.totals().map(|t| t.power)
    }
}

/// How a gear is treated by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GearClass {
    Fighter,
    Recon,
    Other,
}

/// Fighter classification wins over recon when a gear matches both.
pub fn classify(gear: &GearMaster, cfg: &EstimatorConfig) -> GearClass {
    if gear.type2().map(|t| cfg.is_fighter_type(t)).unwrap_or(false) {
        GearClass::Fighter
    } else if gear.category() == Some(cfg.recon_category) {
        GearClass::Recon
    } else {
        GearClass::Other
    }
}

/// Fighter power of one slot: floor(sqrt(capacity) * anti_air).
pub fn slot_fighter_power(capacity: i64, anti_air: i64) -> i64 {
    ((capacity as f64).sqrt() * anti_air as f64).floor() as i64
}

enum GearOutcome {
    Counted(AirPowerTotals),
    Issue(GearIssue),
    Ignored,
}

fn assess_gear(
    gear: Option<&GearMaster>,
    cfg: &EstimatorConfig,
    capacity: Option<i64>,
) -> GearOutcome {
    let Some(gear) = gear else {
        return GearOutcome::Issue(GearIssue::MissingGear);
    };
    match classify(gear, cfg) {
        GearClass::Fighter => {
            let anti_air = gear.anti_air();
            match capacity {
                Some(capacity) if anti_air > 0 => GearOutcome::Counted(AirPowerTotals {
                    power: slot_fighter_power(capacity, anti_air),
                    capacity,
                    ..AirPowerTotals::default()
                }),
                Some(capacity) => GearOutcome::Counted(AirPowerTotals {
                    no_air_power_capacity: capacity,
                    ..AirPowerTotals::default()
                }),
                None => GearOutcome::Issue(GearIssue::MissingCapacity { anti_air }),
            }
        }
        GearClass::Recon => match capacity {
            Some(capacity) => GearOutcome::Counted(AirPowerTotals {
                recon_capacity: capacity,
                ..AirPowerTotals::default()
            }),
            None => GearOutcome::Issue(GearIssue::MissingReconCapacity),
        },
        GearClass::Other => GearOutcome::Ignored,
    }
}

struct ShipAssessment {
    totals: AirPowerTotals,
    issue: Option<ShipIssue>,
}

impl ShipAssessment {
    fn issue(issue: ShipIssue) -> Self {
        Self {
            totals: AirPowerTotals::default(),
            issue: Some(issue),
        }
    }
}

fn assess_ship<M: MasterLookup + ?Sized>(
    master: &M,
    cfg: &EstimatorConfig,
    snapshot: &FleetSnapshot,
    ship_idx: usize,
    ship_id: i64,
) -> ShipAssessment {
    let ship_ref = master.ship_ref(ship_id);
    let Some(ship) = master.resolve_ship(ship_ref) else {
        tracing::debug!("no master record for ship {} ({:?})", ship_ref.id(), ship_ref);
        return ShipAssessment::issue(ShipIssue::MissingShip);
    };
    let Some(slots) = snapshot
        .slot_override(ship_idx)
        .or(ship.slots.as_deref())
    else {
        tracing::debug!("no slot layout for ship {} ({})", ship_id, ship.name);
        return ShipAssessment::issue(ShipIssue::UnknownLayout);
    };
    if slots.len() > MAX_SLOTS {
        tracing::debug!("ship {} has {} slots", ship_id, slots.len());
    }

    let mut totals = AirPowerTotals::default();
    let mut gear_issues = BTreeMap::new();
    for (slot_idx, gear_id) in slots.iter().copied().enumerate().filter(|(_, g)| *g > 0) {
        let capacity = snapshot
            .capacity_override(ship_idx, slot_idx)
            .or_else(|| ship.default_capacity(slot_idx));
        match assess_gear(master.slotitem(gear_id), cfg, capacity) {
            GearOutcome::Counted(t) => totals = totals + t,
            GearOutcome::Issue(issue) => {
                tracing::debug!(
                    "ship {} slot {} gear {}: {:?}",
                    ship_id,
                    slot_idx,
                    gear_id,
                    issue
                );
                gear_issues.insert(gear_id, issue);
            }
            GearOutcome::Ignored => {}
        }
    }
    ShipAssessment {
        totals,
        issue: (!gear_issues.is_empty()).then_some(ShipIssue::Gears(gear_issues)),
    }
}

/// Estimate the opponent fleet's fighter power. Never fails: unresolvable
/// ships and gears are reported in the result's exception map.
pub fn estimate<M: MasterLookup + ?Sized>(
    master: &M,
    cfg: &EstimatorConfig,
    snapshot: &FleetSnapshot,
) -> EstimateResult {
    let ship_ids = match snapshot.ship_ids.as_deref() {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            return EstimateResult::NoFleetData {
                exceptions: ExceptionMap::fleet_missing(),
            }
        }
    };
    if ship_ids.len() > MAX_FLEET_SIZE {
        tracing::debug!("fleet snapshot has {} positions", ship_ids.len());
    }

    let (totals, exceptions) = ship_ids
        .iter()
        .enumerate()
        .filter_map(|(idx, id)| id.filter(|id| *id > 0).map(|id| (idx, id)))
        .map(|(idx, id)| (id, assess_ship(master, cfg, snapshot, idx, id)))
        .fold(
            (AirPowerTotals::default(), ExceptionMap::default()),
            |(totals, exceptions), (id, assessment)| {
                let exceptions = match assessment.issue {
                    Some(issue) => exceptions.with_issue(id, issue),
                    None => exceptions,
                };
                (totals + assessment.totals, exceptions)
            },
        );
    EstimateResult::from_parts(totals, exceptions)
}
