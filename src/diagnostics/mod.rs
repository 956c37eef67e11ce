//! Estimate confidence and per-gap findings: severity, explanation, technical note.

use crate::estimate::{EstimateResult, GearIssue, ShipIssue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// Every ship and gear resolved.
    Exact,
    /// Some data was missing; totals are a lower bound.
    Partial,
    /// No opponent data.
    Unknown,
}

pub fn confidence(result: &EstimateResult) -> Confidence {
    match result {
        EstimateResult::NoFleetData { .. } => Confidence::Unknown,
        EstimateResult::Estimate { exceptions, .. } if exceptions.is_empty() => Confidence::Exact,
        EstimateResult::Estimate { .. } => Confidence::Partial,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warn,
    Crit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    /// Short explanation for users.
    pub summary: String,
    /// Technical note for devs.
    pub technical: String,
    pub ship_id: Option<i64>,
    pub gear_id: Option<i64>,
}

impl Diagnostic {
    pub fn no_fleet_data() -> Self {
        Self {
            code: "NO_FLEET_DATA".to_string(),
            severity: Severity::Crit,
            summary: "No enemy fleet data; fighter power cannot be estimated.".to_string(),
            technical: "ship_ids absent or empty".to_string(),
            ship_id: None,
            gear_id: None,
        }
    }

    pub fn ship_master_missing(ship_id: i64) -> Self {
        Self {
            code: "SHIP_MASTER_MISSING".to_string(),
            severity: Severity::Warn,
            summary: format!("Ship {}: unknown ship, not counted.", ship_id),
            technical: format!("no master record for ship id {}", ship_id),
            ship_id: Some(ship_id),
            gear_id: None,
        }
    }

    pub fn slot_layout_unknown(ship_id: i64) -> Self {
        Self {
            code: "SLOT_LAYOUT_UNKNOWN".to_string(),
            severity: Severity::Warn,
            summary: format!("Ship {}: equipment unknown, not counted.", ship_id),
            technical: "no slot override and no default api_slot".to_string(),
            ship_id: Some(ship_id),
            gear_id: None,
        }
    }

    pub fn gear(ship_id: i64, gear_id: i64, issue: GearIssue) -> Self {
        let (code, severity, summary, technical) = match issue {
            GearIssue::MissingGear => (
                "GEAR_MASTER_MISSING",
                Severity::Warn,
                format!("Ship {}: unknown gear {}, not counted.", ship_id, gear_id),
                format!("no slotitem record for gear id {}", gear_id),
            ),
            GearIssue::MissingCapacity { anti_air } => (
                "FIGHTER_CAPACITY_MISSING",
                Severity::Warn,
                format!(
                    "Ship {}: fighter {} (AA {}) has unknown slot size, not counted.",
                    ship_id, gear_id, anti_air
                ),
                format!(
                    "no maxeq for gear {}; anti_air={}, contribution would be floor(sqrt(n) * {})",
                    gear_id, anti_air, anti_air
                ),
            ),
            GearIssue::MissingReconCapacity => (
                "RECON_CAPACITY_MISSING",
                Severity::Info,
                format!(
                    "Ship {}: recon plane {} has unknown slot size.",
                    ship_id, gear_id
                ),
                "recon capacity only affects land-base air battle".to_string(),
            ),
        };
        Self {
            code: code.to_string(),
            severity,
            summary,
            technical,
            ship_id: Some(ship_id),
            gear_id: Some(gear_id),
        }
    }
}

/// One finding per exception entry, ordered by ship ID then gear ID.
pub fn diagnose(result: &EstimateResult) -> Vec<Diagnostic> {
    let exceptions = result.exceptions();
    let mut out = Vec::with_capacity(exceptions.len());
    if exceptions.is_fleet_missing() {
        out.push(Diagnostic::no_fleet_data());
    }
    for (ship_id, issue) in exceptions.iter() {
        match issue {
            ShipIssue::MissingShip => out.push(Diagnostic::ship_master_missing(ship_id)),
            ShipIssue::UnknownLayout => out.push(Diagnostic::slot_layout_unknown(ship_id)),
            ShipIssue::Gears(gears) => out.extend(
                gears
                    .iter()
                    .map(|(gear_id, issue)| Diagnostic::gear(ship_id, *gear_id, *issue)),
            ),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::ExceptionMap;
    use std::collections::BTreeMap;

    fn estimate_with(exceptions: ExceptionMap) -> EstimateResult {
        EstimateResult::Estimate {
            total_power: 30,
            total_capacity: 9,
            no_air_power_capacity: 0,
            recon_capacity: 0,
            exceptions,
        }
    }

    #[test]
    fn confidence_levels() {
        let none = EstimateResult::NoFleetData {
            exceptions: ExceptionMap::fleet_missing(),
        };
        assert_eq!(confidence(&none), Confidence::Unknown);
        assert_eq!(
            confidence(&estimate_with(ExceptionMap::default())),
            Confidence::Exact
        );
        let partial =
            estimate_with(ExceptionMap::default().with_issue(1501, ShipIssue::MissingShip));
        assert_eq!(confidence(&partial), Confidence::Partial);
    }

    #[test]
    fn diagnose_orders_and_codes() {
        let gears: BTreeMap<i64, GearIssue> = [
            (20, GearIssue::MissingReconCapacity),
            (15, GearIssue::MissingCapacity { anti_air: 10 }),
        ]
        .into();
        let r = estimate_with(
            ExceptionMap::default()
                .with_issue(1503, ShipIssue::Gears(gears))
                .with_issue(1501, ShipIssue::MissingShip)
                .with_issue(1502, ShipIssue::UnknownLayout),
        );
        let d = diagnose(&r);
        let codes: Vec<&str> = d.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            [
                "SHIP_MASTER_MISSING",
                "SLOT_LAYOUT_UNKNOWN",
                "FIGHTER_CAPACITY_MISSING",
                "RECON_CAPACITY_MISSING"
            ]
        );
        assert_eq!(d[2].gear_id, Some(15));
        assert!(d[2].summary.contains("AA 10"));
        assert_eq!(d[3].severity, Severity::Info);
    }

    #[test]
    fn diagnose_no_fleet() {
        let r = EstimateResult::NoFleetData {
            exceptions: ExceptionMap::fleet_missing(),
        };
        let d = diagnose(&r);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].severity, Severity::Crit);
    }
}
