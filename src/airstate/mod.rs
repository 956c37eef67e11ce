//! Air state bands: friendly fighter power against the enemy estimate.

use crate::estimate::EstimateResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirState {
    Supremacy,
    Superiority,
    Parity,
    Denial,
    Incapability,
}

impl AirState {
    pub fn label(self) -> &'static str {
        match self {
            AirState::Supremacy => "air supremacy",
            AirState::Superiority => "air superiority",
            AirState::Parity => "air parity",
            AirState::Denial => "air denial",
            AirState::Incapability => "air incapability",
        }
    }
}

/// Band for `friendly` vs `enemy` fighter power. Thresholds are 3x, 1.5x, 2/3 and 1/3.
pub fn air_state(friendly: i64, enemy: i64) -> AirState {
    let (f, e) = (friendly.max(0), enemy.max(0));
    if f == 0 && e == 0 {
        return AirState::Parity;
    }
    if f >= e.saturating_mul(3) {
        AirState::Supremacy
    } else if f.saturating_mul(2) >= e.saturating_mul(3) {
        AirState::Superiority
    } else if f.saturating_mul(3) >= e.saturating_mul(2) {
        AirState::Parity
    } else if f.saturating_mul(3) >= e {
        AirState::Denial
    } else {
        AirState::Incapability
    }
}

/// Minimum friendly power for supremacy.
pub fn supremacy_threshold(enemy: i64) -> i64 {
    enemy.max(0).saturating_mul(3)
}

/// Minimum friendly power for superiority: ceil(1.5 * enemy).
pub fn superiority_threshold(enemy: i64) -> i64 {
    let e = enemy.max(0);
    e.saturating_mul(3).saturating_add(1) / 2
}

/// `None` when there is no opponent data to contest against.
pub fn contest(friendly: i64, result: &EstimateResult) -> Option<AirState> {
    result.total_power().map(|enemy| air_state(friendly, enemy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::ExceptionMap;

    #[test]
    fn bands_at_boundaries() {
        assert_eq!(air_state(90, 30), AirState::Supremacy);
        assert_eq!(air_state(89, 30), AirState::Superiority);
        assert_eq!(air_state(45, 30), AirState::Superiority);
        assert_eq!(air_state(44, 30), AirState::Parity);
        assert_eq!(air_state(20, 30), AirState::Parity);
        assert_eq!(air_state(19, 30), AirState::Denial);
        assert_eq!(air_state(10, 30), AirState::Denial);
        assert_eq!(air_state(9, 30), AirState::Incapability);
    }

    #[test]
    fn zero_powers() {
        assert_eq!(air_state(0, 0), AirState::Parity);
        assert_eq!(air_state(1, 0), AirState::Supremacy);
        assert_eq!(air_state(0, 1), AirState::Incapability);
    }

    #[test]
    fn thresholds_match_bands() {
        for enemy in [1, 7, 30, 101] {
            assert_eq!(
                air_state(supremacy_threshold(enemy), enemy),
                AirState::Supremacy
            );
            let sup = superiority_threshold(enemy);
            assert_eq!(air_state(sup, enemy), AirState::Superiority);
            assert_ne!(air_state(sup - 1, enemy), AirState::Superiority);
        }
        assert_eq!(supremacy_threshold(0), 0);
    }

    #[test]
    fn extreme_powers_do_not_overflow() {
        assert_eq!(air_state(i64::MAX, i64::MAX), AirState::Supremacy);
        assert_eq!(air_state(1, i64::MAX), AirState::Incapability);
        assert_eq!(supremacy_threshold(i64::MAX), i64::MAX);
        assert_eq!(superiority_threshold(i64::MAX), i64::MAX / 2);
    }

    #[test]
    fn contest_without_fleet_is_none() {
        let r = EstimateResult::NoFleetData {
            exceptions: ExceptionMap::fleet_missing(),
        };
        assert_eq!(contest(100, &r), None);
    }
}
