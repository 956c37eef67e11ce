//! JSON and text report generation.

use crate::airstate::{self, AirState};
use crate::diagnostics::{self, Confidence, Diagnostic, Severity};
use crate::estimate::EstimateResult;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub result: EstimateResult,
    pub confidence: Confidence,
    pub diagnostics: Vec<Diagnostic>,
    pub friendly_power: Option<i64>,
    pub air_state: Option<AirState>,
}

impl EstimateReport {
    pub fn new(result: EstimateResult, friendly_power: Option<i64>) -> Self {
        let air_state = friendly_power.and_then(|f| airstate::contest(f, &result));
        Self {
            confidence: diagnostics::confidence(&result),
            diagnostics: diagnostics::diagnose(&result),
            friendly_power,
            air_state,
            result,
        }
    }
}

pub fn render_json(report: &EstimateReport) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| e.to_string())
}

pub fn write_json_report(report: &EstimateReport, path: &Path) -> Result<(), String> {
    let json = render_json(report)?;
    fs::write(path, json).map_err(|e| e.to_string())?;
    Ok(())
}

pub fn render_text(report: &EstimateReport) -> String {
    let mut out = String::new();
    let confidence = match report.confidence {
        Confidence::Exact => "exact",
        Confidence::Partial => "partial (lower bound)",
        Confidence::Unknown => "unknown",
    };
    match report.result.totals() {
        None => {
            let _ = writeln!(out, "Enemy fighter power: n/a");
        }
        Some(t) => {
            let marker = if report.confidence == Confidence::Partial {
                "+"
            } else {
                ""
            };
            let _ = writeln!(out, "Enemy fighter power: {}{}", t.power, marker);
            let _ = writeln!(out, "  fighter slots:     {}", t.capacity);
            let _ = writeln!(out, "  zero-AA slots:     {}", t.no_air_power_capacity);
            let _ = writeln!(out, "  recon slots:       {}", t.recon_capacity);
            if let Some(f) = report.friendly_power {
                let _ = writeln!(
                    out,
                    "  supremacy at:      {} (superiority at {})",
                    airstate::supremacy_threshold(t.power),
                    airstate::superiority_threshold(t.power)
                );
                if let Some(state) = report.air_state {
                    let _ = writeln!(out, "Friendly {} -> {}", f, state.label());
                }
            }
        }
    }
    let _ = writeln!(out, "Confidence: {}", confidence);
    if !report.diagnostics.is_empty() {
        let _ = writeln!(out, "\nMissing data:");
        for d in &report.diagnostics {
            let sev = match d.severity {
                Severity::Info => "INFO",
                Severity::Warn => "WARN",
                Severity::Crit => "CRIT",
            };
            let _ = writeln!(out, "  [{}] {} - {}", d.code, sev, d.summary);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{ExceptionMap, ShipIssue};

    fn partial() -> EstimateResult {
        EstimateResult::Estimate {
            total_power: 30,
            total_capacity: 9,
            no_air_power_capacity: 5,
            recon_capacity: 4,
            exceptions: ExceptionMap::default().with_issue(1506, ShipIssue::UnknownLayout),
        }
    }

    #[test]
    fn text_report_marks_lower_bound() {
        let report = EstimateReport::new(partial(), Some(95));
        let text = render_text(&report);
        assert!(text.contains("Enemy fighter power: 30+"));
        assert!(text.contains("supremacy at:      90 (superiority at 45)"));
        assert!(text.contains("air supremacy"));
        assert!(text.contains("SLOT_LAYOUT_UNKNOWN"));
    }

    #[test]
    fn text_report_without_fleet() {
        let report = EstimateReport::new(
            EstimateResult::NoFleetData {
                exceptions: ExceptionMap::fleet_missing(),
            },
            Some(50),
        );
        assert!(report.air_state.is_none());
        let text = render_text(&report);
        assert!(text.contains("n/a"));
        assert!(text.contains("Confidence: unknown"));
    }

    #[test]
    fn json_report_shape() {
        let report = EstimateReport::new(partial(), None);
        let v: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(v["result"]["kind"], "estimate");
        assert_eq!(v["result"]["total_power"], 30);
        assert_eq!(v["result"]["exceptions"], serde_json::json!({"1506": {}}));
        assert_eq!(v["confidence"], "Partial");
        assert!(v["air_state"].is_null());
    }

    #[test]
    fn write_json_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimate.json");
        write_json_report(&EstimateReport::new(partial(), Some(20)), &path).unwrap();
        let s = fs::read_to_string(&path).unwrap();
        assert!(s.contains("\"air_state\": \"parity\""));
    }
}
