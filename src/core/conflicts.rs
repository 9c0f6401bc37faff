//! Detection of readings that disagree with each other.

use tracing::warn;

use crate::models::{ComponentScores, Conflict, PatientData, Severity};

struct ConflictRule {
    conflict_type: &'static str,
    severity: Severity,
    message: &'static str,
    suggestions: &'static [&'static str],
    applies: fn(&PatientData, &ComponentScores) -> bool,
}

fn conflict_rules() -> [ConflictRule; 2] {
    [
        ConflictRule {
            conflict_type: "NEUROVASCULAR_DECOUPLING",
            severity: Severity::High,
            message: "Adequate anesthesia depth but poor optic nerve perfusion",
            suggestions: &[
                "Check head positioning",
                "Verify ultrasound probe placement",
                "Consider MAP optimization",
            ],
            applies: |data, scores| data.bis_index > 60.0 && scores.microvascular_flow > 70.0,
        },
        ConflictRule {
            conflict_type: "MICROVASCULAR_COMPROMISE",
            severity: Severity::Medium,
            message: "Adequate systemic oxygenation but impaired local perfusion",
            suggestions: &[
                "Assess for venous congestion",
                "Check intraocular pressure",
                "Review positioning",
            ],
            applies: |data, scores| data.spo2 > 95.0 && scores.microvascular_flow > 60.0,
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct ConflictEngine;

impl ConflictEngine {
    pub fn new() -> Self {
        Self
    }

    /// Conflicts in rule order.
    pub fn detect_conflicts(&self, data: &PatientData, scores: &ComponentScores) -> Vec<Conflict> {
        conflict_rules()
            .into_iter()
            .filter(|rule| (rule.applies)(data, scores))
            .map(|rule| {
                warn!(conflict = rule.conflict_type, severity = %rule.severity, "Conflict detected");
                Conflict {
                    conflict_type: rule.conflict_type.to_string(),
                    severity: rule.severity,
                    message: rule.message.to_string(),
                    suggestions: rule.suggestions.iter().map(|s| s.to_string()).collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn data(bis_index: f64, spo2: f64) -> PatientData {
        PatientData {
            plet_variation: 15.0,
            microvascular_flow: 5.0,
            optic_nerve_diameter: 5.0,
            bis_index,
            spo2,
            map_bp: 70.0,
            hb: 10.0,
            temperature: 36.5,
            emboli_count: 0,
            timestamp: Utc::now(),
        }
    }

    fn flow(score: f64) -> ComponentScores {
        ComponentScores {
            microvascular_flow: score,
            ..Default::default()
        }
    }

    #[test]
    fn both_rules_fire_in_order() {
        let conflicts = ConflictEngine::new().detect_conflicts(&data(65.0, 98.0), &flow(80.0));
        let types: Vec<_> = conflicts.iter().map(|c| c.conflict_type.as_str()).collect();
        assert_eq!(types, ["NEUROVASCULAR_DECOUPLING", "MICROVASCULAR_COMPROMISE"]);
        assert_eq!(conflicts[0].severity, Severity::High);
        assert_eq!(conflicts[1].severity, Severity::Medium);
        assert_eq!(conflicts[0].suggestions.len(), 3);
    }

    #[test]
    fn thresholds_are_strict() {
        let engine = ConflictEngine::new();
        assert!(engine.detect_conflicts(&data(60.0, 95.0), &flow(80.0)).is_empty());
        assert!(engine.detect_conflicts(&data(65.0, 98.0), &flow(60.0)).is_empty());
    }

    #[test]
    fn oxygenation_rule_alone() {
        let conflicts = ConflictEngine::new().detect_conflicts(&data(45.0, 98.0), &flow(65.0));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].conflict_type, "MICROVASCULAR_COMPROMISE");
    }
}
