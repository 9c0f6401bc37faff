//! Optic Risk Score engine.
//!
//! Each physiological reading is normalised to a risk in `[0, 1]`, the
//! risks are combined with the static [`Component`] weights, and the
//! weighted sum is scaled to 0-100.

use tracing::debug;

use super::ScoringError;
use crate::models::{Component, ComponentScores, OrsResult, PatientData, RiskLevel};
use crate::utils::round_to;

const LOW_RISK_CEILING: f64 = 30.0;
const MODERATE_RISK_CEILING: f64 = 60.0;

// Normalisation anchors.
const FLOW_REFERENCE: f64 = 30.0;
const PLET_REFERENCE: f64 = 40.0;
const EMBOLI_REFERENCE: f64 = 20.0;
const ONSD_BASELINE_MM: f64 = 4.5;
const ONSD_SPAN_MM: f64 = 2.0;
const MAP_REFERENCE: f64 = 80.0;
const HB_REFERENCE: f64 = 10.0;
const NORMOTHERMIA_C: f64 = 37.0;
const TEMPERATURE_SPAN_C: f64 = 3.0;

// CMRO2/DO2 surrogate.
const CMRO2_PER_BIS: f64 = 0.3;
const HB_O2_CAPACITY: f64 = 1.34;

#[derive(Debug, Clone, Default)]
pub struct OrsCalculator;

impl OrsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Per-axis risks in `[0, 1]`.
    pub fn component_risks(&self, data: &PatientData) -> ComponentScores {
        ComponentScores {
            microvascular_flow: (1.0 - data.microvascular_flow / FLOW_REFERENCE).max(0.0),
            plet_variation: (data.plet_variation / PLET_REFERENCE).min(1.0),
            emboli_count: (data.emboli_count as f64 / EMBOLI_REFERENCE).min(1.0),
            optic_nerve_diameter: ((data.optic_nerve_diameter - ONSD_BASELINE_MM) / ONSD_SPAN_MM)
                .clamp(0.0, 1.0),
            bis_index: (1.0 - data.bis_index / 100.0).max(0.0),
            spo2: (1.0 - data.spo2 / 100.0).max(0.0),
            map_bp: (1.0 - data.map_bp / MAP_REFERENCE).max(0.0),
            hb: (1.0 - data.hb / HB_REFERENCE).max(0.0),
            temperature: ((data.temperature - NORMOTHERMIA_C).abs() / TEMPERATURE_SPAN_C).min(1.0),
        }
    }

    /// Cerebral oxygen consumption over delivery. Falls back to 1.0 when
    /// delivery is zero.
    pub fn cmro2_do2_ratio(&self, data: &PatientData) -> f64 {
        let cmro2 = data.bis_index * CMRO2_PER_BIS;
        let do2 = (data.hb * HB_O2_CAPACITY * data.spo2 / 100.0) * data.microvascular_flow;
        if do2 > 0.0 {
            cmro2 / do2
        } else {
            1.0
        }
    }

    /// Score one set of readings. The result carries no conflicts.
    pub fn calculate(&self, data: &PatientData) -> Result<OrsResult, ScoringError> {
        let risks = self.component_risks(data);

        let weighted: f64 = risks.iter().map(|(c, r)| r * c.weight()).sum();
        let ors = weighted * 100.0;
        if !ors.is_finite() {
            return Err(ScoringError::NonFinite("ors_score"));
        }

        let ratio = self.cmro2_do2_ratio(data);
        if !ratio.is_finite() {
            return Err(ScoringError::NonFinite("cmro2_do2_ratio"));
        }

        let risk_level = risk_level_for(ors);
        debug!(ors, %risk_level, "ORS calculated");

        Ok(OrsResult {
            ors_score: round_to(ors, 1),
            alert: risk_level == RiskLevel::High,
            risk_level,
            cmro2_do2_ratio: round_to(ratio, 3),
            timestamp: data.timestamp,
            component_scores: scale(risks),
            conflicts: Vec::new(),
        })
    }
}

/// Bucket an unrounded ORS into a risk level.
pub fn risk_level_for(ors: f64) -> RiskLevel {
    if ors < LOW_RISK_CEILING {
        RiskLevel::Low
    } else if ors < MODERATE_RISK_CEILING {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

fn scale(risks: ComponentScores) -> ComponentScores {
    let pct = |c: Component| risks.get(c) * 100.0;
    ComponentScores {
        microvascular_flow: pct(Component::MicrovascularFlow),
        plet_variation: pct(Component::PletVariation),
        emboli_count: pct(Component::EmboliCount),
        optic_nerve_diameter: pct(Component::OpticNerveDiameter),
        bis_index: pct(Component::BisIndex),
        spo2: pct(Component::Spo2),
        map_bp: pct(Component::MapBp),
        hb: pct(Component::Hb),
        temperature: pct(Component::Temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn data() -> PatientData {
        PatientData {
            plet_variation: 15.0,
            microvascular_flow: 25.0,
            optic_nerve_diameter: 5.0,
            bis_index: 45.0,
            spo2: 98.0,
            map_bp: 70.0,
            hb: 10.0,
            temperature: 36.5,
            emboli_count: 0,
            timestamp: Utc::now(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn form_defaults_score_low() {
        let result = OrsCalculator::new().calculate(&data()).unwrap();
        // 0.2/6 + 0.16*0.375 + 0.12*0.25 + 0.11*0.55 + 0.09*0.02
        //   + 0.07*0.125 + 0.06/6 = 0.2044
        assert_eq!(result.ors_score, 20.4);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.alert);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn component_scores_are_percentages() {
        let result = OrsCalculator::new().calculate(&data()).unwrap();
        let scores = result.component_scores;
        assert!(close(scores.plet_variation, 37.5));
        assert!(close(scores.optic_nerve_diameter, 25.0));
        assert!(close(scores.emboli_count, 0.0));
        assert!(close(scores.hb, 0.0));
        assert!(close(scores.map_bp, 12.5));
    }

    #[test]
    fn cmro2_ratio_rounds_to_three_places() {
        let result = OrsCalculator::new().calculate(&data()).unwrap();
        // 13.5 / (10 * 1.34 * 0.98 * 25) = 0.04112...
        assert_eq!(result.cmro2_do2_ratio, 0.041);
    }

    #[test]
    fn zero_delivery_ratio_falls_back_to_one() {
        let d = PatientData { microvascular_flow: 0.0, ..data() };
        assert_eq!(OrsCalculator::new().cmro2_do2_ratio(&d), 1.0);
    }

    #[test]
    fn saturated_inputs_alert() {
        let d = PatientData {
            plet_variation: 60.0,
            microvascular_flow: 0.0,
            optic_nerve_diameter: 7.0,
            bis_index: 0.0,
            spo2: 0.0,
            map_bp: 0.0,
            hb: 0.0,
            temperature: 41.0,
            emboli_count: 40,
            ..data()
        };
        let result = OrsCalculator::new().calculate(&d).unwrap();
        assert_eq!(result.ors_score, 100.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result.alert);
    }

    #[test]
    fn risk_level_boundaries() {
        assert_eq!(risk_level_for(29.99), RiskLevel::Low);
        assert_eq!(risk_level_for(30.0), RiskLevel::Moderate);
        assert_eq!(risk_level_for(59.99), RiskLevel::Moderate);
        assert_eq!(risk_level_for(60.0), RiskLevel::High);
    }
}
