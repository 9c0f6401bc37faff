use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Coerced, validated readings for one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatientData {
    #[validate(range(min = 0.0))]
    pub plet_variation: f64,
    #[validate(range(min = 0.0))]
    pub microvascular_flow: f64,
    #[validate(range(min = 0.0))]
    pub optic_nerve_diameter: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub bis_index: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub spo2: f64,
    #[validate(range(min = 0.0))]
    pub map_bp: f64,
    #[validate(range(min = 0.0))]
    pub hb: f64,
    pub temperature: f64,
    #[validate(range(min = 0))]
    pub emboli_count: i64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PatientData {
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

    #[test]
    fn defaults_validate() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn spo2_above_one_hundred_fails() {
        let data = PatientData { spo2: 101.0, ..sample() };
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("spo2"));
    }

    #[test]
    fn negative_counts_fail() {
        let data = PatientData { emboli_count: -1, ..sample() };
        assert!(data.validate().is_err());
    }

    #[test]
    fn temperature_is_unbounded() {
        let data = PatientData { temperature: 30.0, ..sample() };
        assert!(data.validate().is_ok());
    }
}
