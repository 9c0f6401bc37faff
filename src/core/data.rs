use chrono::{DateTime, Utc};
use validator::Validate;

use super::ScoringError;
use crate::models::{PatientData, PatientParameters, Reading};

/// Coerce submitted readings to numbers and validate them.
pub fn process_parameters(
    params: &PatientParameters,
    timestamp: DateTime<Utc>,
) -> Result<PatientData, ScoringError> {
    let data = PatientData {
        plet_variation: coerce("plet_variation", &params.plet_variation)?,
        microvascular_flow: coerce("microvascular_flow", &params.microvascular_flow)?,
        optic_nerve_diameter: coerce("optic_nerve_diameter", &params.optic_nerve_diameter)?,
        bis_index: coerce("bis_index", &params.bis_index)?,
        spo2: coerce("spo2", &params.spo2)?,
        map_bp: coerce("map_bp", &params.map_bp)?,
        hb: coerce("hb", &params.hb)?,
        temperature: coerce("temperature", &params.temperature)?,
        emboli_count: params
            .emboli_count
            .as_count()
            .ok_or_else(|| invalid("emboli_count", &params.emboli_count))?,
        timestamp,
    };

    data.validate()?;
    Ok(data)
}

fn coerce(field: &'static str, reading: &Reading) -> Result<f64, ScoringError> {
    match reading.as_f64() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(invalid(field, reading)),
    }
}

fn invalid(field: &'static str, reading: &Reading) -> ScoringError {
    ScoringError::InvalidReading {
        field,
        value: reading.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_defaults_coerce() {
        let data = process_parameters(&PatientParameters::default(), Utc::now()).unwrap();
        assert_eq!(data.microvascular_flow, 25.0);
        assert_eq!(data.optic_nerve_diameter, 5.0);
        assert_eq!(data.temperature, 36.5);
        assert_eq!(data.emboli_count, 0);
    }

    #[test]
    fn non_numeric_text_names_the_field() {
        let mut params = PatientParameters::default();
        params.set("hb", "low");
        match process_parameters(&params, Utc::now()) {
            Err(ScoringError::InvalidReading { field, value }) => {
                assert_eq!(field, "hb");
                assert_eq!(value, "low");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn infinite_text_is_rejected() {
        let mut params = PatientParameters::default();
        params.set("temperature", "inf");
        assert!(process_parameters(&params, Utc::now()).is_err());
    }

    #[test]
    fn out_of_range_is_a_validation_error() {
        let mut params = PatientParameters::default();
        params.set("spo2", 140.0);
        assert!(matches!(
            process_parameters(&params, Utc::now()),
            Err(ScoringError::Validation(_))
        ));
    }
}
