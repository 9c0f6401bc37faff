use serde::{Deserialize, Serialize};
use std::fmt;

/// A single form reading, sent either as a JSON number or as the raw
/// text the operator typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl Reading {
    /// Coerce to a float. Text is trimmed before parsing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Reading::Number(n) => Some(*n),
            Reading::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Coerce to a whole count. Numbers truncate toward zero, text must
    /// already be an integer.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Reading::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Reading::Number(_) => None,
            Reading::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::Number(value)
    }
}

impl From<&str> for Reading {
    fn from(value: &str) -> Self {
        Reading::Text(value.to_string())
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{}", n),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

/// Physiological readings submitted to `/api/calculate-ors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientParameters {
    pub microvascular_flow: Reading,
    pub plet_variation: Reading,
    pub optic_nerve_diameter: Reading,
    pub bis_index: Reading,
    pub spo2: Reading,
    pub map_bp: Reading,
    pub hb: Reading,
    pub temperature: Reading,
    pub emboli_count: Reading,
}

/// Wire names in form order.
pub const PARAMETER_FIELDS: [&str; 9] = [
    "microvascular_flow",
    "plet_variation",
    "optic_nerve_diameter",
    "bis_index",
    "spo2",
    "map_bp",
    "hb",
    "temperature",
    "emboli_count",
];

impl Default for PatientParameters {
    fn default() -> Self {
        Self {
            microvascular_flow: "25".into(),
            plet_variation: "15".into(),
            optic_nerve_diameter: "5.0".into(),
            bis_index: "45".into(),
            spo2: "98".into(),
            map_bp: "70".into(),
            hb: "10".into(),
            temperature: "36.5".into(),
            emboli_count: "0".into(),
        }
    }
}

impl PatientParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn from_values(
        microvascular_flow: f64,
        plet_variation: f64,
        optic_nerve_diameter: f64,
        bis_index: f64,
        spo2: f64,
        map_bp: f64,
        hb: f64,
        temperature: f64,
        emboli_count: f64,
    ) -> Self {
        Self {
            microvascular_flow: microvascular_flow.into(),
            plet_variation: plet_variation.into(),
            optic_nerve_diameter: optic_nerve_diameter.into(),
            bis_index: bis_index.into(),
            spo2: spo2.into(),
            map_bp: map_bp.into(),
            hb: hb.into(),
            temperature: temperature.into(),
            emboli_count: emboli_count.into(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Reading> {
        let reading = match field {
            "microvascular_flow" => &self.microvascular_flow,
            "plet_variation" => &self.plet_variation,
            "optic_nerve_diameter" => &self.optic_nerve_diameter,
            "bis_index" => &self.bis_index,
            "spo2" => &self.spo2,
            "map_bp" => &self.map_bp,
            "hb" => &self.hb,
            "temperature" => &self.temperature,
            "emboli_count" => &self.emboli_count,
            _ => return None,
        };
        Some(reading)
    }

    /// Replace one reading by its wire name. Returns false for an unknown field.
    pub fn set(&mut self, field: &str, value: impl Into<Reading>) -> bool {
        let slot = match field {
            "microvascular_flow" => &mut self.microvascular_flow,
            "plet_variation" => &mut self.plet_variation,
            "optic_nerve_diameter" => &mut self.optic_nerve_diameter,
            "bis_index" => &mut self.bis_index,
            "spo2" => &mut self.spo2,
            "map_bp" => &mut self.map_bp,
            "hb" => &mut self.hb,
            "temperature" => &mut self.temperature,
            "emboli_count" => &mut self.emboli_count,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_accept_numbers_and_text() {
        let json = r#"{
            "microvascular_flow": 25,
            "plet_variation": "15",
            "optic_nerve_diameter": "5.0",
            "bis_index": 45,
            "spo2": "98",
            "map_bp": 70,
            "hb": "10",
            "temperature": 36.5,
            "emboli_count": "0"
        }"#;
        let params: PatientParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.microvascular_flow, Reading::Number(25.0));
        assert_eq!(params.plet_variation, Reading::Text("15".into()));
        assert_eq!(params.optic_nerve_diameter.as_f64(), Some(5.0));
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"microvascular_flow": 25}"#;
        assert!(serde_json::from_str::<PatientParameters>(json).is_err());
    }

    #[test]
    fn text_is_forwarded_verbatim() {
        let params = PatientParameters::default();
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["optic_nerve_diameter"], "5.0");
        assert_eq!(value["temperature"], "36.5");
    }

    #[test]
    fn count_coercion() {
        assert_eq!(Reading::Number(2.9).as_count(), Some(2));
        assert_eq!(Reading::Text(" 3 ".into()).as_count(), Some(3));
        assert_eq!(Reading::Text("2.5".into()).as_count(), None);
        assert_eq!(Reading::Number(f64::NAN).as_count(), None);
        assert_eq!(Reading::Text("abc".into()).as_f64(), None);
    }

    #[test]
    fn set_by_wire_name() {
        let mut params = PatientParameters::default();
        assert!(params.set("spo2", "91"));
        assert_eq!(params.get("spo2"), Some(&Reading::Text("91".into())));
        assert!(!params.set("heart_rate", 80.0));
        assert!(PARAMETER_FIELDS.iter().all(|f| params.get(f).is_some()));
    }
}
