use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `/api/calculate-ors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrsResult {
    pub ors_score: f64,
    pub risk_level: RiskLevel,
    pub alert: bool,
    pub cmro2_do2_ratio: f64,
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub component_scores: ComponentScores,
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
}

impl OrsResult {
    /// Timestamp rendered in the viewer's local time zone.
    pub fn local_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Other(s) => s,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "LOW" => RiskLevel::Low,
            "MODERATE" => RiskLevel::Moderate,
            "HIGH" => RiskLevel::High,
            _ => RiskLevel::Other(value),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(value: &str) -> Self {
        RiskLevel::from(value.to_string())
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nine scoring axes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    MicrovascularFlow,
    PletVariation,
    EmboliCount,
    OpticNerveDiameter,
    BisIndex,
    Spo2,
    MapBp,
    Hb,
    Temperature,
}

impl Component {
    pub const ALL: [Component; 9] = [
        Component::MicrovascularFlow,
        Component::PletVariation,
        Component::EmboliCount,
        Component::OpticNerveDiameter,
        Component::BisIndex,
        Component::Spo2,
        Component::MapBp,
        Component::Hb,
        Component::Temperature,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Component::MicrovascularFlow => "microvascular_flow",
            Component::PletVariation => "plet_variation",
            Component::EmboliCount => "emboli_count",
            Component::OpticNerveDiameter => "optic_nerve_diameter",
            Component::BisIndex => "bis_index",
            Component::Spo2 => "spo2",
            Component::MapBp => "map_bp",
            Component::Hb => "hb",
            Component::Temperature => "temperature",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Component::MicrovascularFlow => "Microvascular Flow",
            Component::PletVariation => "PLETh Variation",
            Component::EmboliCount => "Emboli Count",
            Component::OpticNerveDiameter => "Optic Nerve Ø",
            Component::BisIndex => "BIS Index",
            Component::Spo2 => "SpO2",
            Component::MapBp => "MAP",
            Component::Hb => "Hemoglobin",
            Component::Temperature => "Temperature",
        }
    }

    /// Static contribution of this axis to the ORS, in percent.
    pub fn weight_percent(self) -> u32 {
        match self {
            Component::MicrovascularFlow => 20,
            Component::PletVariation => 16,
            Component::EmboliCount => 12,
            Component::OpticNerveDiameter => 12,
            Component::BisIndex => 11,
            Component::Spo2 => 9,
            Component::MapBp => 7,
            Component::Hb => 7,
            Component::Temperature => 6,
        }
    }

    pub fn weight(self) -> f64 {
        f64::from(self.weight_percent()) / 100.0
    }
}

/// Per-axis risk, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub microvascular_flow: f64,
    pub plet_variation: f64,
    pub emboli_count: f64,
    pub optic_nerve_diameter: f64,
    pub bis_index: f64,
    pub spo2: f64,
    pub map_bp: f64,
    pub hb: f64,
    pub temperature: f64,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::MicrovascularFlow => self.microvascular_flow,
            Component::PletVariation => self.plet_variation,
            Component::EmboliCount => self.emboli_count,
            Component::OpticNerveDiameter => self.optic_nerve_diameter,
            Component::BisIndex => self.bis_index,
            Component::Spo2 => self.spo2,
            Component::MapBp => self.map_bp,
            Component::Hb => self.hb,
            Component::Temperature => self.temperature,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Other(s) => s,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Other(value),
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Severity::from(value.to_string())
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub conflict_type: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// RFC 3339 on the way out; RFC 3339 or offset-less ISO-8601 (read as
/// UTC) on the way in.
pub mod iso_timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|e| format!("invalid timestamp {:?}: {}", raw, e))
    }
}
