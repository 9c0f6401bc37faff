use serde::{Deserialize, Serialize};

/// Outcome value that marks a case where vision loss was prevented.
pub const POVL_AVOIDED: &str = "POVL_avoided";

/// Response of `/api/research/cases`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResearchSnapshot {
    pub total_cases: u64,
    #[serde(default)]
    pub collaborators: Vec<String>,
    #[serde(default)]
    pub recent_cases: Vec<CaseSummary>,
}

/// De-identified case summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case_id: String,
    pub ors_peak: f64,
    pub outcome: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CaseSummary {
    pub fn povl_avoided(&self) -> bool {
        self.outcome == POVL_AVOIDED
    }
}
