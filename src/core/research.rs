use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::models::{CaseSummary, OrsResult, PatientData, ResearchSnapshot};

/// Read-only store of de-identified research cases.
#[derive(Debug, Clone)]
pub struct ResearchStore {
    total_cases: u64,
    collaborators: Vec<String>,
    recent_cases: Vec<CaseSummary>,
}

impl Default for ResearchStore {
    fn default() -> Self {
        Self {
            total_cases: 150,
            collaborators: vec!["Mass Eye and Ear".into(), "Schepens Research".into()],
            recent_cases: vec![
                CaseSummary {
                    case_id: "CASE_001".into(),
                    ors_peak: 72.4,
                    outcome: "POVL_avoided".into(),
                    tags: vec!["emboli".into(), "hypotension".into()],
                },
                CaseSummary {
                    case_id: "CASE_002".into(),
                    ors_peak: 45.2,
                    outcome: "stable".into(),
                    tags: vec!["prolonged_prone".into()],
                },
            ],
        }
    }
}

impl ResearchStore {
    pub fn new(total_cases: u64, collaborators: Vec<String>, recent_cases: Vec<CaseSummary>) -> Self {
        Self {
            total_cases,
            collaborators,
            recent_cases,
        }
    }

    pub fn snapshot(&self) -> ResearchSnapshot {
        ResearchSnapshot {
            total_cases: self.total_cases,
            collaborators: self.collaborators.clone(),
            recent_cases: self.recent_cases.clone(),
        }
    }

    /// Emit the research record for one scored request.
    pub fn log_case(&self, data: &PatientData, result: &OrsResult) {
        info!(
            target: "research",
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            ors_score = result.ors_score,
            risk_level = %result.risk_level,
            plet_variation = data.plet_variation,
            microvascular_flow = data.microvascular_flow,
            optic_nerve_diameter = data.optic_nerve_diameter,
            conflicts_detected = result.conflicts.len(),
            "Research data"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_snapshot() {
        let snapshot = ResearchStore::default().snapshot();
        assert_eq!(snapshot.total_cases, 150);
        assert_eq!(snapshot.collaborators.len(), 2);
        assert_eq!(snapshot.recent_cases[0].case_id, "CASE_001");
        assert!(snapshot.recent_cases[0].povl_avoided());
        assert!(!snapshot.recent_cases[1].povl_avoided());
    }
}
