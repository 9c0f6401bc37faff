//! Research portal state.

use tracing::{error, info};

use crate::client::{FailureKind, ScoringApi};
use crate::models::{CaseSummary, ResearchSnapshot};

/// Why the snapshot could not be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ResearchFailure {
    pub fn message(&self) -> &'static str {
        self.kind.describe()
    }
}

/// Starts out loading; counts read as zero until a snapshot arrives.
#[derive(Debug, Clone)]
pub struct ResearchView {
    snapshot: Option<ResearchSnapshot>,
    loading: bool,
    failure: Option<ResearchFailure>,
}

impl Default for ResearchView {
    fn default() -> Self {
        Self {
            snapshot: None,
            loading: true,
            failure: None,
        }
    }
}

impl ResearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A>(&mut self, api: &A)
    where
        A: ScoringApi + ?Sized,
    {
        self.loading = true;
        match api.research_cases().await {
            Ok(snapshot) => {
                info!(
                    total_cases = snapshot.total_cases,
                    recent = snapshot.recent_cases.len(),
                    "Research snapshot received"
                );
                self.snapshot = Some(snapshot);
                self.failure = None;
            }
            Err(e) => {
                error!(error = %e, "Error fetching research data");
                self.snapshot = None;
                self.failure = Some(ResearchFailure {
                    kind: e.kind(),
                    detail: e.to_string(),
                });
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn snapshot(&self) -> Option<&ResearchSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn failure(&self) -> Option<&ResearchFailure> {
        self.failure.as_ref()
    }

    pub fn total_cases(&self) -> u64 {
        self.snapshot.as_ref().map_or(0, |s| s.total_cases)
    }

    pub fn collaborator_count(&self) -> usize {
        self.collaborators().len()
    }

    pub fn recent_case_count(&self) -> usize {
        self.recent_cases().len()
    }

    pub fn collaborators(&self) -> &[String] {
        self.snapshot
            .as_ref()
            .map(|s| s.collaborators.as_slice())
            .unwrap_or(&[])
    }

    pub fn recent_cases(&self) -> &[CaseSummary] {
        self.snapshot
            .as_ref()
            .map(|s| s.recent_cases.as_slice())
            .unwrap_or(&[])
    }
}
