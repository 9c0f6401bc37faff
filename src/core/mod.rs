//! Scoring core: reading coercion, the ORS engine, conflict detection and
//! the research case store.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{OrsResult, PatientParameters, ResearchSnapshot};

pub mod conflicts;
pub mod data;
pub mod research;
pub mod scoring;

pub use conflicts::ConflictEngine;
pub use research::ResearchStore;
pub use scoring::OrsCalculator;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid value for {field}: {value:?}")]
    InvalidReading { field: &'static str, value: String },

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// Everything the server needs to answer a scoring request.
#[derive(Debug, Clone, Default)]
pub struct ScoringService {
    calculator: OrsCalculator,
    conflicts: ConflictEngine,
    research: ResearchStore,
}

impl ScoringService {
    pub fn new(research: ResearchStore) -> Self {
        Self {
            calculator: OrsCalculator::new(),
            conflicts: ConflictEngine::new(),
            research,
        }
    }

    /// Coerce, score, attach conflicts and log the research record.
    pub fn evaluate(
        &self,
        params: &PatientParameters,
        timestamp: DateTime<Utc>,
    ) -> Result<OrsResult, ScoringError> {
        let data = data::process_parameters(params, timestamp)?;
        let mut result = self.calculator.calculate(&data)?;
        result.conflicts = self
            .conflicts
            .detect_conflicts(&data, &result.component_scores);
        self.research.log_case(&data, &result);
        Ok(result)
    }

    pub fn research_snapshot(&self) -> ResearchSnapshot {
        self.research.snapshot()
    }
}
