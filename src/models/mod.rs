//! Wire and domain types shared by the scoring server and its client.

pub mod parameters;
pub mod patient;
pub mod research;
pub mod result;

pub use parameters::{PatientParameters, Reading, PARAMETER_FIELDS};
pub use patient::PatientData;
pub use research::{CaseSummary, ResearchSnapshot, POVL_AVOIDED};
pub use result::{Component, ComponentScores, Conflict, OrsResult, RiskLevel, Severity};
