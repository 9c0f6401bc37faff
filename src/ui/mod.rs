//! View state and rendering for the monitoring dashboard and the research
//! portal.

pub mod components;
pub mod dashboard;
pub mod research;
pub mod terminal;

pub use dashboard::DashboardView;
pub use research::ResearchView;
