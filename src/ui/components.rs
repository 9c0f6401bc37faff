//! Display rules applied to fetched results.
//!
//! These are pure lookups. Thresholds and fallbacks must stay exactly as
//! written: score < 30 is green, 30 up to (not including) 60 is amber,
//! 60 and above is red.

use crate::models::{RiskLevel, Severity, POVL_AVOIDED};

const AMBER_FROM: f64 = 30.0;
const RED_FROM: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBucket {
    Green,
    Amber,
    Red,
}

impl ScoreBucket {
    pub fn hex(self) -> &'static str {
        match self {
            ScoreBucket::Green => "#10b981",
            ScoreBucket::Amber => "#f59e0b",
            ScoreBucket::Red => "#ef4444",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            ScoreBucket::Green => Tone::Green,
            ScoreBucket::Amber => Tone::Amber,
            ScoreBucket::Red => Tone::Red,
        }
    }
}

/// Colour family used for badges and panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Green,
    Amber,
    Red,
    Blue,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStyle {
    Success,
    Info,
}

impl OutcomeStyle {
    pub fn tone(self) -> Tone {
        match self {
            OutcomeStyle::Success => Tone::Green,
            OutcomeStyle::Info => Tone::Blue,
        }
    }
}

/// Used for the ORS and for every component score. NaN lands in red.
pub fn score_color_bucket(score: f64) -> ScoreBucket {
    if score < AMBER_FROM {
        ScoreBucket::Green
    } else if score < RED_FROM {
        ScoreBucket::Amber
    } else {
        ScoreBucket::Red
    }
}

pub fn risk_level_style(level: &RiskLevel) -> Tone {
    match level {
        RiskLevel::Low => Tone::Green,
        RiskLevel::Moderate => Tone::Amber,
        RiskLevel::High => Tone::Red,
        RiskLevel::Other(_) => Tone::Gray,
    }
}

pub fn severity_style(severity: &Severity) -> Tone {
    match severity {
        Severity::High => Tone::Red,
        Severity::Medium => Tone::Amber,
        Severity::Low => Tone::Blue,
        Severity::Other(_) => Tone::Gray,
    }
}

/// Visual rank, HIGH first. Lists are not re-sorted by it.
pub fn severity_rank(severity: &Severity) -> u8 {
    match severity {
        Severity::High => 3,
        Severity::Medium => 2,
        Severity::Low => 1,
        Severity::Other(_) => 0,
    }
}

/// `NEUROVASCULAR_DECOUPLING` -> `NEUROVASCULAR DECOUPLING`.
pub fn humanize_type(conflict_type: &str) -> String {
    conflict_type.replace('_', " ")
}

pub fn outcome_style(outcome: &str) -> OutcomeStyle {
    if outcome == POVL_AVOIDED {
        OutcomeStyle::Success
    } else {
        OutcomeStyle::Info
    }
}
