//! Plain-terminal rendering of the dashboard and research pages.

use std::fmt::Write;

use colored::{Color, Colorize};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};

use super::components::{
    humanize_type, outcome_style, risk_level_style, score_color_bucket, severity_style, Tone,
};
use super::dashboard::DashboardView;
use super::research::ResearchView;
use crate::models::{Component, OrsResult};

const BAR_WIDTH: usize = 20;

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Green => Color::Green,
        Tone::Amber => Color::Yellow,
        Tone::Red => Color::Red,
        Tone::Blue => Color::Blue,
        Tone::Gray => Color::BrightBlack,
    }
}

fn table_color(tone: Tone) -> comfy_table::Color {
    match tone {
        Tone::Green => comfy_table::Color::Green,
        Tone::Amber => comfy_table::Color::Yellow,
        Tone::Red => comfy_table::Color::Red,
        Tone::Blue => comfy_table::Color::Blue,
        Tone::Gray => comfy_table::Color::Grey,
    }
}

fn bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    if view.is_loading() {
        let _ = writeln!(out, "Calculating...");
        return out;
    }

    if let Some(error) = view.error() {
        let _ = writeln!(out, "{}", error.red().bold());
        if let Some(kind) = view.failure_kind() {
            let _ = writeln!(out, "  ({})", kind.describe());
        }
        let _ = writeln!(out);
    }

    match view.result() {
        Some(result) => render_result(&mut out, result),
        None => {
            let _ = writeln!(out, "{}", "No Data Yet".bold());
            let _ = writeln!(out, "Enter patient parameters to calculate Optic Risk Score");
        }
    }
    out
}

fn render_result(out: &mut String, result: &OrsResult) {
    let _ = write!(out, "{}", "Optic Risk Score".bold());
    if result.alert {
        let _ = write!(out, "  {}", "ALERT".red().bold());
    }
    let _ = writeln!(out);

    let score_tone = score_color_bucket(result.ors_score).tone();
    let level = format!("{} RISK", result.risk_level);
    let _ = writeln!(
        out,
        "  {}  {}",
        result.ors_score.to_string().color(tone_color(score_tone)).bold(),
        level.color(tone_color(risk_level_style(&result.risk_level)))
    );
    let _ = writeln!(out, "  CMRO2/DO2 Ratio: {}", result.cmro2_do2_ratio);
    let _ = writeln!(out, "  Last updated: {}", result.local_timestamp());

    if result.has_conflicts() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Conflict Detection".bold());
        for conflict in &result.conflicts {
            let color = tone_color(severity_style(&conflict.severity));
            let _ = writeln!(
                out,
                "  [{}] {}",
                conflict.severity.to_string().color(color),
                humanize_type(&conflict.conflict_type).bold()
            );
            let _ = writeln!(out, "    {}", conflict.message);
            let _ = writeln!(out, "    Clinical Suggestions:");
            for suggestion in &conflict.suggestions {
                let _ = writeln!(out, "      - {}", suggestion);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Component Score Breakdown".bold());
    for component in Component::ALL {
        let score = result.component_scores.get(component);
        let color = tone_color(score_color_bucket(score).tone());
        let _ = writeln!(
            out,
            "  {:<20} {:>3}%  {} /100  {}",
            component.label(),
            component.weight_percent(),
            format!("{:>5.1}", score).color(color),
            bar(score).color(color)
        );
    }
}

pub fn render_research(view: &ResearchView) -> String {
    let mut out = String::new();

    if view.is_loading() {
        let _ = writeln!(out, "Loading research data...");
        return out;
    }

    if let Some(failure) = view.failure() {
        let _ = writeln!(out, "{}", failure.message().red().bold());
        let _ = writeln!(out, "  {}", failure.detail);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", "Research Collaboration Portal".bold());
    let _ = writeln!(
        out,
        "  Total Cases: {}   Collaborators: {}   Recent Cases: {}",
        view.total_cases(),
        view.collaborator_count(),
        view.recent_case_count()
    );

    if !view.collaborators().is_empty() {
        let _ = writeln!(out, "  Research Collaborators: {}", view.collaborators().join(", "));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Case ID", "Peak ORS", "Outcome", "Tags"]);
    for case in view.recent_cases() {
        table.add_row(vec![
            Cell::new(&case.case_id),
            Cell::new(case.ors_peak),
            Cell::new(&case.outcome).fg(table_color(outcome_style(&case.outcome).tone())),
            Cell::new(case.tags.join(", ")),
        ]);
    }
    let _ = writeln!(out, "{}", table);
    out
}
