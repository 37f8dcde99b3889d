//! Report rendering.

use anyhow::Result;
use design_lint_core::{AuditCheck, AuditReport, Score};

mod console;
mod html;

/// Output format for audit reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text with ANSI colors on a terminal.
    #[default]
    Console,
    /// Pretty-printed JSON of the full report.
    Json,
    /// Self-contained HTML page.
    Html,
}

/// Renders `report` in `format`. `color` only affects console output.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &AuditReport, format: ReportFormat, color: bool) -> Result<String> {
    Ok(match format {
        ReportFormat::Console => console::render(report, color),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
        ReportFormat::Html => html::render(report),
    })
}

/// The three titled check lists with their scores, in reporting order.
fn sections(report: &AuditReport) -> [(&'static str, &[AuditCheck], Score); 3] {
    [
        ("Collections", report.collection.as_slice(), report.scores.collection),
        ("Text styles", report.text_style.as_slice(), report.scores.text_style),
        ("Components", report.component.as_slice(), report.scores.component),
    ]
}
