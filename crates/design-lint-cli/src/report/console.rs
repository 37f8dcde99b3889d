//! Terminal output.

use std::fmt::Write;

use design_lint_core::{AuditReport, CheckStatus, Score};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Column where help lines start.
const HELP_INDENT: &str = "          ";

pub(super) fn render(report: &AuditReport, color: bool) -> String {
    let paint = |code: &str, text: &str| {
        if color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    };

    let mut out = String::new();
    for (title, checks, score) in super::sections(report) {
        if checks.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{title} ({})", summary(&score));

        for check in checks {
            let status = format!("{:<7}", check.status.to_string());
            let status = match check.status {
                CheckStatus::Pass => paint(GREEN, &status),
                CheckStatus::Warning => paint(YELLOW, &status),
                CheckStatus::Fail => paint(RED, &status),
            };
            let _ = write!(out, "  {status} {}", check.check);
            if let Some(page) = &check.page_name {
                let _ = write!(out, " (page: {page})");
            }
            out.push('\n');

            if check.status != CheckStatus::Pass && !check.suggestion.is_empty() {
                for (i, line) in check.suggestion.lines().enumerate() {
                    let prefix = if i == 0 { "= help: " } else { "  " };
                    let _ = writeln!(out, "{HELP_INDENT}{prefix}{}", line.trim_start());
                }
            }
        }
        out.push('\n');
    }

    let overall = &report.scores.overall;
    let summary_color = if overall.failed > 0 {
        RED
    } else if overall.warnings > 0 {
        YELLOW
    } else {
        GREEN
    };
    let _ = writeln!(
        out,
        "{}",
        paint(
            summary_color,
            &format!("Overall score {}: {}", overall.score, counts(overall))
        )
    );
    out
}

fn summary(score: &Score) -> String {
    format!("score {}: {}", score.score, counts(score))
}

fn counts(score: &Score) -> String {
    format!(
        "{} passed, {} warning(s), {} failed",
        score.passed, score.warnings, score.failed
    )
}
