//! Pass/fail aggregation over check lists.

use crate::types::{AuditCheck, CheckStatus};
use serde::{Deserialize, Serialize};

/// Pass/fail statistics for one check list.
///
/// `total` counts only `pass` and `fail` checks; warnings are reported
/// but sit outside both numerator and denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// `round(100 * passed / total)`, or 100 when nothing was scored.
    pub score: u32,
    /// Passing checks.
    pub passed: usize,
    /// Warning checks.
    pub warnings: usize,
    /// Failing checks.
    pub failed: usize,
    /// `passed + failed`.
    pub total: usize,
}

impl Default for Score {
    fn default() -> Self {
        Self::from_counts(0, 0, 0)
    }
}

impl Score {
    /// Reduces a list of checks.
    #[must_use]
    pub fn from_checks<'a>(checks: impl IntoIterator<Item = &'a AuditCheck>) -> Self {
        let (mut passed, mut warnings, mut failed) = (0, 0, 0);
        for check in checks {
            match check.status {
                CheckStatus::Pass => passed += 1,
                CheckStatus::Warning => warnings += 1,
                CheckStatus::Fail => failed += 1,
            }
        }
        Self::from_counts(passed, warnings, failed)
    }

    /// Builds a score from raw counts.
    #[must_use]
    pub fn from_counts(passed: usize, warnings: usize, failed: usize) -> Self {
        let total = passed + failed;
        Self {
            score: percentage(passed, total),
            passed,
            warnings,
            failed,
            total,
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(passed: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (100.0 * passed as f64 / total as f64).round() as u32
}

/// Scores per audit scope plus the overall score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditScores {
    /// Score over every check.
    pub overall: Score,
    /// Collection-structure score.
    pub collection: Score,
    /// Text-style score (sync + bindings).
    pub text_style: Score,
    /// Component-binding score.
    pub component: Score,
}
