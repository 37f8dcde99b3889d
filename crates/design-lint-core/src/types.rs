//! Core types for audit findings and results.

use crate::score::{AuditScores, Score};
use serde::{Deserialize, Serialize};

/// Outcome of a single audit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The requirement is satisfied.
    Pass,
    /// Informational; never counted toward the score.
    Warning,
    /// The requirement is violated.
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warning => write!(f, "warning"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// One named, statused, human-readable finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditCheck {
    /// What was checked.
    pub check: String,
    /// Outcome.
    pub status: CheckStatus,
    /// Remediation guidance or explanation.
    pub suggestion: String,
    /// Owning page, for component checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
}

impl AuditCheck {
    /// Creates a new check.
    #[must_use]
    pub fn new(check: impl Into<String>, status: CheckStatus, suggestion: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status,
            suggestion: suggestion.into(),
            page_name: None,
        }
    }

    /// Creates a passing check.
    #[must_use]
    pub fn pass(check: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Pass, suggestion)
    }

    /// Creates a failing check.
    #[must_use]
    pub fn fail(check: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Fail, suggestion)
    }

    /// Creates a warning check.
    #[must_use]
    pub fn warning(check: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::Warning, suggestion)
    }

    /// Tags the check with the page it belongs to.
    #[must_use]
    pub fn on_page(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = Some(page_name.into());
        self
    }

    /// Returns true if this check failed.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

impl std::fmt::Display for AuditCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.check)?;
        if let Some(page) = &self.page_name {
            write!(f, " (page: {page})")?;
        }
        Ok(())
    }
}

/// Result of running an audit: one check list per scope plus scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Collection-structure checks.
    pub collection: Vec<AuditCheck>,
    /// Text-style synchronization and binding checks.
    pub text_style: Vec<AuditCheck>,
    /// One check per discovered component.
    pub component: Vec<AuditCheck>,
    /// Scores per scope and overall.
    pub scores: AuditScores,
}

impl AuditReport {
    /// Creates a report from the three check lists, computing scores.
    #[must_use]
    pub fn new(
        collection: Vec<AuditCheck>,
        text_style: Vec<AuditCheck>,
        component: Vec<AuditCheck>,
    ) -> Self {
        let all: Vec<&AuditCheck> = collection
            .iter()
            .chain(&text_style)
            .chain(&component)
            .collect();
        let scores = AuditScores {
            overall: Score::from_checks(all.iter().copied()),
            collection: Score::from_checks(&collection),
            text_style: Score::from_checks(&text_style),
            component: Score::from_checks(&component),
        };
        Self {
            collection,
            text_style,
            component,
            scores,
        }
    }

    /// Iterates over every check in reporting order.
    pub fn all_checks(&self) -> impl Iterator<Item = &AuditCheck> {
        self.collection
            .iter()
            .chain(&self.text_style)
            .chain(&self.component)
    }

    /// Returns true if any check failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.all_checks().any(AuditCheck::is_fail)
    }

    /// Counts checks by status as `(passed, warnings, failed)`.
    #[must_use]
    pub fn count_by_status(&self) -> (usize, usize, usize) {
        let count = |status| self.all_checks().filter(|c| c.status == status).count();
        (
            count(CheckStatus::Pass),
            count(CheckStatus::Warning),
            count(CheckStatus::Fail),
        )
    }
}
