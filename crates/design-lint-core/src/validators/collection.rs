//! Collection structure validation.
//!
//! For each required collection: locate it by name pattern, infer its
//! category map from variable names, then evaluate every category rule
//! against that map. A missing Brand collection may be waived by the alias
//! assessment in [`super::waiver`].

use std::collections::BTreeSet;

use tracing::debug;

use super::waiver::{self, WaiverAssessment};
use super::{AuditContext, AuditScope, Validator};
use crate::categories::{extract_categories, CategoryMap};
use crate::error::AuditError;
use crate::model::{LintData, VariableCollection};
use crate::progress::ProgressSink;
use crate::schema::{CategoryRequirement, CollectionRequirement, MatchMode, SubCategoryRule};
use crate::types::AuditCheck;

/// Examples listed in a failing naming-pattern message.
const MAX_LISTED_NAMES: usize = 5;

// ────────────────────────────────────────────
// Evaluation
// ────────────────────────────────────────────

/// Result of one sub-category rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Required names and the ones not found.
    Members {
        /// Required names.
        required: Vec<String>,
        /// Required names with no satisfying sub-category.
        missing: Vec<String>,
        /// Lookup mode.
        mode: MatchMode,
    },
    /// Naming-pattern conformance.
    Pattern {
        /// Pattern source.
        pattern: String,
        /// Human description of the pattern.
        description: String,
        /// Example conforming names.
        examples: Vec<String>,
        /// Sub-categories matching the pattern.
        matched: Vec<String>,
        /// Sub-categories not matching the pattern.
        unmatched: Vec<String>,
    },
    /// Mirror comparison against another category.
    Mirror {
        /// Mirrored category name.
        target: String,
        /// Whether the target category exists.
        target_found: bool,
        /// In the target but not here.
        missing: Vec<String>,
        /// Here but not in the target.
        extra: Vec<String>,
    },
}

impl RuleOutcome {
    /// Returns true if the rule is satisfied.
    #[must_use]
    pub fn passed(&self) -> bool {
        match self {
            Self::Members { missing, .. } => missing.is_empty(),
            Self::Pattern { matched, .. } => !matched.is_empty(),
            Self::Mirror {
                target_found,
                missing,
                extra,
                ..
            } => *target_found && missing.is_empty() && extra.is_empty(),
        }
    }
}

/// Evaluates one rule against a category's sub-categories.
#[must_use]
pub fn evaluate_rule(rule: &SubCategoryRule, actual: &BTreeSet<String>, map: &CategoryMap) -> RuleOutcome {
    match rule {
        SubCategoryRule::Members { names, mode } => RuleOutcome::Members {
            required: names.clone(),
            missing: names
                .iter()
                .filter(|name| !mode.is_satisfied(name, actual))
                .cloned()
                .collect(),
            mode: *mode,
        },
        SubCategoryRule::Pattern(pattern) => {
            let (matched, unmatched) = actual
                .iter()
                .cloned()
                .partition(|name: &String| pattern.matches(name));
            RuleOutcome::Pattern {
                pattern: pattern.as_str().to_string(),
                description: pattern.description().to_string(),
                examples: pattern.examples().to_vec(),
                matched,
                unmatched,
            }
        }
        SubCategoryRule::Mirror { target } => match map.get(target) {
            Some(expected) => RuleOutcome::Mirror {
                target: target.clone(),
                target_found: true,
                missing: expected.difference(actual).cloned().collect(),
                extra: actual.difference(expected).cloned().collect(),
            },
            None => RuleOutcome::Mirror {
                target: target.clone(),
                target_found: false,
                missing: Vec::new(),
                extra: Vec::new(),
            },
        },
    }
}

/// Evaluation of one required category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// Category name.
    pub name: String,
    /// Whether the category exists in the collection.
    pub found: bool,
    /// Rule outcomes, empty when the category is missing.
    pub outcomes: Vec<RuleOutcome>,
}

impl CategoryReport {
    /// Returns true if the category exists and every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.found && self.outcomes.iter().all(RuleOutcome::passed)
    }
}

/// Evaluates one required category against a category map.
#[must_use]
pub fn evaluate_category(requirement: &CategoryRequirement, map: &CategoryMap) -> CategoryReport {
    let Some(actual) = map.get(requirement.name()) else {
        return CategoryReport {
            name: requirement.name().to_string(),
            found: false,
            outcomes: Vec::new(),
        };
    };
    CategoryReport {
        name: requirement.name().to_string(),
        found: true,
        outcomes: requirement
            .rules()
            .iter()
            .map(|rule| evaluate_rule(rule, actual, map))
            .collect(),
    }
}

/// Evaluation of one located collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    /// Requirement name ("Theme").
    pub requirement: String,
    /// Actual collection name ("Theme (v2)").
    pub collection: String,
    /// Categories found in the collection.
    pub categories: CategoryMap,
    /// Per required category.
    pub reports: Vec<CategoryReport>,
}

impl CollectionReport {
    /// Returns true if every required category is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reports.iter().all(CategoryReport::is_valid)
    }
}

/// Evaluates a located collection against its requirement.
///
/// # Errors
///
/// Returns [`AuditError::EmptyVariableName`] for a member variable with an
/// empty name.
pub fn evaluate_collection(
    requirement: &CollectionRequirement,
    collection: &VariableCollection,
    data: &LintData,
) -> Result<CollectionReport, AuditError> {
    let categories = extract_categories(data.variables_in(&collection.id))?;
    let reports = requirement
        .categories()
        .iter()
        .map(|category| evaluate_category(category, &categories))
        .collect();
    Ok(CollectionReport {
        requirement: requirement.name().to_string(),
        collection: collection.name.clone(),
        categories,
        reports,
    })
}

// ────────────────────────────────────────────
// Checks
// ────────────────────────────────────────────

/// Renders a collection report as checks.
///
/// Order: one check per category outcome, then the aggregate
/// "collection structure" check.
#[must_use]
pub fn collection_checks(report: &CollectionReport) -> Vec<AuditCheck> {
    let req = &report.requirement;
    let mut checks = Vec::new();

    for category in &report.reports {
        if !category.found {
            let existing = join_or_none(report.categories.keys());
            checks.push(AuditCheck::fail(
                format!("{req}: {} category", category.name),
                format!(
                    "Add variables named `{}/...` to the \"{}\" collection (existing categories: {existing})",
                    category.name, report.collection
                ),
            ));
            continue;
        }
        if category.outcomes.is_empty() {
            checks.push(AuditCheck::pass(
                format!("{req}: {} category", category.name),
                "",
            ));
        }
        for outcome in &category.outcomes {
            checks.extend(outcome_checks(req, &category.name, outcome));
        }
    }

    let check = format!("{req} collection structure");
    if report.is_valid() {
        checks.push(AuditCheck::pass(
            check,
            format!("\"{}\" has every required category", report.collection),
        ));
    } else {
        let invalid: Vec<&str> = report
            .reports
            .iter()
            .filter(|c| !c.is_valid())
            .map(|c| c.name.as_str())
            .collect();
        checks.push(AuditCheck::fail(
            check,
            format!(
                "\"{}\" has problems in: {}",
                report.collection,
                invalid.join(", ")
            ),
        ));
    }
    checks
}

/// One check per outcome, except a failing mirror which reports each
/// direction separately.
fn outcome_checks(req: &str, category: &str, outcome: &RuleOutcome) -> Vec<AuditCheck> {
    let check = match outcome {
        RuleOutcome::Members {
            required,
            missing,
            mode,
        } => {
            let check = format!("{req}: {category} sub-categories");
            if missing.is_empty() {
                AuditCheck::pass(check, format!("Found {}", required.join(", ")))
            } else {
                let how = match mode {
                    MatchMode::Exact => "",
                    MatchMode::Partial => " (any sub-category containing the name counts)",
                };
                AuditCheck::fail(
                    check,
                    format!(
                        "Missing sub-categories: {}. Add variables such as `{category}/{}/...`{how}",
                        missing.join(", "),
                        missing[0]
                    ),
                )
            }
        }
        RuleOutcome::Pattern {
            pattern,
            description,
            examples,
            matched,
            unmatched,
        } => {
            let check = format!("{req}: {category} naming pattern");
            if matched.is_empty() {
                let wanted = if description.is_empty() {
                    format!("/{pattern}/")
                } else {
                    description.clone()
                };
                let mut suggestion = format!("No sub-category follows {wanted}");
                if !examples.is_empty() {
                    suggestion.push_str(&format!(" (e.g. {})", examples.join(", ")));
                }
                if !unmatched.is_empty() {
                    suggestion.push_str(&format!(
                        "; found {}",
                        truncated(unmatched.iter(), MAX_LISTED_NAMES)
                    ));
                }
                AuditCheck::fail(check, suggestion)
            } else if unmatched.is_empty() {
                AuditCheck::pass(check, format!("{} sub-categories conform", matched.len()))
            } else {
                AuditCheck::pass(
                    check,
                    format!(
                        "{} conform; non-conforming names tolerated: {}",
                        matched.len(),
                        truncated(unmatched.iter(), MAX_LISTED_NAMES)
                    ),
                )
            }
        }
        RuleOutcome::Mirror {
            target,
            target_found,
            missing,
            extra,
        } => {
            let check = format!("{req}: {category} mirrors {target}");
            if !target_found {
                return vec![AuditCheck::fail(
                    check,
                    format!("Category `{target}` does not exist, so `{category}` has nothing to mirror"),
                )];
            }
            if missing.is_empty() && extra.is_empty() {
                return vec![AuditCheck::pass(
                    check,
                    format!("`{category}` and `{target}` share every size"),
                )];
            }
            let mut checks = Vec::new();
            if !missing.is_empty() {
                checks.push(AuditCheck::fail(
                    format!("{check} (missing sizes)"),
                    format!("Add `{category}/{{{}}}` to match {target}", missing.join(",")),
                ));
            }
            if !extra.is_empty() {
                checks.push(AuditCheck::fail(
                    format!("{check} (extra sizes)"),
                    format!(
                        "Remove `{category}/{{{}}}` or add them to {target}",
                        extra.join(",")
                    ),
                ));
            }
            return checks;
        }
    };
    vec![check]
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = names.map(String::as_str).collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}

fn truncated<'a>(names: impl ExactSizeIterator<Item = &'a String>, limit: usize) -> String {
    let len = names.len();
    let shown: Vec<&str> = names.take(limit).map(String::as_str).collect();
    if len > limit {
        format!("{} (+{} more)", shown.join(", "), len - limit)
    } else {
        shown.join(", ")
    }
}

// ────────────────────────────────────────────
// Validator
// ────────────────────────────────────────────

/// Validates required collections and their categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionStructure;

impl CollectionStructure {
    /// Validator name.
    pub const NAME: &'static str = "collection-structure";

    fn missing_collection(
        requirement: &CollectionRequirement,
        waiver: Option<&WaiverAssessment>,
    ) -> AuditCheck {
        let check = format!("{} collection", requirement.name());
        match waiver {
            Some(assessment) if assessment.is_waived() => AuditCheck::pass(
                check,
                format!(
                    "Waived: {}, so Theme already plays the {} role",
                    assessment.describe(),
                    requirement.name()
                ),
            ),
            Some(assessment) => AuditCheck::fail(
                check,
                format!(
                    "Create a collection matching {} ({})",
                    requirement.matcher(),
                    assessment.describe()
                ),
            ),
            None => AuditCheck::fail(
                check,
                format!("Create a collection matching {}", requirement.matcher()),
            ),
        }
    }
}

impl Validator for CollectionStructure {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        "DL001"
    }

    fn description(&self) -> &'static str {
        "Required variable collections, categories and sub-category naming"
    }

    fn scope(&self) -> AuditScope {
        AuditScope::Collection
    }

    fn validate(
        &self,
        ctx: &AuditContext<'_>,
        _progress: &mut dyn ProgressSink,
    ) -> Result<Vec<AuditCheck>, AuditError> {
        let data = ctx.data;
        let waiver_patterns = ctx.schema.waiver();
        let assessment = waiver::assess(data, waiver_patterns);
        let mut checks = Vec::new();

        if ctx.config.audit.report_orphaned_variables {
            let orphaned = data.orphaned_variables();
            if !orphaned.is_empty() {
                let names: Vec<&String> = orphaned.iter().map(|v| &v.name).collect();
                checks.push(AuditCheck::warning(
                    "Orphaned variables",
                    format!(
                        "{} variable(s) reference a collection that does not exist and were skipped: {}",
                        orphaned.len(),
                        truncated(names.into_iter(), MAX_LISTED_NAMES)
                    ),
                ));
            }
        }

        for requirement in ctx.schema.requirements() {
            match data.find_collection(|name| requirement.matcher().matches(name)) {
                Some(collection) => {
                    let report = evaluate_collection(requirement, collection, data)?;
                    debug!(
                        requirement = requirement.name(),
                        collection = %collection.name,
                        valid = report.is_valid(),
                        "Evaluated collection"
                    );
                    checks.extend(collection_checks(&report));
                }
                None => {
                    let waiver = assessment
                        .as_ref()
                        .filter(|_| waiver_patterns.brand().matches(requirement.name()));
                    debug!(requirement = requirement.name(), "Collection not found");
                    checks.push(Self::missing_collection(requirement, waiver));
                }
            }
        }

        Ok(checks)
    }
}
