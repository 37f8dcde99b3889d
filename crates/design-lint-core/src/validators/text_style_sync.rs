//! Font-family variable and text-style category synchronization.
//!
//! Every `font-family/<name>` variable in the Theme collection should have a
//! typography text-style category, and vice versa. Matching is substring
//! based in either direction, so `heading` pairs with `headings` and
//! `display` with `display-serif`.

use std::collections::BTreeSet;

use tracing::debug;

use super::{AuditContext, AuditScope, Validator};
use crate::categories::split_name;
use crate::error::AuditError;
use crate::progress::ProgressSink;
use crate::types::AuditCheck;

const FONT_FAMILY: &str = "font-family";

/// Both sides of the synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSets {
    /// Sub-names of `font-family/*` Theme variables.
    pub font_families: BTreeSet<String>,
    /// Text-style categories that look like typography.
    pub style_categories: BTreeSet<String>,
}

impl SyncSets {
    /// Font families with no matching style category.
    #[must_use]
    pub fn unmatched_families(&self) -> Vec<&str> {
        unmatched(&self.font_families, &self.style_categories)
    }

    /// Style categories with no matching font family.
    #[must_use]
    pub fn unmatched_categories(&self) -> Vec<&str> {
        unmatched(&self.style_categories, &self.font_families)
    }
}

fn pairs(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn unmatched<'a>(side: &'a BTreeSet<String>, other: &BTreeSet<String>) -> Vec<&'a str> {
    side.iter()
        .filter(|name| !other.iter().any(|o| pairs(name, o)))
        .map(String::as_str)
        .collect()
}

/// Collects both sides from the project.
///
/// # Errors
///
/// Returns [`AuditError::EmptyStyleName`] for a text style with no name
/// segment.
pub fn collect_sets(ctx: &AuditContext<'_>) -> Result<SyncSets, AuditError> {
    let mut sets = SyncSets::default();

    if let Some(theme) = ctx
        .data
        .find_collection(|n| ctx.schema.waiver().theme().matches(n))
    {
        for variable in ctx.data.variables_in(&theme.id) {
            if let Some((FONT_FAMILY, rest)) = split_name(&variable.name) {
                if let Some(family) = rest.first() {
                    sets.font_families.insert((*family).to_string());
                }
            }
        }
    }

    let allowlist = &ctx.config.audit.typography_categories;
    for (index, style) in ctx.data.text_styles.iter().enumerate() {
        let (category, _) = split_name(&style.name).ok_or(AuditError::EmptyStyleName { index })?;
        if allowlist.iter().any(|entry| category.contains(entry.as_str())) {
            sets.style_categories.insert(category.to_string());
        }
    }

    Ok(sets)
}

/// Checks that font-family variables and text-style categories pair up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStyleSync;

impl TextStyleSync {
    /// Validator name.
    pub const NAME: &'static str = "text-style-sync";
}

impl Validator for TextStyleSync {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        "DL002"
    }

    fn description(&self) -> &'static str {
        "Font-family variables and typography text-style categories correspond"
    }

    fn scope(&self) -> AuditScope {
        AuditScope::TextStyle
    }

    fn validate(
        &self,
        ctx: &AuditContext<'_>,
        _progress: &mut dyn ProgressSink,
    ) -> Result<Vec<AuditCheck>, AuditError> {
        let sets = collect_sets(ctx)?;
        debug!(
            families = sets.font_families.len(),
            categories = sets.style_categories.len(),
            "Collected typography sync sets"
        );

        match (sets.font_families.is_empty(), sets.style_categories.is_empty()) {
            (true, true) => {
                return Ok(vec![AuditCheck::warning(
                    "Typography sync",
                    "No font-family variables and no typography text styles found; add `font-family/<category>` variables and matching text styles",
                )]);
            }
            (true, false) => {
                return Ok(vec![AuditCheck::warning(
                    "Typography sync",
                    format!(
                        "No `{FONT_FAMILY}/*` variables in the Theme collection; text-style categories without one: {}",
                        join(sets.style_categories.iter().map(String::as_str))
                    ),
                )]);
            }
            (false, true) => {
                return Ok(vec![AuditCheck::warning(
                    "Typography sync",
                    format!(
                        "No typography text styles found; font families without styles: {}",
                        join(sets.font_families.iter().map(String::as_str))
                    ),
                )]);
            }
            (false, false) => {}
        }

        let existing_categories = join(sets.style_categories.iter().map(String::as_str));
        let mut checks: Vec<AuditCheck> = sets
            .unmatched_families()
            .into_iter()
            .map(|family| {
                AuditCheck::fail(
                    format!("Font family `{family}` text styles"),
                    format!(
                        "No text-style category matches `{FONT_FAMILY}/{family}`. Create styles named `{family}/...` or rename the variable (style categories: {existing_categories})"
                    ),
                )
            })
            .collect();

        checks.extend(sets.unmatched_categories().into_iter().map(|category| {
            AuditCheck::fail(
                format!("Text style category `{category}` font family"),
                format!("Add a Theme variable `{FONT_FAMILY}/{category}` and bind `{category}/*` styles to it"),
            )
        }));

        if checks.is_empty() {
            checks.push(AuditCheck::pass(
                "Typography sync",
                format!(
                    "{} font-family variable(s) match text-style categories",
                    sets.font_families.len()
                ),
            ));
        }
        Ok(checks)
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = names.collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}
