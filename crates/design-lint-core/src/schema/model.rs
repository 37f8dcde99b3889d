//! Pure domain model for the collection requirement schema.
//!
//! No serde, no I/O. Every regex is compiled once at construction, so the
//! validators never see an invalid pattern.

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

// ────────────────────────────────────────────
// Newtypes with validation
// ────────────────────────────────────────────

/// A compiled regex matched against collection names.
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    compiled: Regex,
}

impl NamePattern {
    /// Compiles a name pattern.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or not a valid regex.
    pub fn new(pattern: &str) -> Result<Self, ModelError> {
        if pattern.is_empty() {
            return Err(ModelError::EmptyPattern);
        }
        let compiled = Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests a collection name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.compiled.is_match(name)
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.raw)
    }
}

/// A naming pattern every conforming sub-category must satisfy.
#[derive(Debug, Clone)]
pub struct SubCategoryPattern {
    compiled: Regex,
    description: String,
    examples: Vec<String>,
}

impl SubCategoryPattern {
    /// Compiles a sub-category pattern.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or not a valid regex.
    pub fn new(
        pattern: &str,
        description: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<Self, ModelError> {
        if pattern.is_empty() {
            return Err(ModelError::EmptyPattern);
        }
        let compiled = Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            compiled,
            description: description.into(),
            examples,
        })
    }

    /// Tests a sub-category name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.compiled.is_match(name)
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.compiled.as_str()
    }

    /// Human description of the naming scheme.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Example conforming names.
    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}

// ────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────

/// How required sub-category names are looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The name must be present verbatim.
    #[default]
    Exact,
    /// Any actual sub-category containing the name satisfies it.
    Partial,
}

impl MatchMode {
    /// Returns true if `required` is satisfied by `actual`.
    #[must_use]
    pub fn is_satisfied(self, required: &str, actual: &BTreeSet<String>) -> bool {
        match self {
            Self::Exact => actual.contains(required),
            Self::Partial => actual.iter().any(|a| a.contains(required)),
        }
    }
}

/// One rule applied to a present category's sub-category set.
#[derive(Debug, Clone)]
pub enum SubCategoryRule {
    /// Required sub-category names.
    Members {
        /// Names that must be present.
        names: Vec<String>,
        /// Lookup mode.
        mode: MatchMode,
    },
    /// At least one sub-category must match the pattern.
    Pattern(SubCategoryPattern),
    /// The sub-category set must equal another category's set.
    Mirror {
        /// Name of the category to mirror.
        target: String,
    },
}

/// Requirement for one category of a collection.
#[derive(Debug, Clone)]
pub struct CategoryRequirement {
    name: String,
    rules: Vec<SubCategoryRule>,
}

impl CategoryRequirement {
    /// Creates a requirement that only demands the category exists.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Requires sub-category names with the given lookup mode.
    #[must_use]
    pub fn with_members<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
        mode: MatchMode,
    ) -> Self {
        self.rules.push(SubCategoryRule::Members {
            names: names.into_iter().map(Into::into).collect(),
            mode,
        });
        self
    }

    /// Requires a naming pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: SubCategoryPattern) -> Self {
        self.rules.push(SubCategoryRule::Pattern(pattern));
        self
    }

    /// Requires the sub-category set to mirror `target`.
    #[must_use]
    pub fn with_mirror(mut self, target: impl Into<String>) -> Self {
        self.rules.push(SubCategoryRule::Mirror {
            target: target.into(),
        });
        self
    }

    /// Category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sub-category rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[SubCategoryRule] {
        &self.rules
    }

    fn mirror_targets(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|r| match r {
            SubCategoryRule::Mirror { target } => Some(target.as_str()),
            _ => None,
        })
    }
}

/// Requirement for one collection, identified by a name pattern.
#[derive(Debug, Clone)]
pub struct CollectionRequirement {
    name: String,
    matcher: NamePattern,
    categories: Vec<CategoryRequirement>,
}

impl CollectionRequirement {
    /// Creates a collection requirement.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        matcher: NamePattern,
        categories: Vec<CategoryRequirement>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher,
            categories,
        }
    }

    /// Display name (e.g. "Theme").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern identifying the collection.
    #[must_use]
    pub fn matcher(&self) -> &NamePattern {
        &self.matcher
    }

    /// Required categories.
    #[must_use]
    pub fn categories(&self) -> &[CategoryRequirement] {
        &self.categories
    }
}

/// Structural-equivalence waiver for a missing Brand layer.
///
/// When Primitives and Theme exist, Brand does not, and at least
/// `threshold` of Theme's mode values alias Primitives directly, the Brand
/// requirement is reported as waived instead of missing.
#[derive(Debug, Clone)]
pub struct AliasWaiver {
    primitives: NamePattern,
    theme: NamePattern,
    brand: NamePattern,
    threshold: f64,
}

impl AliasWaiver {
    /// Creates a waiver.
    ///
    /// # Errors
    ///
    /// Returns error if `threshold` is outside `0.0..=1.0`.
    pub fn new(
        primitives: NamePattern,
        theme: NamePattern,
        brand: NamePattern,
        threshold: f64,
    ) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ModelError::ThresholdOutOfRange { value: threshold });
        }
        Ok(Self {
            primitives,
            theme,
            brand,
            threshold,
        })
    }

    /// Pattern for the Primitives collection.
    #[must_use]
    pub fn primitives(&self) -> &NamePattern {
        &self.primitives
    }

    /// Pattern for the Theme collection.
    #[must_use]
    pub fn theme(&self) -> &NamePattern {
        &self.theme
    }

    /// Pattern for the Brand collection.
    #[must_use]
    pub fn brand(&self) -> &NamePattern {
        &self.brand
    }

    /// Minimum alias fraction that waives Brand.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

// ────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────

/// Validated requirement schema.
#[derive(Debug, Clone)]
pub struct Schema {
    requirements: Vec<CollectionRequirement>,
    waiver: AliasWaiver,
}

impl Schema {
    /// Creates a schema, validating mirror cross-references.
    ///
    /// # Errors
    ///
    /// Returns every mirror target that names a category not required by
    /// the same collection, and every mirror pointing at itself.
    pub fn new(
        requirements: Vec<CollectionRequirement>,
        waiver: AliasWaiver,
    ) -> Result<Self, Vec<ModelError>> {
        let mut errors = Vec::new();

        for collection in &requirements {
            for category in &collection.categories {
                for target in category.mirror_targets() {
                    if target == category.name {
                        errors.push(ModelError::SelfMirror {
                            collection: collection.name.clone(),
                            category: category.name.clone(),
                        });
                    } else if !collection.categories.iter().any(|c| c.name == target) {
                        errors.push(ModelError::UnknownMirrorTarget {
                            collection: collection.name.clone(),
                            category: category.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(Self {
                requirements,
                waiver,
            })
        } else {
            Err(errors)
        }
    }

    /// Collection requirements in evaluation order.
    #[must_use]
    pub fn requirements(&self) -> &[CollectionRequirement] {
        &self.requirements
    }

    /// The Brand waiver.
    #[must_use]
    pub fn waiver(&self) -> &AliasWaiver {
        &self.waiver
    }
}

/// Errors from domain model construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Pattern is empty.
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// Pattern is not a valid regex.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Regex compile error.
        reason: String,
    },

    /// Waiver threshold outside `0.0..=1.0`.
    #[error("waiver threshold {value} must be between 0 and 1")]
    ThresholdOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// Mirror references a category the collection does not require.
    #[error("{collection}: category `{category}` mirrors unknown category `{target}`")]
    UnknownMirrorTarget {
        /// Collection requirement name.
        collection: String,
        /// Mirroring category.
        category: String,
        /// Missing target.
        target: String,
    },

    /// Mirror references its own category.
    #[error("{collection}: category `{category}` cannot mirror itself")]
    SelfMirror {
        /// Collection requirement name.
        collection: String,
        /// Offending category.
        category: String,
    },
}
