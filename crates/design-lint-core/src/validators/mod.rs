//! Validator trait and the built-in validators.
//!
//! Each validator reads the immutable [`LintData`] bundle and emits its own
//! list of [`AuditCheck`]s. Validators never depend on each other's output;
//! the [`Auditor`](crate::Auditor) composes them by concatenation.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AuditError;
use crate::model::LintData;
use crate::progress::ProgressSink;
use crate::schema::Schema;
use crate::types::{AuditCheck, CheckStatus};

pub mod collection;
pub mod component;
pub mod text_style_binding;
pub mod text_style_sync;
pub mod waiver;

pub use collection::CollectionStructure;
pub use component::ComponentBindings;
pub use text_style_binding::TypographyBindings;
pub use text_style_sync::TextStyleSync;

/// Which check list a validator contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditScope {
    /// Variable collection structure.
    Collection,
    /// Text-style sync and bindings.
    TextStyle,
    /// Component raw-value scan.
    Component,
}

impl AuditScope {
    /// Every scope.
    pub const ALL: [Self; 3] = [Self::Collection, Self::TextStyle, Self::Component];
}

impl std::fmt::Display for AuditScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::TextStyle => write!(f, "text-style"),
            Self::Component => write!(f, "component"),
        }
    }
}

/// Read-only inputs shared by every validator.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    /// The project snapshot.
    pub data: &'a LintData,
    /// Audit configuration.
    pub config: &'a Config,
    /// Requirement schema.
    pub schema: &'a Schema,
}

/// A validator over one aspect of the project.
///
/// # Example
///
/// ```ignore
/// use design_lint_core::{AuditCheck, AuditContext, AuditError, AuditScope, ProgressSink, Validator};
///
/// pub struct RequirePages;
///
/// impl Validator for RequirePages {
///     fn name(&self) -> &'static str { "require-pages" }
///     fn code(&self) -> &'static str { "DL100" }
///     fn scope(&self) -> AuditScope { AuditScope::Component }
///
///     fn validate(
///         &self,
///         ctx: &AuditContext<'_>,
///         _progress: &mut dyn ProgressSink,
///     ) -> Result<Vec<AuditCheck>, AuditError> {
///         Ok(vec![if ctx.data.pages.is_empty() {
///             AuditCheck::fail("Pages", "The file has no pages")
///         } else {
///             AuditCheck::pass("Pages", "")
///         }])
///     }
/// }
/// ```
pub trait Validator: Send + Sync {
    /// Returns the kebab-case name of this validator.
    fn name(&self) -> &'static str;

    /// Returns the validator code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this validator checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Check list this validator contributes to.
    fn scope(&self) -> AuditScope;

    /// Status of the synthetic check that replaces the output when
    /// [`Validator::validate`] returns an error.
    fn failure_status(&self) -> CheckStatus {
        CheckStatus::Fail
    }

    /// Validates the project and returns its checks.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditError`] when the input data is malformed.
    fn validate(
        &self,
        ctx: &AuditContext<'_>,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<AuditCheck>, AuditError>;
}

/// Type alias for boxed Validator trait objects.
pub type ValidatorBox = Box<dyn Validator>;

/// Returns the four built-in validators in reporting order.
#[must_use]
pub fn builtin_validators() -> Vec<ValidatorBox> {
    vec![
        Box::new(CollectionStructure),
        Box::new(TextStyleSync),
        Box::new(TypographyBindings),
        Box::new(ComponentBindings),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_codes_are_unique_and_ordered() {
        let validators = builtin_validators();
        let codes: Vec<&str> = validators.iter().map(|v| v.code()).collect();
        assert_eq!(codes, vec!["DL001", "DL002", "DL003", "DL004"]);
        let scopes: Vec<AuditScope> = validators.iter().map(|v| v.scope()).collect();
        assert_eq!(
            scopes,
            vec![
                AuditScope::Collection,
                AuditScope::TextStyle,
                AuditScope::TextStyle,
                AuditScope::Component
            ]
        );
    }

    #[test]
    fn only_component_scan_degrades_to_warning() {
        for validator in builtin_validators() {
            let expected = if validator.scope() == AuditScope::Component {
                CheckStatus::Warning
            } else {
                CheckStatus::Fail
            };
            assert_eq!(validator.failure_status(), expected, "{}", validator.name());
        }
    }
}
