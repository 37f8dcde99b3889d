//! Audit orchestration.
//!
//! The [`Auditor`] runs each enabled validator in scope, isolates validator
//! errors into synthetic checks, and assembles the scored [`AuditReport`].

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::LintData;
use crate::progress::ProgressSink;
use crate::schema::{default_schema, LoadError, Schema};
use crate::types::{AuditCheck, AuditReport};
use crate::validators::{builtin_validators, AuditContext, AuditScope, Validator, ValidatorBox};

/// Errors that can occur while building an [`Auditor`].
#[derive(Debug, Error)]
pub enum AuditorError {
    /// The built-in schema failed to load.
    #[error("default schema: {0}")]
    Schema(#[from] LoadError),

    /// Two validators share a name.
    #[error("duplicate validator name `{0}`")]
    DuplicateValidator(String),
}

/// Builder for configuring an [`Auditor`].
#[derive(Default)]
pub struct AuditorBuilder {
    config: Option<Config>,
    schema: Option<Schema>,
    validators: Vec<ValidatorBox>,
    scopes: Option<BTreeSet<AuditScope>>,
}

impl AuditorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the requirement schema (default: [`default_schema`]).
    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Adds a validator. Without any, the built-in validators are used.
    #[must_use]
    pub fn validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Restricts the audit to the given scopes (default: all).
    #[must_use]
    pub fn scopes(mut self, scopes: impl IntoIterator<Item = AuditScope>) -> Self {
        self.scopes = Some(scopes.into_iter().collect());
        self
    }

    /// Builds the auditor.
    ///
    /// # Errors
    ///
    /// Returns an error if the default schema cannot be loaded or two
    /// validators share a name.
    pub fn build(self) -> Result<Auditor, AuditorError> {
        let schema = match self.schema {
            Some(schema) => schema,
            None => default_schema()?,
        };

        let validators = if self.validators.is_empty() {
            builtin_validators()
        } else {
            self.validators
        };

        let mut names = BTreeSet::new();
        for validator in &validators {
            if !names.insert(validator.name()) {
                return Err(AuditorError::DuplicateValidator(validator.name().to_string()));
            }
        }

        Ok(Auditor {
            config: self.config.unwrap_or_default(),
            schema,
            validators,
            scopes: self
                .scopes
                .unwrap_or_else(|| AuditScope::ALL.into_iter().collect()),
        })
    }
}

/// Runs validators over a [`LintData`] snapshot.
///
/// Use [`Auditor::builder()`] to construct an instance.
pub struct Auditor {
    config: Config,
    schema: Schema,
    validators: Vec<ValidatorBox>,
    scopes: BTreeSet<AuditScope>,
}

impl Auditor {
    /// Creates a new builder for configuring an auditor.
    #[must_use]
    pub fn builder() -> AuditorBuilder {
        AuditorBuilder::new()
    }

    /// Returns the number of registered validators.
    #[must_use]
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Returns the scopes this auditor runs.
    #[must_use]
    pub fn scopes(&self) -> &BTreeSet<AuditScope> {
        &self.scopes
    }

    /// Audits `data` and returns the scored report.
    ///
    /// Never fails: a validator error becomes one check with the
    /// validator's [`Validator::failure_status`], and other validators
    /// still run. Scopes not selected come back as empty lists.
    pub fn audit(&self, data: &LintData, progress: &mut dyn ProgressSink) -> AuditReport {
        info!(
            "Starting audit: {} collection(s), {} variable(s), {} text style(s), {} page(s)",
            data.collections.len(),
            data.variables.len(),
            data.text_styles.len(),
            data.pages.len()
        );

        let ctx = AuditContext {
            data,
            config: &self.config,
            schema: &self.schema,
        };

        let mut collection = Vec::new();
        let mut text_style = Vec::new();
        let mut component = Vec::new();

        for validator in &self.validators {
            if !self.scopes.contains(&validator.scope()) {
                debug!("Skipping out-of-scope validator: {}", validator.name());
                continue;
            }
            if !self.config.is_validator_enabled(validator.name()) {
                debug!("Skipping disabled validator: {}", validator.name());
                continue;
            }

            let checks = run_validator(validator.as_ref(), &ctx, progress);
            match validator.scope() {
                AuditScope::Collection => collection.extend(checks),
                AuditScope::TextStyle => text_style.extend(checks),
                AuditScope::Component => component.extend(checks),
            }
        }

        let report = AuditReport::new(collection, text_style, component);
        let (passed, warnings, failed) = report.count_by_status();
        info!(
            "Audit complete: score {} ({passed} passed, {warnings} warning(s), {failed} failed)",
            report.scores.overall.score
        );
        report
    }
}

fn run_validator(
    validator: &dyn Validator,
    ctx: &AuditContext<'_>,
    progress: &mut dyn ProgressSink,
) -> Vec<AuditCheck> {
    debug!("Running validator {} ({})", validator.name(), validator.code());
    match validator.validate(ctx, progress) {
        Ok(checks) => checks,
        Err(e) => {
            warn!("Validator {} failed: {e}", validator.name());
            vec![AuditCheck::new(
                format!("{} ({})", validator.name(), validator.code()),
                validator.failure_status(),
                format!("Validation could not complete: {e}"),
            )]
        }
    }
}
