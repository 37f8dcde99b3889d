//! # design-lint-core
//!
//! Platform-agnostic audit core for design-token compliance.
//!
//! Given a [`LintData`] snapshot of a design file (variable collections,
//! variables, text styles and component trees), the core reports whether
//! the file follows a layered token scheme:
//!
//! - [`validators::CollectionStructure`] checks required collections and categories
//! - [`validators::TextStyleSync`] pairs font-family variables with text-style categories
//! - [`validators::TypographyBindings`] checks text-style variable bindings
//! - [`validators::ComponentBindings`] scans components for hard-coded values
//!
//! The [`Auditor`] composes them into a scored [`AuditReport`].
//!
//! ## Example
//!
//! ```ignore
//! use design_lint_core::{Auditor, Config, LintData, NoProgress};
//!
//! let data: LintData = serde_json::from_str(&snapshot)?;
//! let auditor = Auditor::builder()
//!     .config(Config::from_file("design-lint.toml".as_ref())?)
//!     .build()?;
//!
//! let report = auditor.audit(&data, &mut NoProgress);
//! println!("score: {}", report.scores.overall.score);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auditor;
mod config;
mod error;
mod model;
mod progress;
mod score;
mod types;

pub mod categories;
pub mod scan;
pub mod schema;
pub mod validators;

pub use auditor::{Auditor, AuditorBuilder, AuditorError};
pub use config::{AuditSettings, Config, ConfigError, ValidatorConfig, DEFAULT_TYPOGRAPHY_CATEGORIES};
pub use error::AuditError;
pub use model::{
    is_bound, node_type, ComponentNode, Dimension, Effect, LintData, NodeBindings, Page, Paint,
    Rgba, TextStyle, TextStyleBindings, TypographyProperty, Variable, VariableCollection,
    VariableRef, VariableValue, VARIABLE_ALIAS,
};
pub use progress::{NoProgress, ProgressSink};
pub use schema::{load_schema_from_toml, LoadSchemaError, Schema};
pub use score::{AuditScores, Score};
pub use types::{AuditCheck, AuditReport, CheckStatus};
pub use validators::{AuditContext, AuditScope, Validator, ValidatorBox};
