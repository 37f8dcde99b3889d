//! Declarative collection requirements driven by TOML configuration.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! Schema (pure domain model)
//!   ↓ CollectionStructure validator
//! Vec<AuditCheck>
//! ```

pub mod config_dto;
pub mod defaults;
pub mod loader;
pub mod model;

pub use defaults::default_requirements;
pub use loader::LoadError;
pub use model::{
    AliasWaiver, CategoryRequirement, CollectionRequirement, MatchMode, ModelError, NamePattern,
    Schema, SubCategoryPattern, SubCategoryRule,
};

/// Errors from parsing TOML and loading the requirement schema.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadSchemaError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Domain model validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] loader::LoadError),
}

/// Parses TOML content into a validated [`Schema`].
///
/// Content without `[[collections]]` yields the built-in requirements.
///
/// # Errors
///
/// Returns an error if TOML parsing or model validation fails.
pub fn load_schema_from_toml(content: &str) -> Result<Schema, LoadSchemaError> {
    let dto: config_dto::SchemaDto = toml::from_str(content)?;
    Ok(loader::load(dto)?)
}

/// Returns the built-in schema with the default waiver.
///
/// # Errors
///
/// Only fails if the built-in constants are inconsistent.
pub fn default_schema() -> Result<Schema, loader::LoadError> {
    loader::load(config_dto::SchemaDto::default())
}
