//! Subcommand implementations.

pub mod audit;
pub mod fetch;
pub mod init;
pub mod list_validators;
