//! Data adapters producing a [`LintData`] snapshot.
//!
//! - [`snapshot`]: a `LintData` JSON file written by a plugin host or by
//!   `design-lint fetch`
//! - [`rest`]: the design tool's REST API

use anyhow::{bail, Result};
use design_lint_core::LintData;
use std::path::PathBuf;

pub mod rest;
pub mod snapshot;

use rest::RestClient;

/// Where the design data comes from.
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Design file key (REST adapter)
    #[arg(short = 'f', long, env = "FIGMA_FILE_KEY")]
    pub file_key: Option<String>,

    /// Personal access token (REST adapter)
    #[arg(short = 't', long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Read a LintData JSON snapshot instead of calling the API
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// REST API base URL
    #[arg(long, default_value = rest::DEFAULT_API_BASE)]
    pub api_base: String,
}

impl SourceArgs {
    /// Picks the adapter. A snapshot path takes priority over API credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if neither a snapshot nor both key and token are given.
    pub fn data_source(&self) -> Result<DataSource> {
        if let Some(path) = &self.snapshot {
            return Ok(DataSource::Snapshot(path.clone()));
        }
        match (&self.file_key, &self.token) {
            (Some(file_key), Some(token)) => Ok(DataSource::Rest {
                client: RestClient::new(&self.api_base, token),
                file_key: file_key.clone(),
            }),
            (Some(_), None) => bail!("--token (or FIGMA_ACCESS_TOKEN) is required with --file-key"),
            _ => bail!("provide --snapshot <path>, or --file-key and --token"),
        }
    }
}

/// A resolved data adapter.
#[derive(Debug)]
pub enum DataSource {
    /// JSON snapshot file.
    Snapshot(PathBuf),
    /// REST API.
    Rest {
        /// API client.
        client: RestClient,
        /// File key.
        file_key: String,
    },
}

impl DataSource {
    /// Loads the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or API cannot be read or parsed.
    pub async fn load(&self) -> Result<LintData> {
        match self {
            Self::Snapshot(path) => snapshot::load(path).await,
            Self::Rest { client, file_key } => client.fetch(file_key).await,
        }
    }
}
