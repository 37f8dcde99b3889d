//! Fetch command: saves API data as a reusable snapshot.

use std::path::Path;

use anyhow::{Context, Result};

use crate::adapter::SourceArgs;

/// Runs the fetch command.
pub async fn run(source: &SourceArgs, output: Option<&Path>) -> Result<()> {
    let data = source.data_source()?.load().await?;
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            println!("Saved snapshot to {}", path.display());
            println!("\nNext step:");
            println!("  design-lint audit --snapshot {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
