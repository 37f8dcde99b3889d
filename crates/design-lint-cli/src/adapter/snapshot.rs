//! JSON snapshot adapter.

use anyhow::{Context, Result};
use design_lint_core::LintData;
use std::path::Path;

/// Parses a `LintData` JSON document.
///
/// # Errors
///
/// Returns an error if the JSON does not match the snapshot shape.
pub fn parse(content: &str) -> Result<LintData> {
    serde_json::from_str(content).context("snapshot is not a valid LintData document")
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load(path: &Path) -> Result<LintData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let data = parse(&content).with_context(|| format!("in {}", path.display()))?;
    tracing::info!(
        "Loaded snapshot {}: {} variable(s), {} page(s)",
        path.display(),
        data.variables.len(),
        data.pages.len()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_a_snapshot_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{"collections": [{"id": "c1", "name": "Theme"}], "pages": [{"name": "Page 1"}]}"#,
        )
        .unwrap();

        let data = load(&path).await.unwrap();
        assert_eq!(data.collections[0].name, "Theme");
        assert_eq!(data.pages.len(), 1);
        assert!(data.variables.is_empty());
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = load(Path::new("/nonexistent/snapshot.json")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse(r#"{"variables": [{"id": 1}]}"#).is_err());
    }
}
