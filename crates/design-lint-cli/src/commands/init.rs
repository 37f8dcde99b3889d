//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# design-lint configuration
# Every value below is a built-in default; delete what you do not change.

[audit]
# Text-style categories treated as typography (substring match)
typography-categories = ["display", "heading", "body", "label", "caption", "title", "subtitle", "overline"]

# Nodes visited between cooperative yields while discovering components
yield-every-nodes = 50

# Components validated between progress messages
progress-every-components = 10

# Warn about variables whose collection no longer exists
report-orphaned-variables = true

# A Brand collection may be skipped when enough Theme values alias
# Primitives directly.
[waiver]
primitives = "(?i)primitive"
theme = "(?i)theme"
brand = "(?i)brand"
threshold = 0.10

[[collections]]
name = "Primitives"
pattern = "(?i)primitive"

[[collections.categories]]
name = "colors"

[[collections]]
name = "Brand"
pattern = "(?i)brand"

[[collections.categories]]
name = "colors"
sub-categories = ["primary"]
sub-category-partial-match = true

[[collections]]
name = "Theme"
pattern = "(?i)theme"

[[collections.categories]]
name = "colors"
sub-categories = ["bg", "text", "border"]

[[collections.categories]]
name = "font-family"

[[collections.categories]]
name = "font-size"
sub-category-pattern = { pattern = '^(\d+)?(x+)?(xs|sm|md|lg|xl)$', description = "t-shirt sizes (xs, sm, md, lg, xl, 2xl)", examples = ["sm", "md", "lg", "2xl"] }

[[collections.categories]]
name = "line-height"
mirror-category = "font-size"

[[collections.categories]]
name = "letter-spacing"

# Validators can be switched off individually
[validators.component-bindings]
enabled = true
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    run_in(&cwd, force)?;

    println!("Created design-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit design-lint.toml to describe your token architecture");
    println!("  2. Run: design-lint audit --file-key <KEY>");
    Ok(())
}

/// Writes the starter configuration into `dir`.
pub fn run_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join("design-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_lint_core::{load_schema_from_toml, Config};
    use tempfile::TempDir;

    #[test]
    fn template_parses_as_config_and_schema() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.audit.yield_every_nodes, 50);
        assert!(config.is_validator_enabled("component-bindings"));

        let schema = load_schema_from_toml(DEFAULT_CONFIG).unwrap();
        let names: Vec<&str> = schema.requirements().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Primitives", "Brand", "Theme"]);
        assert_eq!(schema.requirements()[2].categories().len(), 5);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("design-lint.toml"), "# mine\n").unwrap();

        assert!(run_in(tmp.path(), false).is_err());
        let kept = std::fs::read_to_string(tmp.path().join("design-lint.toml")).unwrap();
        assert_eq!(kept, "# mine\n");

        run_in(tmp.path(), true).unwrap();
        let written = std::fs::read_to_string(tmp.path().join("design-lint.toml")).unwrap();
        assert!(written.starts_with("# design-lint configuration"));
    }
}
