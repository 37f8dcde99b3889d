//! Audit command implementation.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use design_lint_core::schema::default_schema;
use design_lint_core::{
    load_schema_from_toml, AuditReport, AuditScope, Auditor, Config, LintData, ProgressSink,
    Schema,
};
use tokio::sync::mpsc;

use crate::adapter::SourceArgs;
use crate::config_resolver::{self, ConfigSource};
use crate::report::{self, ReportFormat};

/// Which part of the design system to audit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AuditType {
    /// Collections, text styles and components.
    #[default]
    System,
    /// Collections and text styles only.
    VariablesStyles,
    /// Components only.
    Components,
}

impl AuditType {
    /// Validator scopes selected by this audit type.
    #[must_use]
    pub fn scopes(self) -> Vec<AuditScope> {
        match self {
            Self::System => AuditScope::ALL.to_vec(),
            Self::VariablesStyles => vec![AuditScope::Collection, AuditScope::TextStyle],
            Self::Components => vec![AuditScope::Component],
        }
    }
}

/// Arguments of `design-lint audit`.
#[derive(Debug, clap::Args)]
pub struct AuditArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "console")]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to audit
    #[arg(long, value_enum, default_value = "system")]
    audit_type: AuditType,
}

/// Runs the audit command.
///
/// Exits the process with status 2 when any check failed.
pub async fn run(args: AuditArgs, explicit_config: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let (config, schema) = load_settings(&config_resolver::resolve(&cwd, explicit_config))?;

    let data = args.source.data_source()?.load().await?;

    let auditor = Auditor::builder()
        .config(config)
        .schema(schema)
        .scopes(args.audit_type.scopes())
        .build()
        .context("Failed to build auditor")?;
    tracing::info!(
        "Running {:?} audit with {} validator(s)",
        args.audit_type,
        auditor.validator_count()
    );

    let report = run_on_worker(auditor, data).await?;

    let color = args.output.is_none() && std::io::stdout().is_terminal();
    let rendered = report::render(&report, args.format, color)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Wrote report to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    if report.has_failures() {
        std::process::exit(2);
    }
    Ok(())
}

/// Loads configuration and schema from the resolved source.
///
/// # Errors
///
/// Returns a rendered diagnostic if the file cannot be read or is invalid.
pub fn load_settings(source: &ConfigSource) -> Result<(Config, Schema)> {
    let Some(path) = source.path() else {
        tracing::debug!("No config file found, using built-in defaults");
        return Ok((Config::default(), default_schema().map_err(diagnostic)?));
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    let config = Config::parse(&content)
        .map_err(diagnostic)
        .with_context(|| format!("in {}", path.display()))?;
    let schema = load_schema_from_toml(&content)
        .map_err(diagnostic)
        .with_context(|| format!("in {}", path.display()))?;
    Ok((config, schema))
}

fn diagnostic(error: impl miette::Diagnostic + Send + Sync + 'static) -> anyhow::Error {
    anyhow!("{:?}", miette::Report::new(error))
}

/// Forwards progress from the blocking worker to the async side.
struct ChannelProgress {
    tx: mpsc::Sender<String>,
}

impl ProgressSink for ChannelProgress {
    fn on_progress(&mut self, message: &str) {
        // The receiver only goes away once the audit is done.
        let _ = self.tx.blocking_send(message.to_string());
    }
}

/// Runs the synchronous audit on a blocking worker, logging its progress.
async fn run_on_worker(auditor: Auditor, data: LintData) -> Result<AuditReport> {
    let (tx, mut rx) = mpsc::channel::<String>(32);

    let worker = tokio::task::spawn_blocking(move || {
        let mut progress = ChannelProgress { tx };
        auditor.audit(&data, &mut progress)
    });

    while let Some(message) = rx.recv().await {
        tracing::info!("{message}");
    }

    worker.await.context("audit worker panicked")
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_lint_core::{ComponentNode, Page};
    use tempfile::TempDir;

    #[test]
    fn audit_types_map_to_scopes() {
        assert_eq!(AuditType::System.scopes().len(), 3);
        assert_eq!(
            AuditType::VariablesStyles.scopes(),
            vec![AuditScope::Collection, AuditScope::TextStyle]
        );
        assert_eq!(AuditType::Components.scopes(), vec![AuditScope::Component]);
    }

    #[test]
    fn default_settings_without_config() {
        let (config, schema) = load_settings(&ConfigSource::Default).unwrap();
        assert_eq!(config.audit.yield_every_nodes, 50);
        assert_eq!(schema.requirements().len(), 3);
    }

    #[test]
    fn settings_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("design-lint.toml");
        std::fs::write(
            &path,
            "[audit]\nprogress-every-components = 1\n\n[waiver]\nthreshold = 0.3\n",
        )
        .unwrap();

        let (config, schema) = load_settings(&ConfigSource::Project(path)).unwrap();
        assert_eq!(config.audit.progress_every_components, 1);
        assert!((schema.waiver().threshold() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_schema_is_reported_with_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("design-lint.toml");
        std::fs::write(
            &path,
            "[[collections]]\nname = \"Theme\"\n\n[[collections.categories]]\nname = \"line-height\"\nmirror-category = \"font-size\"\n",
        )
        .unwrap();

        let err = load_settings(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(format!("{err:#}").contains("design-lint.toml"));
    }

    #[tokio::test]
    async fn worker_reports_progress_and_returns_report() {
        let data = LintData {
            pages: vec![Page {
                name: "Page 1".into(),
                children: vec![ComponentNode::new("1", "Button", "COMPONENT")],
            }],
            ..LintData::default()
        };
        let auditor = Auditor::builder()
            .scopes(AuditType::Components.scopes())
            .build()
            .unwrap();

        let report = run_on_worker(auditor, data).await.unwrap();
        assert_eq!(report.component.len(), 1);
        assert!(!report.has_failures());
    }
}
