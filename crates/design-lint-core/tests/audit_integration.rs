//! Integration test: full audits of a fixture snapshot via Auditor.
//!
//! `tests/fixtures/snapshot.json` is a two-layer file (Primitives + Theme,
//! no Brand) with two text styles and three components across two pages.

use design_lint_core::{
    load_schema_from_toml, AuditReport, AuditScope, Auditor, CheckStatus, Config, LintData,
    NoProgress,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn snapshot() -> LintData {
    let json = std::fs::read_to_string(fixture("snapshot.json")).expect("fixture JSON should exist");
    serde_json::from_str(&json).expect("fixture JSON should deserialize")
}

fn audit_with_defaults(data: &LintData) -> AuditReport {
    Auditor::builder()
        .build()
        .expect("auditor should build")
        .audit(data, &mut NoProgress)
}

fn status_of(report: &AuditReport, check: &str) -> CheckStatus {
    report
        .all_checks()
        .find(|c| c.check == check)
        .unwrap_or_else(|| panic!("missing check {check}"))
        .status
}

fn listing(report: &AuditReport) -> String {
    report
        .all_checks()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Default schema ──

#[test]
fn default_audit_lists_every_check() {
    let report = audit_with_defaults(&snapshot());
    insta::assert_snapshot!(listing(&report), @r"
    pass: Primitives: colors category
    pass: Primitives collection structure
    pass: Brand collection
    fail: Theme: colors sub-categories
    pass: Theme: font-family category
    pass: Theme: font-size naming pattern
    pass: Theme: line-height mirrors font-size
    pass: Theme: letter-spacing category
    fail: Theme collection structure
    pass: Typography sync
    fail: Text styles with hard-coded values
    fail: Component: Button (page: Components)
    pass: Component: Icon (page: Components)
    fail: Component: Card (page: Archive)
    ");
}

#[test]
fn default_audit_scores() {
    let report = audit_with_defaults(&snapshot());
    assert_eq!(report.scores.collection.score, 78);
    assert_eq!(report.scores.text_style.score, 50);
    assert_eq!(report.scores.component.score, 33);
    assert_eq!(report.scores.overall.passed, 9);
    assert_eq!(report.scores.overall.failed, 5);
    assert_eq!(report.scores.overall.score, 64);
    assert!(report.has_failures());
}

#[test]
fn missing_border_is_named() {
    let report = audit_with_defaults(&snapshot());
    let check = report
        .collection
        .iter()
        .find(|c| c.check == "Theme: colors sub-categories")
        .expect("members check");
    assert!(check.suggestion.contains("Missing sub-categories: border"));
}

#[test]
fn brand_is_waived_by_direct_aliases() {
    let report = audit_with_defaults(&snapshot());
    let brand = report
        .collection
        .iter()
        .find(|c| c.check == "Brand collection")
        .expect("brand check");
    assert!(brand.suggestion.starts_with("Waived: 2 of 10 Theme values (20%)"));
}

#[test]
fn heading_lg_misses_only_letter_spacing() {
    let report = audit_with_defaults(&snapshot());
    let check = &report.text_style[1];
    assert!(check
        .suggestion
        .contains("heading/lg: bind letterSpacing → letter-spacing/lg"));
    assert!(!check.suggestion.contains("body/sm"));
}

#[test]
fn raw_values_are_counted_per_category() {
    let report = audit_with_defaults(&snapshot());
    let button = &report.component[0];
    assert!(button.suggestion.starts_with(
        "2 hard-coded value(s) (fill 0, stroke 0, corner radius 1, spacing 1, typography 0, effect 0)"
    ));
    let card = &report.component[2];
    assert!(card.suggestion.contains("typography 1"));
}

#[test]
fn audit_is_deterministic_and_leaves_data_untouched() {
    let data = snapshot();
    let before = data.clone();
    let auditor = Auditor::builder().build().expect("auditor should build");
    let first = auditor.audit(&data, &mut NoProgress);
    let second = auditor.audit(&data, &mut NoProgress);
    assert_eq!(first, second);
    assert_eq!(data, before);
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let report = audit_with_defaults(&snapshot());
    let json = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(json["scores"]["overall"]["score"], 64);
    assert_eq!(json["textStyle"][0]["status"], "pass");
    assert_eq!(json["component"][2]["pageName"], "Archive");
}

// ── Audit type scoping ──

#[test]
fn components_scope_runs_only_the_scan() {
    let report = Auditor::builder()
        .scopes([AuditScope::Component])
        .build()
        .expect("auditor should build")
        .audit(&snapshot(), &mut NoProgress);
    assert!(report.collection.is_empty());
    assert!(report.text_style.is_empty());
    assert_eq!(report.component.len(), 3);
    assert_eq!(report.scores.overall, report.scores.component);
}

#[test]
fn progress_reports_pages_and_components() {
    let mut messages = Vec::new();
    let mut sink = |m: &str| messages.push(m.to_string());
    Auditor::builder()
        .scopes([AuditScope::Component])
        .build()
        .expect("auditor should build")
        .audit(&snapshot(), &mut sink);
    assert_eq!(
        messages,
        vec![
            "Scanning page 1/2: Components",
            "Scanning page 2/2: Archive",
            "Validated 3/3 components",
        ]
    );
}

// ── TOML schema ──

#[test]
fn toml_schema_replaces_defaults() {
    let toml_content =
        std::fs::read_to_string(fixture("design-lint.toml")).expect("fixture TOML should exist");
    let config = Config::parse(&toml_content).expect("fixture config should parse");
    let schema = load_schema_from_toml(&toml_content).expect("fixture schema should load");

    let report = Auditor::builder()
        .config(config)
        .schema(schema)
        .scopes([AuditScope::Collection])
        .build()
        .expect("auditor should build")
        .audit(&snapshot(), &mut NoProgress);

    // 20% aliasing no longer reaches the 50% threshold.
    assert_eq!(status_of(&report, "Brand collection"), CheckStatus::Fail);
    assert_eq!(status_of(&report, "Theme: colors sub-categories"), CheckStatus::Pass);
    assert_eq!(
        status_of(&report, "Theme: letter-spacing mirrors font-size"),
        CheckStatus::Pass
    );
    assert_eq!(status_of(&report, "Theme collection structure"), CheckStatus::Pass);
}

#[test]
fn mirror_is_checked_in_both_directions() {
    let toml_content =
        std::fs::read_to_string(fixture("design-lint.toml")).expect("fixture TOML should exist");
    let schema = load_schema_from_toml(&toml_content).expect("fixture schema should load");

    let mut data = snapshot();
    data.variables.retain(|v| v.name != "letter-spacing/lg");
    data.variables.push(design_lint_core::Variable::new(
        "t11",
        "letter-spacing/xl",
        "c-theme",
    ));

    let report = Auditor::builder()
        .schema(schema)
        .scopes([AuditScope::Collection])
        .build()
        .expect("auditor should build")
        .audit(&data, &mut NoProgress);
    assert_eq!(
        status_of(&report, "Theme: letter-spacing mirrors font-size (missing sizes)"),
        CheckStatus::Fail
    );
    assert_eq!(
        status_of(&report, "Theme: letter-spacing mirrors font-size (extra sizes)"),
        CheckStatus::Fail
    );
    let mirror_failures = report
        .collection
        .iter()
        .filter(|c| c.check.starts_with("Theme: letter-spacing mirrors") && c.is_fail())
        .count();
    assert_eq!(mirror_failures, 2);
    // Each direction counts against the score on its own.
    assert_eq!(report.scores.collection.failed, 4);
}
