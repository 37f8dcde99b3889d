//! Text-style variable binding validation.
//!
//! A style named `heading/lg` (or `heading/lg/bold`) should bind
//! `fontFamily` to `font-family/heading` and its size-driven properties to
//! `font-size/lg`, `line-height/lg` and `letter-spacing/lg`.

use std::fmt::Write;

use tracing::debug;

use super::{AuditContext, AuditScope, Validator};
use crate::categories::split_name;
use crate::error::AuditError;
use crate::model::{LintData, TextStyle, TypographyProperty};
use crate::progress::ProgressSink;
use crate::types::AuditCheck;

/// A property bound to a variable whose name does not fit the style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncorrectBinding {
    /// Bound property.
    pub property: TypographyProperty,
    /// Name of the bound variable, or a placeholder for an unknown id.
    pub variable_name: String,
    /// Expected variable name.
    pub expected: String,
}

/// Binding analysis of one text style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBindingReport {
    /// Full style name.
    pub style_name: String,
    /// First name segment.
    pub category: String,
    /// Size segment (middle of three, otherwise last).
    pub size: String,
    /// Properties with a literal value, in [`TypographyProperty::ALL`] order.
    pub unbound_properties: Vec<TypographyProperty>,
    /// Bound properties that reference an unexpected variable.
    pub incorrect_bindings: Vec<IncorrectBinding>,
}

impl StyleBindingReport {
    /// Returns true if every property is bound to some variable.
    #[must_use]
    pub fn is_fully_bound(&self) -> bool {
        self.unbound_properties.is_empty()
    }

    /// Returns true if every bound property references the expected variable.
    #[must_use]
    pub fn bindings_correct(&self) -> bool {
        self.incorrect_bindings.is_empty()
    }

    /// Variable name this style should bind `property` to.
    #[must_use]
    pub fn expected_name(&self, property: TypographyProperty) -> String {
        expected_name(property, &self.category, &self.size)
    }
}

/// Variable name a `{category}/{size}` style should bind `property` to.
#[must_use]
pub fn expected_name(property: TypographyProperty, category: &str, size: &str) -> String {
    match property {
        TypographyProperty::FontFamily => format!("{}/{category}", property.token_prefix()),
        _ => format!("{}/{size}", property.token_prefix()),
    }
}

/// Returns true if `variable_name` is an acceptable binding for `property`.
#[must_use]
pub fn binding_matches(
    property: TypographyProperty,
    variable_name: &str,
    category: &str,
    size: &str,
) -> bool {
    if !variable_name.contains(property.token_prefix()) {
        return false;
    }
    match property {
        TypographyProperty::FontFamily => {
            let last = variable_name.rsplit('/').next().unwrap_or(variable_name);
            variable_name.contains(category) || category.contains(last)
        }
        _ => variable_name.ends_with(size) || variable_name.contains(&format!("/{size}")),
    }
}

/// Analyzes one style; `None` for names with fewer than two segments.
#[must_use]
pub fn analyze_style(style: &TextStyle, data: &LintData) -> Option<StyleBindingReport> {
    let (category, rest) = split_name(&style.name)?;
    let size = match rest.as_slice() {
        [] => return None,
        [size, _] => *size,
        [.., last] => *last,
    };

    let mut report = StyleBindingReport {
        style_name: style.name.clone(),
        category: category.to_string(),
        size: size.to_string(),
        unbound_properties: Vec::new(),
        incorrect_bindings: Vec::new(),
    };

    for property in TypographyProperty::ALL {
        let Some(binding) = style.bound_variables.get(property).filter(|b| b.is_bound()) else {
            report.unbound_properties.push(property);
            continue;
        };
        let variable_name = match data.variable_by_id(&binding.id) {
            Some(variable) if binding_matches(property, &variable.name, category, size) => continue,
            Some(variable) => variable.name.clone(),
            None => format!("<unknown variable {}>", binding.id),
        };
        report.incorrect_bindings.push(IncorrectBinding {
            property,
            variable_name,
            expected: expected_name(property, category, size),
        });
    }

    Some(report)
}

/// Checks that text styles bind typography properties to matching variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypographyBindings;

impl TypographyBindings {
    /// Validator name.
    pub const NAME: &'static str = "text-style-bindings";
}

impl Validator for TypographyBindings {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        "DL003"
    }

    fn description(&self) -> &'static str {
        "Text styles bind font family, size, line height and letter spacing to variables"
    }

    fn scope(&self) -> AuditScope {
        AuditScope::TextStyle
    }

    fn validate(
        &self,
        ctx: &AuditContext<'_>,
        _progress: &mut dyn ProgressSink,
    ) -> Result<Vec<AuditCheck>, AuditError> {
        let reports: Vec<StyleBindingReport> = ctx
            .data
            .text_styles
            .iter()
            .filter_map(|style| analyze_style(style, ctx.data))
            .collect();

        let unbound: Vec<&StyleBindingReport> =
            reports.iter().filter(|r| !r.is_fully_bound()).collect();
        let incorrect: Vec<&StyleBindingReport> =
            reports.iter().filter(|r| !r.bindings_correct()).collect();
        debug!(
            styles = reports.len(),
            unbound = unbound.len(),
            incorrect = incorrect.len(),
            "Analyzed text style bindings"
        );

        let mut checks = Vec::new();
        if !unbound.is_empty() {
            let mut suggestion = format!("{} style(s) use hard-coded values:", unbound.len());
            for report in &unbound {
                let props: Vec<String> = report
                    .unbound_properties
                    .iter()
                    .map(|p| format!("{p} → {}", report.expected_name(*p)))
                    .collect();
                let _ = write!(suggestion, "\n  {}: bind {}", report.style_name, props.join(", "));
            }
            checks.push(AuditCheck::fail("Text styles with hard-coded values", suggestion));
        }
        if !incorrect.is_empty() {
            let mut suggestion =
                format!("{} style(s) bind variables that do not match their name:", incorrect.len());
            for report in &incorrect {
                for binding in &report.incorrect_bindings {
                    let _ = write!(
                        suggestion,
                        "\n  {}: {} is bound to {}, expected {}",
                        report.style_name, binding.property, binding.variable_name, binding.expected
                    );
                }
            }
            checks.push(AuditCheck::fail("Text styles with mismatched variables", suggestion));
        }
        if checks.is_empty() {
            checks.push(AuditCheck::pass(
                "Text style variable bindings",
                format!("{} text style(s) bind every typography property to a matching variable", reports.len()),
            ));
        }
        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{Variable, VariableCollection};
    use crate::progress::NoProgress;
    use crate::schema::default_schema;
    use crate::types::CheckStatus;
    use TypographyProperty::{FontFamily, FontSize, LetterSpacing, LineHeight};

    fn theme() -> LintData {
        let names = [
            "font-family/heading",
            "font-size/lg",
            "font-size/md",
            "line-height/lg",
            "letter-spacing/lg",
        ];
        LintData {
            collections: vec![VariableCollection::new("t", "Theme")],
            variables: names
                .iter()
                .map(|n| Variable::new(*n, *n, "t"))
                .collect(),
            ..LintData::default()
        }
    }

    fn run(data: &LintData) -> Vec<AuditCheck> {
        let config = Config::default();
        let schema = default_schema().unwrap();
        let ctx = AuditContext {
            data,
            config: &config,
            schema: &schema,
        };
        TypographyBindings.validate(&ctx, &mut NoProgress).unwrap()
    }

    #[test]
    fn heading_lg_missing_letter_spacing() {
        let data = theme();
        let style = TextStyle::new("heading/lg")
            .bind(FontFamily, "font-family/heading")
            .bind(FontSize, "font-size/lg")
            .bind(LineHeight, "line-height/lg");
        let report = analyze_style(&style, &data).unwrap();
        assert_eq!(report.unbound_properties, vec![LetterSpacing]);
        assert!(report.bindings_correct());
        assert!(!report.is_fully_bound());
    }

    #[test]
    fn wrong_size_is_incorrect() {
        let data = theme();
        let style = TextStyle::new("heading/lg")
            .bind(FontFamily, "font-family/heading")
            .bind(FontSize, "font-size/md")
            .bind(LineHeight, "line-height/lg")
            .bind(LetterSpacing, "letter-spacing/lg");
        let report = analyze_style(&style, &data).unwrap();
        assert!(report.is_fully_bound());
        assert_eq!(
            report.incorrect_bindings,
            vec![IncorrectBinding {
                property: FontSize,
                variable_name: "font-size/md".into(),
                expected: "font-size/lg".into(),
            }]
        );
    }

    #[test]
    fn three_segment_name_uses_middle_size() {
        let data = theme();
        let style = TextStyle::new("heading/lg/bold").bind(FontSize, "font-size/lg");
        let report = analyze_style(&style, &data).unwrap();
        assert_eq!(report.size, "lg");
        assert!(report.bindings_correct());
        assert_eq!(report.unbound_properties, vec![FontFamily, LetterSpacing, LineHeight]);
    }

    #[test]
    fn single_segment_names_are_skipped() {
        assert!(analyze_style(&TextStyle::new("heading"), &theme()).is_none());
    }

    #[test]
    fn unknown_variable_is_incorrect() {
        let style = TextStyle::new("body/sm").bind(FontSize, "gone");
        let report = analyze_style(&style, &theme()).unwrap();
        assert_eq!(report.incorrect_bindings[0].variable_name, "<unknown variable gone>");
    }

    #[test]
    fn font_family_matches_by_category_either_way() {
        assert!(binding_matches(FontFamily, "font-family/heading", "heading", "lg"));
        assert!(binding_matches(FontFamily, "font-family/head", "heading", "lg"));
        assert!(!binding_matches(FontFamily, "font-family/body", "heading", "lg"));
        assert!(!binding_matches(FontSize, "line-height/lg", "heading", "lg"));
        assert!(binding_matches(LineHeight, "line-height/lg/tight", "heading", "lg"));
    }

    #[test]
    fn checks_aggregate_into_two_buckets() {
        let mut data = theme();
        data.text_styles = vec![
            TextStyle::new("heading/lg")
                .bind(FontFamily, "font-family/heading")
                .bind(FontSize, "font-size/lg")
                .bind(LineHeight, "line-height/lg"),
            TextStyle::new("heading/md").bind(FontSize, "font-size/lg"),
        ];
        let checks = run(&data);
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].check, "Text styles with hard-coded values");
        assert!(checks[0]
            .suggestion
            .contains("heading/lg: bind letterSpacing → letter-spacing/lg"));
        assert_eq!(checks[1].check, "Text styles with mismatched variables");
        assert!(checks[1]
            .suggestion
            .contains("heading/md: fontSize is bound to font-size/lg, expected font-size/md"));
    }

    #[test]
    fn fully_bound_styles_pass() {
        let mut data = theme();
        data.text_styles = vec![TextStyle::new("heading/lg")
            .bind(FontFamily, "font-family/heading")
            .bind(FontSize, "font-size/lg")
            .bind(LineHeight, "line-height/lg")
            .bind(LetterSpacing, "letter-spacing/lg")];
        let checks = run(&data);
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, CheckStatus::Pass);
    }
}
