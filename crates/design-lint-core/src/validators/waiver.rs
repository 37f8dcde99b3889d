//! Alias-graph assessment for the Brand waiver.
//!
//! A file that keeps only Primitives and Theme is structurally equivalent to
//! the three-layer scheme when Theme aliases Primitives directly. The
//! assessment measures how many Theme mode values do that.

use std::collections::HashSet;

use crate::model::LintData;
use crate::schema::AliasWaiver;

/// Measured alias fraction of Theme values into Primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaiverAssessment {
    /// Theme mode values aliasing a Primitives variable.
    pub aliased: usize,
    /// All Theme mode values.
    pub total: usize,
    /// Minimum fraction that waives Brand.
    pub threshold: f64,
}

impl WaiverAssessment {
    /// `aliased / total`, or 0 when Theme holds no values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.aliased as f64 / self.total as f64
        }
    }

    /// Returns true if the Brand requirement is waived.
    #[must_use]
    pub fn is_waived(&self) -> bool {
        self.total > 0 && self.ratio() >= self.threshold
    }

    /// One-line description used in check suggestions.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} of {} Theme values ({:.0}%) alias Primitives directly; the waiver needs {:.0}%",
            self.aliased,
            self.total,
            self.ratio() * 100.0,
            self.threshold * 100.0
        )
    }
}

/// Assesses the Brand waiver.
///
/// Returns `None` unless Primitives and Theme exist and Brand does not.
#[must_use]
pub fn assess(data: &LintData, waiver: &AliasWaiver) -> Option<WaiverAssessment> {
    if data.find_collection(|n| waiver.brand().matches(n)).is_some() {
        return None;
    }
    let primitives = data.find_collection(|n| waiver.primitives().matches(n))?;
    let theme = data.find_collection(|n| waiver.theme().matches(n))?;

    let primitive_ids: HashSet<&str> = data
        .variables_in(&primitives.id)
        .map(|v| v.id.as_str())
        .collect();

    let mut aliased = 0;
    let mut total = 0;
    for value in data
        .variables_in(&theme.id)
        .flat_map(|v| v.values_by_mode.values())
    {
        total += 1;
        if value
            .alias_target()
            .is_some_and(|id| primitive_ids.contains(id))
        {
            aliased += 1;
        }
    }

    Some(WaiverAssessment {
        aliased,
        total,
        threshold: waiver.threshold(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rgba, Variable, VariableCollection, VariableRef, VariableValue};
    use crate::schema::default_schema;

    fn two_layer(aliased: usize, literal: usize) -> LintData {
        let mut variables = vec![Variable::new("p1", "colors/blue/500", "prim")
            .with_value("m", VariableValue::Color(Rgba::rgb(0.0, 0.0, 1.0)))];
        for i in 0..aliased {
            variables.push(
                Variable::new(format!("t{i}"), format!("colors/bg/{i}"), "theme")
                    .with_value("m", VariableValue::Alias(VariableRef::new("p1"))),
            );
        }
        for i in 0..literal {
            variables.push(
                Variable::new(format!("l{i}"), format!("colors/text/{i}"), "theme")
                    .with_value("m", VariableValue::Color(Rgba::rgb(0.0, 0.0, 0.0))),
            );
        }
        LintData {
            collections: vec![
                VariableCollection::new("prim", "Primitives"),
                VariableCollection::new("theme", "Theme"),
            ],
            variables,
            ..LintData::default()
        }
    }

    #[test]
    fn exactly_at_threshold_waives() {
        let schema = default_schema().unwrap();
        let assessment = assess(&two_layer(1, 9), schema.waiver()).unwrap();
        assert_eq!((assessment.aliased, assessment.total), (1, 10));
        assert!(assessment.is_waived());
    }

    #[test]
    fn below_threshold_does_not_waive() {
        let schema = default_schema().unwrap();
        let assessment = assess(&two_layer(1, 19), schema.waiver()).unwrap();
        assert!(!assessment.is_waived());
        assert!(assessment.describe().starts_with("1 of 20 Theme values (5%)"));
    }

    #[test]
    fn empty_theme_never_waives() {
        let schema = default_schema().unwrap();
        let assessment = assess(&two_layer(0, 0), schema.waiver()).unwrap();
        assert_eq!(assessment.total, 0);
        assert!(!assessment.is_waived());
    }

    #[test]
    fn alias_to_a_non_primitive_does_not_count() {
        let schema = default_schema().unwrap();
        let mut data = two_layer(0, 1);
        data.variables.push(
            Variable::new("t-x", "colors/border/1", "theme")
                .with_value("m", VariableValue::Alias(VariableRef::new("l0"))),
        );
        let assessment = assess(&data, schema.waiver()).unwrap();
        assert_eq!((assessment.aliased, assessment.total), (0, 2));
    }

    #[test]
    fn present_brand_skips_assessment() {
        let schema = default_schema().unwrap();
        let mut data = two_layer(5, 0);
        data.collections
            .push(VariableCollection::new("brand", "Brand"));
        assert!(assess(&data, schema.waiver()).is_none());
    }
}
