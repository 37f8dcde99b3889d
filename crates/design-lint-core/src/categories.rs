//! Category inference from flat, slash-delimited token names.
//!
//! The first segment of a name is its category; every later segment joins
//! that category's sub-category set. `font-size/display/xl` and
//! `font-size/xl` therefore both put `xl` under `font-size`.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::AuditError;
use crate::model::Variable;

/// Category name to its sub-category set.
///
/// Ordered collections keep every derived message deterministic.
pub type CategoryMap = BTreeMap<String, BTreeSet<String>>;

/// Splits a name into `(category, rest)`, skipping empty segments.
///
/// Returns `None` for names without any non-empty segment.
#[must_use]
pub fn split_name(name: &str) -> Option<(&str, Vec<&str>)> {
    let mut segments = name.split('/').map(str::trim).filter(|s| !s.is_empty());
    let category = segments.next()?;
    Some((category, segments.collect()))
}

/// Builds the category map for a set of variables.
///
/// # Errors
///
/// Returns [`AuditError::EmptyVariableName`] for a variable whose name has
/// no segment at all.
pub fn extract_categories<'a>(
    variables: impl IntoIterator<Item = &'a Variable>,
) -> Result<CategoryMap, AuditError> {
    let mut map = CategoryMap::new();
    for variable in variables {
        let (category, rest) =
            split_name(&variable.name).ok_or_else(|| AuditError::EmptyVariableName {
                id: variable.id.clone(),
            })?;
        let subs = map.entry(category.to_string()).or_default();
        subs.extend(rest.into_iter().map(str::to_string));
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> Vec<Variable> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Variable::new(format!("v{i}"), *n, "c1"))
            .collect()
    }

    #[test]
    fn three_level_names_flatten_into_one_set() {
        let map = extract_categories(&vars(&["a/b/c"])).unwrap();
        let subs: Vec<&str> = map["a"].iter().map(String::as_str).collect();
        assert_eq!(subs, vec!["b", "c"]);
    }

    #[test]
    fn single_segment_contributes_no_subcategories() {
        let map = extract_categories(&vars(&["a"])).unwrap();
        assert!(map.contains_key("a"));
        assert!(map["a"].is_empty());
    }

    #[test]
    fn two_and_three_level_schemes_share_sizes() {
        let map = extract_categories(&vars(&["font-size/display/xl", "font-size/xl"])).unwrap();
        assert!(map["font-size"].contains("xl"));
        assert!(map["font-size"].contains("display"));
        assert_eq!(map["font-size"].len(), 2);
    }

    #[test]
    fn empty_name_is_an_error() {
        let err = extract_categories(&vars(&["//"])).unwrap_err();
        assert_eq!(err, AuditError::EmptyVariableName { id: "v0".into() });
    }

    #[test]
    fn split_name_skips_empty_segments() {
        assert_eq!(split_name("heading//lg"), Some(("heading", vec!["lg"])));
        assert_eq!(split_name(""), None);
    }
}
