//! Built-in requirement schema.
//!
//! `DEFAULT_COLLECTION_REQUIREMENTS` is plain data: a three-tier token
//! architecture of Primitives, an optional Brand layer and a Theme.

use std::sync::LazyLock;

use super::model::{
    CategoryRequirement, CollectionRequirement, MatchMode, NamePattern, SubCategoryPattern,
};

/// Default regex locating the Primitives collection.
pub const PRIMITIVES_PATTERN: &str = "(?i)primitive";
/// Default regex locating the Theme collection.
pub const THEME_PATTERN: &str = "(?i)theme";
/// Default regex locating the Brand collection.
pub const BRAND_PATTERN: &str = "(?i)brand";
/// Fraction of Theme values that must alias Primitives to waive Brand.
pub const ALIAS_WAIVER_THRESHOLD: f64 = 0.10;

/// T-shirt size scale: `xs`, `sm`, `md`, `lg`, `xl`, `2xl`, `xxl`, ...
pub const TSHIRT_SIZE_PATTERN: &str = r"^(\d+)?(x+)?(xs|sm|md|lg|xl)$";

// Patterns below are constants exercised by the tests in this module.
#[allow(clippy::expect_used)]
static DEFAULT_COLLECTION_REQUIREMENTS: LazyLock<Vec<CollectionRequirement>> =
    LazyLock::new(|| {
        let pattern = |p: &str| NamePattern::new(p).expect("invalid default collection pattern");
        let tshirt = SubCategoryPattern::new(
            TSHIRT_SIZE_PATTERN,
            "t-shirt sizes (xs, sm, md, lg, xl, 2xl)",
            vec!["sm".into(), "md".into(), "lg".into(), "2xl".into()],
        )
        .expect("invalid default size pattern");

        vec![
            CollectionRequirement::new(
                "Primitives",
                pattern(PRIMITIVES_PATTERN),
                vec![CategoryRequirement::new("colors")],
            ),
            CollectionRequirement::new(
                "Brand",
                pattern(BRAND_PATTERN),
                vec![CategoryRequirement::new("colors").with_members(["primary"], MatchMode::Partial)],
            ),
            CollectionRequirement::new(
                "Theme",
                pattern(THEME_PATTERN),
                vec![
                    CategoryRequirement::new("colors")
                        .with_members(["bg", "text", "border"], MatchMode::Exact),
                    CategoryRequirement::new("font-family"),
                    CategoryRequirement::new("font-size").with_pattern(tshirt),
                    CategoryRequirement::new("line-height").with_mirror("font-size"),
                    CategoryRequirement::new("letter-spacing"),
                ],
            ),
        ]
    });

/// Returns a copy of the built-in collection requirements.
#[must_use]
pub fn default_requirements() -> Vec<CollectionRequirement> {
    DEFAULT_COLLECTION_REQUIREMENTS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::{AliasWaiver, Schema, SubCategoryRule};

    #[test]
    fn defaults_form_a_valid_schema() {
        let waiver = AliasWaiver::new(
            NamePattern::new(PRIMITIVES_PATTERN).unwrap(),
            NamePattern::new(THEME_PATTERN).unwrap(),
            NamePattern::new(BRAND_PATTERN).unwrap(),
            ALIAS_WAIVER_THRESHOLD,
        )
        .unwrap();
        assert!(Schema::new(default_requirements(), waiver).is_ok());
    }

    #[test]
    fn tshirt_pattern_accepts_sizes() {
        let theme = &default_requirements()[2];
        let font_size = &theme.categories()[2];
        let SubCategoryRule::Pattern(pattern) = &font_size.rules()[0] else {
            panic!("font-size should carry a pattern rule");
        };
        for ok in ["xs", "sm", "md", "lg", "xl", "2xl", "xxl", "3xs"] {
            assert!(pattern.matches(ok), "{ok} should match");
        }
        for bad in ["display", "large", "x", "12"] {
            assert!(!pattern.matches(bad), "{bad} should not match");
        }
    }
}
