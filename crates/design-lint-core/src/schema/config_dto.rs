//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to domain model types via the loader.

use serde::Deserialize;

/// Raw TOML representation of the requirement schema.
///
/// Extends the base `Config` file with `[[collections]]` and `[waiver]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDto {
    /// Collection requirements; empty means "use the defaults".
    #[serde(default)]
    pub collections: Vec<CollectionDto>,

    /// Brand waiver overrides.
    #[serde(default)]
    pub waiver: Option<WaiverDto>,
}

/// TOML representation of a collection requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDto {
    /// Display name (e.g., "Theme").
    pub name: String,
    /// Regex identifying the collection by name (default: case-insensitive name).
    #[serde(default)]
    pub pattern: Option<String>,
    /// Required categories.
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

/// TOML representation of a category requirement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryDto {
    /// Category name (first name segment).
    pub name: String,
    /// Required sub-category names.
    #[serde(default)]
    pub sub_categories: Option<Vec<String>>,
    /// Accept sub-categories that contain the required name.
    #[serde(default)]
    pub sub_category_partial_match: bool,
    /// Naming pattern for sub-categories.
    #[serde(default)]
    pub sub_category_pattern: Option<PatternDto>,
    /// Category whose sub-category set must be mirrored.
    #[serde(default)]
    pub mirror_category: Option<String>,
}

/// TOML representation of a sub-category pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDto {
    /// Regex source.
    pub pattern: String,
    /// Human description.
    #[serde(default)]
    pub description: String,
    /// Example conforming names.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// TOML representation of the Brand waiver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaiverDto {
    /// Regex for the Primitives collection.
    #[serde(default)]
    pub primitives: Option<String>,
    /// Regex for the Theme collection.
    #[serde(default)]
    pub theme: Option<String>,
    /// Regex for the Brand collection.
    #[serde(default)]
    pub brand: Option<String>,
    /// Minimum alias fraction.
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: SchemaDto = toml::from_str("").unwrap();
        assert!(dto.collections.is_empty());
        assert!(dto.waiver.is_none());
    }

    #[test]
    fn deserialize_full_schema() {
        let toml_str = r#"
[waiver]
threshold = 0.25

[[collections]]
name = "Theme"
pattern = "(?i)theme"

[[collections.categories]]
name = "colors"
sub-categories = ["bg", "text", "border"]

[[collections.categories]]
name = "font-size"
sub-category-pattern = { pattern = "^(xs|sm|md|lg|xl)$", description = "t-shirt sizes", examples = ["sm", "lg"] }

[[collections.categories]]
name = "line-height"
mirror-category = "font-size"
"#;
        let dto: SchemaDto = toml::from_str(toml_str).unwrap();
        assert_eq!(dto.waiver.unwrap().threshold, Some(0.25));
        let theme = &dto.collections[0];
        assert_eq!(theme.categories.len(), 3);
        assert_eq!(theme.categories[0].sub_categories.as_ref().unwrap().len(), 3);
        assert!(!theme.categories[0].sub_category_partial_match);
        assert_eq!(
            theme.categories[1].sub_category_pattern.as_ref().unwrap().examples,
            vec!["sm", "lg"]
        );
        assert_eq!(
            theme.categories[2].mirror_category.as_deref(),
            Some("font-size")
        );
    }
}
