//! DTO → Domain model conversion with validation.

use super::config_dto::{CategoryDto, CollectionDto, PatternDto, SchemaDto, WaiverDto};
use super::defaults;
use super::model::{
    AliasWaiver, CategoryRequirement, CollectionRequirement, MatchMode, ModelError, NamePattern,
    Schema, SubCategoryPattern,
};

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    #[diagnostic(code(design_lint::schema::invalid))]
    Validation {
        /// Where the error occurred (e.g., "collections[0].categories[1].pattern").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// Cross-reference errors from aggregate root construction.
    #[error("schema validation errors:\n{}", format_errors(.0))]
    #[diagnostic(
        code(design_lint::schema::cross_ref),
        help("`mirror-category` must name another category of the same collection")
    )]
    CrossRef(Vec<ModelError>),
}

fn format_errors(errors: &[ModelError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Converts a `SchemaDto` to a validated `Schema`.
///
/// An empty `collections` list falls back to
/// [`defaults::default_requirements`]; a missing `[waiver]` or missing
/// waiver keys fall back to [`defaults`] values.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: SchemaDto) -> Result<Schema, LoadError> {
    let requirements = if dto.collections.is_empty() {
        defaults::default_requirements()
    } else {
        dto.collections
            .iter()
            .enumerate()
            .map(|(i, c)| convert_collection(c, i))
            .collect::<Result<Vec<_>, _>>()?
    };

    let waiver = convert_waiver(dto.waiver.unwrap_or_default())?;

    Schema::new(requirements, waiver).map_err(LoadError::CrossRef)
}

fn convert_collection(dto: &CollectionDto, index: usize) -> Result<CollectionRequirement, LoadError> {
    let ctx = format!("collections[{index}]");
    let source = dto
        .pattern
        .clone()
        .unwrap_or_else(|| format!("(?i){}", regex::escape(&dto.name)));
    let matcher = NamePattern::new(&source).map_err(|e| LoadError::Validation {
        context: format!("{ctx}.pattern"),
        source: e,
    })?;

    let categories = dto
        .categories
        .iter()
        .enumerate()
        .map(|(j, c)| convert_category(c, &format!("{ctx}.categories[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CollectionRequirement::new(
        dto.name.clone(),
        matcher,
        categories,
    ))
}

fn convert_category(dto: &CategoryDto, ctx: &str) -> Result<CategoryRequirement, LoadError> {
    let mut requirement = CategoryRequirement::new(dto.name.clone());

    if let Some(names) = &dto.sub_categories {
        let mode = if dto.sub_category_partial_match {
            MatchMode::Partial
        } else {
            MatchMode::Exact
        };
        requirement = requirement.with_members(names.iter().cloned(), mode);
    }

    if let Some(pattern) = &dto.sub_category_pattern {
        requirement = requirement.with_pattern(convert_pattern(pattern, ctx)?);
    }

    if let Some(target) = &dto.mirror_category {
        requirement = requirement.with_mirror(target.clone());
    }

    Ok(requirement)
}

fn convert_pattern(dto: &PatternDto, ctx: &str) -> Result<SubCategoryPattern, LoadError> {
    SubCategoryPattern::new(&dto.pattern, dto.description.clone(), dto.examples.clone()).map_err(
        |e| LoadError::Validation {
            context: format!("{ctx}.sub-category-pattern"),
            source: e,
        },
    )
}

fn convert_waiver(dto: WaiverDto) -> Result<AliasWaiver, LoadError> {
    let pattern = |value: Option<String>, default: &str, key: &str| {
        NamePattern::new(value.as_deref().unwrap_or(default)).map_err(|e| LoadError::Validation {
            context: format!("waiver.{key}"),
            source: e,
        })
    };

    let primitives = pattern(dto.primitives, defaults::PRIMITIVES_PATTERN, "primitives")?;
    let theme = pattern(dto.theme, defaults::THEME_PATTERN, "theme")?;
    let brand = pattern(dto.brand, defaults::BRAND_PATTERN, "brand")?;
    let threshold = dto.threshold.unwrap_or(defaults::ALIAS_WAIVER_THRESHOLD);

    AliasWaiver::new(primitives, theme, brand, threshold).map_err(|e| LoadError::Validation {
        context: "waiver.threshold".to_string(),
        source: e,
    })
}
