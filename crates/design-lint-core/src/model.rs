//! Project snapshot types consumed by the audit core.
//!
//! A [`LintData`] bundle is produced by an adapter (plugin host, REST API,
//! JSON snapshot) and is only ever read by the validators. Field names are
//! camelCase on the wire so a plugin-host dump deserializes verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire tag used by design tools for variable aliases and bindings.
pub const VARIABLE_ALIAS: &str = "VARIABLE_ALIAS";

/// Everything the audit core needs from one design file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintData {
    /// Variable collections ("Primitives", "Theme", ...).
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    /// All local variables across every collection.
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Local text styles.
    #[serde(default)]
    pub text_styles: Vec<TextStyle>,
    /// Pages with their top-level nodes.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl LintData {
    /// Looks up a variable by id.
    #[must_use]
    pub fn variable_by_id(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Returns the first collection whose name satisfies `predicate`.
    #[must_use]
    pub fn find_collection(&self, predicate: impl Fn(&str) -> bool) -> Option<&VariableCollection> {
        self.collections.iter().find(|c| predicate(&c.name))
    }

    /// Returns the variables that belong to `collection_id`.
    pub fn variables_in<'a>(&'a self, collection_id: &'a str) -> impl Iterator<Item = &'a Variable> {
        self.variables
            .iter()
            .filter(move |v| v.variable_collection_id == collection_id)
    }

    /// Returns variables whose collection id resolves to no known collection.
    #[must_use]
    pub fn orphaned_variables(&self) -> Vec<&Variable> {
        self.variables
            .iter()
            .filter(|v| {
                !self
                    .collections
                    .iter()
                    .any(|c| c.id == v.variable_collection_id)
            })
            .collect()
    }
}

/// A named bucket of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCollection {
    /// Collection id.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl VariableCollection {
    /// Creates a collection.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A design token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Variable id.
    pub id: String,
    /// Slash-delimited name, e.g. `font-size/display/xl`.
    pub name: String,
    /// Owning collection id.
    pub variable_collection_id: String,
    /// Value per mode id.
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, VariableValue>,
}

impl Variable {
    /// Creates a variable with no mode values.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variable_collection_id: collection_id.into(),
            values_by_mode: BTreeMap::new(),
        }
    }

    /// Adds a value for a mode.
    #[must_use]
    pub fn with_value(mut self, mode_id: impl Into<String>, value: VariableValue) -> Self {
        self.values_by_mode.insert(mode_id.into(), value);
        self
    }
}

/// A value held by a variable in one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// Reference to another variable.
    Alias(VariableRef),
    /// RGBA color with 0..=1 channels.
    Color(Rgba),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// String value.
    String(String),
}

impl VariableValue {
    /// Returns the referenced variable id if this value is an alias.
    #[must_use]
    pub fn alias_target(&self) -> Option<&str> {
        match self {
            Self::Alias(r) if r.is_bound() => Some(&r.id),
            _ => None,
        }
    }
}

/// A reference to a variable, used both for aliases and property bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRef {
    /// Always `VARIABLE_ALIAS` on the wire.
    #[serde(rename = "type", default = "alias_tag")]
    pub kind: String,
    /// Target variable id.
    pub id: String,
}

fn alias_tag() -> String {
    VARIABLE_ALIAS.to_string()
}

impl VariableRef {
    /// Creates a reference to `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: alias_tag(),
            id: id.into(),
        }
    }

    /// A reference only counts as a binding when it carries an id.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Returns true if an optional reference is a real binding.
#[must_use]
pub fn is_bound(binding: Option<&VariableRef>) -> bool {
    binding.is_some_and(VariableRef::is_bound)
}

/// RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha (defaults to opaque).
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    /// Creates an opaque color.
    #[must_use]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Formats as `#rrggbb` when opaque, otherwise `rgba(r, g, b, a)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn format(&self, opacity: f64) -> String {
        let alpha = self.a * opacity;
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b) = (to_byte(self.r), to_byte(self.g), to_byte(self.b));
        if (alpha - 1.0).abs() < f64::EPSILON {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {alpha:.2})")
        }
    }
}

/// A text style and its property bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Optional style id.
    #[serde(default)]
    pub id: Option<String>,
    /// Name like `heading/lg` or `heading/lg/bold`.
    pub name: String,
    /// Bound variables keyed by property.
    #[serde(default)]
    pub bound_variables: TextStyleBindings,
}

impl TextStyle {
    /// Creates an unbound text style.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            bound_variables: TextStyleBindings::default(),
        }
    }

    /// Binds `property` to the variable `id`.
    #[must_use]
    pub fn bind(mut self, property: TypographyProperty, id: impl Into<String>) -> Self {
        *self.bound_variables.slot_mut(property) = Some(VariableRef::new(id));
        self
    }
}

/// The typography properties a text style can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypographyProperty {
    /// Font family.
    FontFamily,
    /// Font size.
    FontSize,
    /// Letter spacing.
    LetterSpacing,
    /// Line height.
    LineHeight,
}

impl TypographyProperty {
    /// All properties in reporting order.
    pub const ALL: [Self; 4] = [
        Self::FontFamily,
        Self::FontSize,
        Self::LetterSpacing,
        Self::LineHeight,
    ];

    /// Property key as it appears in `boundVariables`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FontFamily => "fontFamily",
            Self::FontSize => "fontSize",
            Self::LetterSpacing => "letterSpacing",
            Self::LineHeight => "lineHeight",
        }
    }

    /// Variable-name prefix a binding of this property must carry.
    #[must_use]
    pub fn token_prefix(self) -> &'static str {
        match self {
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::LetterSpacing => "letter-spacing",
            Self::LineHeight => "line-height",
        }
    }
}

impl std::fmt::Display for TypographyProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Bound variables of a text style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleBindings {
    /// `fontFamily` binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<VariableRef>,
    /// `fontSize` binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<VariableRef>,
    /// `letterSpacing` binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<VariableRef>,
    /// `lineHeight` binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<VariableRef>,
}

impl TextStyleBindings {
    /// Returns the binding for `property`.
    #[must_use]
    pub fn get(&self, property: TypographyProperty) -> Option<&VariableRef> {
        match property {
            TypographyProperty::FontFamily => self.font_family.as_ref(),
            TypographyProperty::FontSize => self.font_size.as_ref(),
            TypographyProperty::LetterSpacing => self.letter_spacing.as_ref(),
            TypographyProperty::LineHeight => self.line_height.as_ref(),
        }
    }

    fn slot_mut(&mut self, property: TypographyProperty) -> &mut Option<VariableRef> {
        match property {
            TypographyProperty::FontFamily => &mut self.font_family,
            TypographyProperty::FontSize => &mut self.font_size,
            TypographyProperty::LetterSpacing => &mut self.letter_spacing,
            TypographyProperty::LineHeight => &mut self.line_height,
        }
    }
}

/// A page and its top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page name.
    pub name: String,
    /// Top-level nodes.
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

/// Node type markers the scanner cares about.
pub mod node_type {
    /// A component definition.
    pub const COMPONENT: &str = "COMPONENT";
    /// A set of component variants.
    pub const COMPONENT_SET: &str = "COMPONENT_SET";
    /// A text layer.
    pub const TEXT: &str = "TEXT";
}

/// A node of the design tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    /// Node id.
    pub id: String,
    /// Layer name.
    #[serde(default)]
    pub name: String,
    /// Node type (`FRAME`, `TEXT`, `COMPONENT`, ...).
    #[serde(rename = "type")]
    pub node_type: String,
    /// Variable bindings on this node.
    #[serde(default)]
    pub bound_variables: NodeBindings,
    /// Fill paints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    /// Stroke paints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    /// Effects (shadows, blurs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,
    /// Uniform corner radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// Auto-layout mode (`NONE`, `HORIZONTAL`, `VERTICAL`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<String>,
    /// Left padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    /// Right padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    /// Top padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    /// Bottom padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    /// Gap between auto-layout children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    /// Font size (TEXT nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    /// Line height (TEXT nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Dimension>,
    /// Letter spacing (TEXT nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Dimension>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    /// Creates a bare node.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            ..Self::default()
        }
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns true for `COMPONENT` and `COMPONENT_SET` nodes.
    #[must_use]
    pub fn is_component(&self) -> bool {
        self.node_type == node_type::COMPONENT || self.node_type == node_type::COMPONENT_SET
    }

    /// Returns true for text layers.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.node_type == node_type::TEXT
    }

    /// Returns true when auto-layout is active.
    #[must_use]
    pub fn has_auto_layout(&self) -> bool {
        self.layout_mode
            .as_deref()
            .is_some_and(|mode| mode != "NONE")
    }
}

/// Variable bindings on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NodeBindings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Option<VariableRef>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Option<VariableRef>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Option<VariableRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left_radius: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right_radius: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_left_radius: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_right_radius: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<VariableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<VariableRef>,
}

impl NodeBindings {
    /// Binding of an indexed paint/effect slot.
    #[must_use]
    pub fn indexed(slots: &[Option<VariableRef>], index: usize) -> Option<&VariableRef> {
        slots.get(index).and_then(Option::as_ref)
    }

    /// True if the uniform radius or all four corners are bound.
    #[must_use]
    pub fn corner_radius_bound(&self) -> bool {
        is_bound(self.corner_radius.as_ref())
            || [
                &self.top_left_radius,
                &self.top_right_radius,
                &self.bottom_left_radius,
                &self.bottom_right_radius,
            ]
            .into_iter()
            .all(|r| is_bound(r.as_ref()))
    }
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Paint type (`SOLID`, `GRADIENT_LINEAR`, `IMAGE`, ...).
    #[serde(rename = "type")]
    pub paint_type: String,
    /// Visibility flag (defaults to visible).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Paint opacity (defaults to 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Color for solid paints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

impl Paint {
    /// Creates a visible solid paint.
    #[must_use]
    pub fn solid(color: Rgba) -> Self {
        Self {
            paint_type: "SOLID".to_string(),
            visible: None,
            opacity: None,
            color: Some(color),
        }
    }

    /// Returns true for `SOLID` paints.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.paint_type == "SOLID"
    }

    /// Returns false only when explicitly hidden.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Effective opacity (defaults to 1).
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// A layer effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Effect type (`DROP_SHADOW`, `INNER_SHADOW`, `LAYER_BLUR`, `BACKGROUND_BLUR`).
    #[serde(rename = "type")]
    pub effect_type: String,
    /// Visibility flag (defaults to visible).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Shadow color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    /// Blur radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Effect {
    /// Returns true for drop and inner shadows.
    #[must_use]
    pub fn is_shadow(&self) -> bool {
        self.effect_type.ends_with("SHADOW")
    }

    /// Returns false only when explicitly hidden.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

/// A typography dimension: a bare number, a `{unit, value}` pair, or the
/// `"mixed"` marker used when a text layer has several values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Bare number in pixels.
    Number(f64),
    /// Value with a unit (`PIXELS`, `PERCENT`, `AUTO`).
    Measured {
        /// Unit name.
        unit: String,
        /// Value, absent for `AUTO`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    },
    /// Mixed marker.
    Mixed(String),
}

impl Dimension {
    /// Pixel dimension.
    #[must_use]
    pub fn pixels(value: f64) -> Self {
        Self::Measured {
            unit: "PIXELS".to_string(),
            value: Some(value),
        }
    }

    /// Auto dimension.
    #[must_use]
    pub fn auto() -> Self {
        Self::Measured {
            unit: "AUTO".to_string(),
            value: None,
        }
    }

    /// Returns the hard-coded value to report, or `None` when the dimension
    /// normalizes to the zero/auto sentinel or is mixed.
    #[must_use]
    pub fn raw_display(&self) -> Option<String> {
        match self {
            Self::Number(v) if *v != 0.0 => Some(format!("{v}px")),
            Self::Measured { unit, value } => match (unit.as_str(), value) {
                ("AUTO", _) | (_, None) => None,
                (_, Some(v)) if *v == 0.0 => None,
                ("PERCENT", Some(v)) => Some(format!("{v}%")),
                (_, Some(v)) => Some(format!("{v}px")),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_plugin_snapshot_shapes() {
        let json = r#"{
            "collections": [{"id": "c1", "name": "Theme"}],
            "variables": [{
                "id": "v1",
                "name": "colors/bg/1",
                "variableCollectionId": "c1",
                "valuesByMode": {
                    "m1": {"type": "VARIABLE_ALIAS", "id": "p1"},
                    "m2": {"r": 1, "g": 0, "b": 0, "a": 1},
                    "m3": 4,
                    "m4": "Inter"
                }
            }],
            "textStyles": [{"name": "heading/lg", "boundVariables": {"fontSize": {"type": "VARIABLE_ALIAS", "id": "v9"}}}],
            "pages": [{"name": "Page 1", "children": [{"id": "1:1", "name": "Button", "type": "COMPONENT"}]}]
        }"#;

        let data: LintData = serde_json::from_str(json).unwrap();
        let variable = &data.variables[0];
        assert_eq!(variable.values_by_mode["m1"].alias_target(), Some("p1"));
        assert!(matches!(variable.values_by_mode["m2"], VariableValue::Color(_)));
        assert!(matches!(variable.values_by_mode["m3"], VariableValue::Number(_)));
        assert!(matches!(variable.values_by_mode["m4"], VariableValue::String(_)));
        assert!(data.text_styles[0].bound_variables.font_size.is_some());
        assert!(data.pages[0].children[0].is_component());
    }

    #[test]
    fn empty_ref_is_not_a_binding() {
        assert!(!is_bound(Some(&VariableRef::new(""))));
        assert!(!is_bound(None));
        assert!(is_bound(Some(&VariableRef::new("v1"))));
    }

    #[test]
    fn formats_colors() {
        assert_eq!(Rgba::rgb(1.0, 0.0, 0.0).format(1.0), "#ff0000");
        assert_eq!(Rgba::rgb(0.0, 0.0, 0.0).format(0.5), "rgba(0, 0, 0, 0.50)");
    }

    #[test]
    fn dimension_sentinels_are_not_raw() {
        assert_eq!(Dimension::auto().raw_display(), None);
        assert_eq!(Dimension::pixels(0.0).raw_display(), None);
        assert_eq!(Dimension::Number(0.0).raw_display(), None);
        assert_eq!(Dimension::Mixed("mixed".into()).raw_display(), None);
        assert_eq!(Dimension::pixels(24.0).raw_display().as_deref(), Some("24px"));
        assert_eq!(Dimension::Number(16.0).raw_display().as_deref(), Some("16px"));
    }

    #[test]
    fn orphaned_variables_are_detected() {
        let data = LintData {
            collections: vec![VariableCollection::new("c1", "Theme")],
            variables: vec![
                Variable::new("v1", "colors/bg", "c1"),
                Variable::new("v2", "colors/text", "gone"),
            ],
            ..LintData::default()
        };
        let orphans = data.orphaned_variables();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, "v2");
    }
}
