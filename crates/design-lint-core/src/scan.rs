//! Raw-value scanning of component subtrees.
//!
//! A raw value is a visual property holding a literal where a variable
//! binding was expected. Traversal uses an explicit stack so deep trees
//! cannot overflow the call stack.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::model::{is_bound, ComponentNode, Dimension, NodeBindings, Paint, VariableRef};

/// Kind of visual property a raw value was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawValueCategory {
    /// Solid fill paint.
    Fill,
    /// Solid stroke paint.
    Stroke,
    /// Corner radius.
    CornerRadius,
    /// Auto-layout padding or item spacing.
    Spacing,
    /// Text font size, line height or letter spacing.
    Typography,
    /// Shadow or blur effect.
    Effect,
}

impl RawValueCategory {
    /// Every category in reporting order.
    pub const ALL: [Self; 6] = [
        Self::Fill,
        Self::Stroke,
        Self::CornerRadius,
        Self::Spacing,
        Self::Typography,
        Self::Effect,
    ];

    /// Lowercase label used in messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::CornerRadius => "corner radius",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Effect => "effect",
        }
    }

    /// How to fix a raw value of this category.
    #[must_use]
    pub fn remediation(self) -> &'static str {
        match self {
            Self::Fill => "bind fills to color variables",
            Self::Stroke => "bind strokes to color variables",
            Self::CornerRadius => "bind corner radius to a radius variable",
            Self::Spacing => "bind padding and gap to spacing variables",
            Self::Typography => "apply a text style or bind font size, line height and letter spacing",
            Self::Effect => "use an effect style or bind effect properties to variables",
        }
    }
}

impl std::fmt::Display for RawValueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One hard-coded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawValue {
    /// Node id.
    pub node_id: String,
    /// Node name.
    pub node_name: String,
    /// Category.
    pub category: RawValueCategory,
    /// Property path, e.g. `fills[0]` or `paddingLeft`.
    pub property: String,
    /// Display value, e.g. `#ff0000` or `16px`.
    pub value: String,
}

/// Returns every node of the subtree rooted at `root` in pre-order.
#[must_use]
pub fn collect_nodes(root: &ComponentNode) -> Vec<&ComponentNode> {
    let mut nodes = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(node.children.iter().rev());
    }
    nodes
}

/// Finds the raw values carried by a single node.
///
/// # Errors
///
/// Returns [`AuditError::MissingPaintColor`] for a visible solid paint
/// without a color.
pub fn check_node(node: &ComponentNode) -> Result<Vec<RawValue>, AuditError> {
    let mut found = Vec::new();
    let mut push = |category, property: String, value: String| {
        found.push(RawValue {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            category,
            property,
            value,
        });
    };
    let bindings = &node.bound_variables;

    for (property, category, paints, slots) in [
        ("fills", RawValueCategory::Fill, &node.fills, &bindings.fills),
        ("strokes", RawValueCategory::Stroke, &node.strokes, &bindings.strokes),
    ] {
        for (index, paint) in paints.iter().flatten().enumerate() {
            if let Some(value) = raw_paint(node, property, index, paint, slots)? {
                push(category, format!("{property}[{index}]"), value);
            }
        }
    }

    if let Some(radius) = node.corner_radius {
        if radius > 0.0 && !bindings.corner_radius_bound() {
            push(RawValueCategory::CornerRadius, "cornerRadius".into(), format!("{radius}px"));
        }
    }

    if node.has_auto_layout() {
        for (property, value, binding) in [
            ("paddingLeft", node.padding_left, &bindings.padding_left),
            ("paddingRight", node.padding_right, &bindings.padding_right),
            ("paddingTop", node.padding_top, &bindings.padding_top),
            ("paddingBottom", node.padding_bottom, &bindings.padding_bottom),
            ("itemSpacing", node.item_spacing, &bindings.item_spacing),
        ] {
            if let Some(value) = value.filter(|v| *v > 0.0) {
                if !is_bound(binding.as_ref()) {
                    push(RawValueCategory::Spacing, property.into(), format!("{value}px"));
                }
            }
        }
    }

    if node.is_text() {
        for (property, dimension, binding) in [
            ("fontSize", &node.font_size, &bindings.font_size),
            ("lineHeight", &node.line_height, &bindings.line_height),
            ("letterSpacing", &node.letter_spacing, &bindings.letter_spacing),
        ] {
            if let Some(value) = dimension.as_ref().and_then(Dimension::raw_display) {
                if !is_bound(binding.as_ref()) {
                    push(RawValueCategory::Typography, property.into(), value);
                }
            }
        }
    }

    for (index, effect) in node.effects.iter().flatten().enumerate() {
        if !effect.is_visible() || is_bound(NodeBindings::indexed(&bindings.effects, index)) {
            continue;
        }
        let kind = effect.effect_type.to_lowercase().replace('_', " ");
        let value = match (effect.is_shadow(), effect.color, effect.radius) {
            (true, Some(color), _) => format!("{kind} {}", color.format(1.0)),
            (_, _, Some(radius)) => format!("{kind} {radius}px"),
            _ => kind,
        };
        push(RawValueCategory::Effect, format!("effects[{index}]"), value);
    }

    Ok(found)
}

fn raw_paint(
    node: &ComponentNode,
    property: &'static str,
    index: usize,
    paint: &Paint,
    slots: &[Option<VariableRef>],
) -> Result<Option<String>, AuditError> {
    if !paint.is_solid() || !paint.is_visible() {
        return Ok(None);
    }
    let color = paint.color.ok_or_else(|| AuditError::MissingPaintColor {
        node_id: node.id.clone(),
        node_name: node.name.clone(),
        property,
        index,
    })?;
    if color.a * paint.opacity() == 0.0 || is_bound(NodeBindings::indexed(slots, index)) {
        return Ok(None);
    }
    Ok(Some(color.format(paint.opacity())))
}

/// Raw-value scan of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScan {
    /// Component node id.
    pub component_id: String,
    /// Component name.
    pub component_name: String,
    /// Nodes visited, the component itself included.
    pub nodes_scanned: usize,
    /// Raw values in traversal order.
    pub raw_values: Vec<RawValue>,
}

impl ComponentScan {
    /// Returns true if no raw value was found.
    #[must_use]
    pub fn is_fully_bound(&self) -> bool {
        self.raw_values.is_empty()
    }

    /// Raw-value count per category, every category present.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<RawValueCategory, usize> {
        let mut counts: BTreeMap<_, _> = RawValueCategory::ALL.iter().map(|c| (*c, 0)).collect();
        for raw in &self.raw_values {
            *counts.entry(raw.category).or_default() += 1;
        }
        counts
    }
}

/// Scans a component and its whole subtree.
///
/// # Errors
///
/// Propagates the first [`check_node`] error.
pub fn scan_component(component: &ComponentNode) -> Result<ComponentScan, AuditError> {
    let nodes = collect_nodes(component);
    let mut raw_values = Vec::new();
    for node in &nodes {
        raw_values.extend(check_node(node)?);
    }
    Ok(ComponentScan {
        component_id: component.id.clone(),
        component_name: component.name.clone(),
        nodes_scanned: nodes.len(),
        raw_values,
    })
}
