//! REST API adapter.
//!
//! Fetches local variables and the file document, then converts them into
//! a [`LintData`] bundle. Text styles are not returned with their bindings
//! by the API, so each `TEXT` style takes the bound variables of the first
//! text node that uses it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use anyhow::{bail, Context, Result};
use design_lint_core::{
    ComponentNode, Dimension, Effect, LintData, NodeBindings, Page, Paint, TextStyle,
    TextStyleBindings, Variable, VariableCollection,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

const TOKEN_HEADER: &str = "X-Figma-Token";

/// Binding keys that hold one binding per paint or effect.
const INDEXED_BINDINGS: &[&str] = &["fills", "strokes", "effects"];

// ────────────────────────────────────────────
// Client
// ────────────────────────────────────────────

/// Authenticated API client.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Creates a client for `base_url` authenticating with `token`.
    #[must_use]
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Fetches variables and the document and converts them.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success status codes or
    /// unexpected response shapes.
    pub async fn fetch(&self, file_key: &str) -> Result<LintData> {
        tracing::info!("Fetching file {file_key} from {}", self.base_url);
        let variables_path = format!("/v1/files/{file_key}/variables/local");
        let file_path = format!("/v1/files/{file_key}");
        let (variables, file) = tokio::try_join!(
            self.get::<VariablesResponse>(&variables_path),
            self.get::<FileResponse>(&file_path),
        )?;
        convert(variables, file)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("GET {path} returned {status}: {}", body.trim());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("unexpected response shape from {path}"))
    }
}

// ────────────────────────────────────────────
// Response shapes
// ────────────────────────────────────────────

/// `GET /v1/files/{key}/variables/local` body.
#[derive(Debug, Deserialize)]
pub struct VariablesResponse {
    meta: VariablesMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariablesMeta {
    #[serde(default)]
    variables: BTreeMap<String, Variable>,
    #[serde(default)]
    variable_collections: BTreeMap<String, VariableCollection>,
}

/// `GET /v1/files/{key}` body.
#[derive(Debug, Deserialize)]
pub struct FileResponse {
    document: DocumentNode,
    #[serde(default)]
    styles: BTreeMap<String, StyleMeta>,
}

#[derive(Debug, Deserialize)]
struct DocumentNode {
    #[serde(default)]
    children: Vec<CanvasNode>,
}

#[derive(Debug, Deserialize)]
struct CanvasNode {
    name: String,
    #[serde(default)]
    children: Vec<RestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleMeta {
    name: String,
    style_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    fills: Option<Vec<Paint>>,
    #[serde(default)]
    strokes: Option<Vec<Paint>>,
    #[serde(default)]
    effects: Option<Vec<Effect>>,
    #[serde(default)]
    corner_radius: Option<f64>,
    #[serde(default)]
    layout_mode: Option<String>,
    #[serde(default)]
    padding_left: Option<f64>,
    #[serde(default)]
    padding_right: Option<f64>,
    #[serde(default)]
    padding_top: Option<f64>,
    #[serde(default)]
    padding_bottom: Option<f64>,
    #[serde(default)]
    item_spacing: Option<f64>,
    #[serde(default)]
    style: Option<TypeStyle>,
    #[serde(default)]
    styles: HashMap<String, String>,
    #[serde(default)]
    bound_variables: serde_json::Map<String, Value>,
    #[serde(default)]
    children: Vec<RestNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeStyle {
    #[serde(default)]
    font_size: Option<f64>,
    #[serde(default)]
    letter_spacing: Option<f64>,
    #[serde(default)]
    line_height_px: Option<f64>,
    #[serde(default)]
    line_height_percent_font_size: Option<f64>,
    #[serde(default)]
    line_height_unit: Option<String>,
}

impl TypeStyle {
    fn line_height(&self) -> Option<Dimension> {
        match self.line_height_unit.as_deref() {
            Some("INTRINSIC_%") => Some(Dimension::auto()),
            Some("FONT_SIZE_%") => Some(Dimension::Measured {
                unit: "PERCENT".to_string(),
                value: self.line_height_percent_font_size,
            }),
            _ => self.line_height_px.map(Dimension::pixels),
        }
    }
}

// ────────────────────────────────────────────
// Conversion
// ────────────────────────────────────────────

/// Converts API responses into a [`LintData`] bundle.
///
/// # Errors
///
/// Returns an error if a node's bound variables have an unexpected shape.
pub fn convert(variables: VariablesResponse, file: FileResponse) -> Result<LintData> {
    let collections = variables.meta.variable_collections.into_values().collect();
    let variables = variables.meta.variables.into_values().collect();

    let mut text_style_sources: HashMap<String, TextStyleBindings> = HashMap::new();
    let mut pages = Vec::with_capacity(file.document.children.len());
    for canvas in file.document.children {
        let mut children = Vec::with_capacity(canvas.children.len());
        for node in canvas.children {
            children.push(convert_node(node, &mut text_style_sources)?);
        }
        pages.push(Page {
            name: canvas.name,
            children,
        });
    }

    let mut text_styles: Vec<TextStyle> = file
        .styles
        .into_iter()
        .filter(|(_, meta)| meta.style_type == "TEXT")
        .map(|(id, meta)| {
            let bound_variables = text_style_sources.remove(&id).unwrap_or_else(|| {
                tracing::debug!("Text style {} is not used by any text node", meta.name);
                TextStyleBindings::default()
            });
            TextStyle {
                id: Some(id),
                name: meta.name,
                bound_variables,
            }
        })
        .collect();
    text_styles.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(LintData {
        collections,
        variables,
        text_styles,
        pages,
    })
}

/// Converts a node subtree with an explicit stack, recording the bindings
/// of the first text node that uses each text style.
fn convert_node(
    root: RestNode,
    text_style_sources: &mut HashMap<String, TextStyleBindings>,
) -> Result<ComponentNode> {
    enum Step {
        Enter(RestNode),
        Exit(ComponentNode, usize),
    }

    let mut steps = vec![Step::Enter(root)];
    let mut done: Vec<ComponentNode> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(mut node) => {
                let bindings = normalize_bindings(&node.bound_variables);
                if let Some(style_id) = node.styles.get("text") {
                    if !text_style_sources.contains_key(style_id) {
                        let style_bindings: TextStyleBindings =
                            serde_json::from_value(bindings.clone())
                                .with_context(|| format!("text bindings of node {}", node.id))?;
                        text_style_sources.insert(style_id.clone(), style_bindings);
                    }
                }

                let children = std::mem::take(&mut node.children);
                let converted = leaf(node, bindings)?;
                steps.push(Step::Exit(converted, children.len()));
                steps.extend(children.into_iter().rev().map(Step::Enter));
            }
            Step::Exit(mut node, child_count) => {
                node.children = done.split_off(done.len() - child_count);
                done.push(node);
            }
        }
    }

    done.pop().context("empty node conversion")
}

fn leaf(node: RestNode, bindings: Value) -> Result<ComponentNode> {
    let bound_variables: NodeBindings = serde_json::from_value(bindings)
        .with_context(|| format!("bound variables of node {}", node.id))?;
    let style = node.style.unwrap_or_default();
    let is_text = node.node_type == design_lint_core::node_type::TEXT;

    Ok(ComponentNode {
        id: node.id,
        name: node.name,
        node_type: node.node_type,
        bound_variables,
        fills: node.fills,
        strokes: node.strokes,
        effects: node.effects,
        corner_radius: node.corner_radius,
        layout_mode: node.layout_mode,
        padding_left: node.padding_left,
        padding_right: node.padding_right,
        padding_top: node.padding_top,
        padding_bottom: node.padding_bottom,
        item_spacing: node.item_spacing,
        font_size: style.font_size.filter(|_| is_text).map(Dimension::Number),
        line_height: style.line_height().filter(|_| is_text),
        letter_spacing: style.letter_spacing.filter(|_| is_text).map(Dimension::Number),
        children: Vec::new(),
    })
}

/// Text ranges report scalar bindings as arrays; keep the first entry.
fn normalize_bindings(raw: &serde_json::Map<String, Value>) -> Value {
    let normalized = raw
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Array(items) if !INDEXED_BINDINGS.contains(&key.as_str()) => {
                items.first().map(|first| (key.clone(), first.clone()))
            }
            other => Some((key.clone(), other.clone())),
        })
        .collect();
    Value::Object(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use design_lint_core::{is_bound, TypographyProperty};
    use serde_json::json;

    fn variables_response() -> VariablesResponse {
        serde_json::from_value(json!({
            "status": 200,
            "error": false,
            "meta": {
                "variableCollections": {
                    "VC:2": { "id": "VC:2", "name": "Theme", "modes": [] },
                    "VC:1": { "id": "VC:1", "name": "Primitives", "modes": [] }
                },
                "variables": {
                    "V:1": {
                        "id": "V:1",
                        "name": "font-size/lg",
                        "variableCollectionId": "VC:2",
                        "resolvedType": "FLOAT",
                        "valuesByMode": { "m": 24 }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn file_response() -> FileResponse {
        serde_json::from_value(json!({
            "name": "Design System",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "name": "Components",
                    "type": "CANVAS",
                    "children": [{
                        "id": "1:1",
                        "name": "Button",
                        "type": "COMPONENT",
                        "cornerRadius": 4,
                        "fills": [{ "type": "SOLID", "blendMode": "NORMAL", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }],
                        "boundVariables": {
                            "fills": [{ "type": "VARIABLE_ALIAS", "id": "V:9" }]
                        },
                        "children": [{
                            "id": "1:2",
                            "name": "Label",
                            "type": "TEXT",
                            "styles": { "text": "S:1" },
                            "style": { "fontSize": 24, "letterSpacing": 0, "lineHeightPx": 32, "lineHeightUnit": "INTRINSIC_%" },
                            "boundVariables": {
                                "fontSize": [{ "type": "VARIABLE_ALIAS", "id": "V:1" }]
                            }
                        }]
                    }]
                }]
            },
            "styles": {
                "S:1": { "key": "k1", "name": "heading/lg", "styleType": "TEXT" },
                "S:2": { "key": "k2", "name": "body/sm", "styleType": "TEXT" },
                "S:3": { "key": "k3", "name": "shadow/md", "styleType": "EFFECT" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn converts_collections_and_variables() {
        let data = convert(variables_response(), file_response()).unwrap();
        let names: Vec<&str> = data.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Primitives", "Theme"]);
        assert_eq!(data.variables[0].variable_collection_id, "VC:2");
    }

    #[test]
    fn converts_node_tree_and_typography() {
        let data = convert(variables_response(), file_response()).unwrap();
        let button = &data.pages[0].children[0];
        assert_eq!(button.corner_radius, Some(4.0));
        assert!(is_bound(NodeBindings::indexed(&button.bound_variables.fills, 0)));
        assert!(button.font_size.is_none());

        let label = &button.children[0];
        assert_eq!(label.font_size, Some(Dimension::Number(24.0)));
        assert_eq!(label.line_height, Some(Dimension::auto()));
        assert!(is_bound(label.bound_variables.font_size.as_ref()));
    }

    #[test]
    fn text_styles_take_bindings_from_first_user() {
        let data = convert(variables_response(), file_response()).unwrap();
        let names: Vec<&str> = data.text_styles.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["body/sm", "heading/lg"]);

        let heading = &data.text_styles[1];
        assert_eq!(heading.id.as_deref(), Some("S:1"));
        assert_eq!(
            heading
                .bound_variables
                .get(TypographyProperty::FontSize)
                .map(|r| r.id.as_str()),
            Some("V:1")
        );
        assert_eq!(data.text_styles[0].bound_variables, TextStyleBindings::default());
    }

    #[test]
    fn deep_documents_convert_without_recursion() {
        let mut node = json!({ "id": "leaf", "type": "FRAME" });
        for i in 0..100 {
            node = json!({ "id": format!("n{i}"), "type": "FRAME", "children": [node] });
        }
        let root: RestNode = serde_json::from_value(node).unwrap();
        let mut sources = HashMap::new();
        let converted = convert_node(root, &mut sources).unwrap();
        assert_eq!(converted.id, "n99");
        assert_eq!(converted.children[0].id, "n98");
    }

    #[test]
    fn debug_redacts_token() {
        let client = RestClient::new("https://example.test/", "secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("https://example.test\""));
    }
}
