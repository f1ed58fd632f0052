//! Figma API response types for parsing JSON from the Figma REST API.
//!
//! Only the fields the extractors read are modelled; everything else in the
//! payloads is ignored. Keyed collections use [`IndexMap`] so extraction sees
//! entries in the order Figma sent them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::null_as_default;

/// A Figma file response from the files endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub document: Option<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: IndexMap<String, ComponentMeta>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_sets: IndexMap<String, ComponentMeta>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: IndexMap<String, StyleData>,
}

/// One node of the document tree.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Node>,
    pub visible: Option<bool>,
    pub absolute_bounding_box: Option<FigmaBoundingBox>,
    pub layout_mode: Option<String>,
    pub primary_axis_sizing_mode: Option<String>,
    pub counter_axis_sizing_mode: Option<String>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fills: Vec<FigmaPaint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strokes: Vec<FigmaPaint>,
    pub stroke_weight: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub effects: Vec<FigmaEffect>,
    pub style: Option<FigmaTypeStyle>,
    /// Raw variant/property definitions of a component set. Kept untyped so a
    /// single malformed definition only affects its own component.
    pub component_property_definitions: Option<IndexMap<String, Value>>,
}

/// Bounding box coordinates from Figma.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaBoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Typography style from Figma.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_px: Option<f64>,
    pub line_height_percent: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_case: Option<String>,
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaPaint {
    #[serde(rename = "type", default)]
    pub paint_type: String,
    pub color: Option<FigmaColor>,
    pub opacity: Option<f64>,
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct FigmaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default)]
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct FigmaVector {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Shadow or blur effect attached to a node or effect style.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaEffect {
    #[serde(rename = "type", default)]
    pub effect_type: String,
    pub visible: Option<bool>,
    pub radius: Option<f64>,
    pub spread: Option<f64>,
    pub color: Option<FigmaColor>,
    pub offset: Option<FigmaVector>,
}

/// Entry of the file's `styles` map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleData {
    pub name: Option<String>,
    pub style_type: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fills: Vec<FigmaPaint>,
    pub style: Option<FigmaTypeStyle>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub effects: Vec<FigmaEffect>,
}

/// Entry of the file's `components` or `componentSets` map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub key: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub remote: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documentation_links: Vec<Value>,
}

/// Response from the published styles endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylesResponse {
    #[serde(default)]
    pub meta: StylesMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylesMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub styles: Vec<PublishedStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleType {
    Fill,
    Text,
    Effect,
    Grid,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishedStyle {
    #[serde(default)]
    pub key: String,
    pub style_type: StyleType,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub node_id: Option<String>,
}

/// Response from the published components endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentsResponse {
    #[serde(default)]
    pub meta: ComponentsMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentsMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<PublishedComponent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishedComponent {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub node_id: Option<String>,
    pub file_key: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Response from the local variables endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariablesResponse {
    #[serde(default)]
    pub meta: VariablesMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: IndexMap<String, Variable>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variable_collections: IndexMap<String, VariableCollection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Color,
    Float,
    String,
    Boolean,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variable_collection_id: String,
    pub resolved_type: VariableType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values_by_mode: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub default_mode_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modes: Vec<VariableMode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    #[serde(default)]
    pub name: String,
}
