//! Component spec extraction.
//!
//! Sources are consulted in this order:
//! 1. local components and component sets of the file (always both),
//! 2. published components (appended when present),
//! 3. a scan of the document for component nodes, only when 1-2 found nothing,
//! 4. built-in sample components, only when everything else found nothing.

mod fallback;
mod properties;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::extraction::{record_skip, Extraction, SkippedItem};
use crate::figma::{
    collect_nodes, find_node_by_id, ComponentMeta, ComponentsResponse, FigmaFile, Node,
    PublishedComponent,
};
use crate::serde_helpers::whole_number;

pub use fallback::fallback_components;
pub use properties::{metadata_properties, node_properties, variant_definitions};

pub const COMPONENT: &str = "component";
pub const COMPONENT_SET: &str = "component-set";
pub const PUBLISHED_COMPONENT: &str = "published-component";

/// Open attribute bag of a component.
pub type PropertyBag = IndexMap<String, PropertyValue>;

/// A value inside a [`PropertyBag`]. Serialized as plain JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<PropertyValue>),
    Record(PropertyBag),
}

impl PropertyValue {
    /// Convert arbitrary JSON; `null` has no counterpart and is dropped,
    /// including inside lists and records.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(PropertyValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(PropertyValue::Number),
            Value::String(s) => Some(PropertyValue::Text(s.clone())),
            Value::Array(items) => Some(PropertyValue::List(
                items.iter().filter_map(PropertyValue::from_json).collect(),
            )),
            Value::Object(map) => Some(PropertyValue::Record(
                map.iter()
                    .filter_map(|(key, item)| {
                        PropertyValue::from_json(item).map(|item| (key.clone(), item))
                    })
                    .collect(),
            )),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Text(s) => serializer.serialize_str(s),
            PropertyValue::Number(n) => whole_number(n, serializer),
            PropertyValue::Bool(b) => serializer.serialize_bool(*b),
            PropertyValue::List(items) => serializer.collect_seq(items),
            PropertyValue::Record(map) => serializer.collect_map(map),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        PropertyValue::List(value)
    }
}

impl From<PropertyBag> for PropertyValue {
    fn from(value: PropertyBag) -> Self {
        PropertyValue::Record(value)
    }
}

/// One variant property of a component set.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<PropertyValue>,
    pub variant_options: Vec<PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComponentSpec {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub properties: PropertyBag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<IndexMap<String, VariantProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The component-specs document of the file-based path.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpecsDocument {
    pub components: Vec<ComponentSpec>,
    pub version: String,
    pub last_modified: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn local_component(id: &str, meta: &ComponentMeta, document: Option<&Node>) -> ComponentSpec {
    let label = non_empty(meta.name.as_deref()).unwrap_or(id);
    let properties = match document.and_then(|root| find_node_by_id(root, id)) {
        Some(node) => {
            let properties = node_properties(node);
            log::debug!("component {label}: {} properties", properties.len());
            properties
        }
        None => {
            log::warn!("component node not found for {label}, using metadata only");
            metadata_properties(meta)
        }
    };

    ComponentSpec {
        id: id.to_string(),
        name: non_empty(meta.name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Component {id}")),
        component_type: COMPONENT.to_string(),
        properties,
        variants: None,
        description: Some(
            non_empty(meta.description.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Local component: {label}")),
        ),
    }
}

fn component_set(
    id: &str,
    meta: &ComponentMeta,
    document: Option<&Node>,
) -> Result<ComponentSpec, String> {
    let label = non_empty(meta.name.as_deref()).unwrap_or(id);
    let (properties, variants) = match document.and_then(|root| find_node_by_id(root, id)) {
        Some(node) => (node_properties(node), variant_definitions(node)?),
        None => {
            log::warn!("component set node not found for {label}, using metadata only");
            (metadata_properties(meta), IndexMap::new())
        }
    };

    Ok(ComponentSpec {
        id: id.to_string(),
        name: non_empty(meta.name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("ComponentSet {id}")),
        component_type: COMPONENT_SET.to_string(),
        properties,
        variants: Some(variants),
        description: Some(
            non_empty(meta.description.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Component set with variants: {label}")),
        ),
    })
}

fn published_component(component: &PublishedComponent) -> ComponentSpec {
    let mut properties = PropertyBag::new();
    let fields = [
        ("nodeId", &component.node_id),
        ("fileKey", &component.file_key),
        ("thumbnailUrl", &component.thumbnail_url),
        ("createdAt", &component.created_at),
        ("updatedAt", &component.updated_at),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            properties.insert(key.to_string(), value.as_str().into());
        }
    }

    ComponentSpec {
        id: component.key.clone(),
        name: component.name.clone(),
        component_type: PUBLISHED_COMPONENT.to_string(),
        properties,
        variants: None,
        description: Some(
            non_empty(component.description.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Published component: {}", component.name)),
        ),
    }
}

fn scanned_component(node: &Node) -> ComponentSpec {
    let mut properties = PropertyBag::new();
    properties.insert("nodeType".to_string(), node.node_type.as_str().into());
    properties.insert(
        "visible".to_string(),
        node.visible.unwrap_or(true).into(),
    );
    if let Some(bbox) = node.absolute_bounding_box {
        let record: PropertyBag = [
            ("x", bbox.x),
            ("y", bbox.y),
            ("width", bbox.width),
            ("height", bbox.height),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.into()))
        .collect();
        properties.insert("absoluteBoundingBox".to_string(), record.into());
    }

    ComponentSpec {
        id: node.id.clone(),
        name: node.name.clone(),
        component_type: node.node_type.to_lowercase(),
        properties,
        variants: None,
        description: Some(format!("Component extracted from file: {}", node.name)),
    }
}

/// Every `COMPONENT` and `COMPONENT_SET` node of the document, in pre-order.
pub fn scan_document(document: &Node) -> Vec<ComponentSpec> {
    collect_nodes(document, |node| {
        node.node_type == "COMPONENT" || node.node_type == "COMPONENT_SET"
    })
    .into_iter()
    .map(scanned_component)
    .collect()
}

/// Build the component list for one file. The result is never empty.
pub fn extract_components(
    file: &FigmaFile,
    published: &ComponentsResponse,
) -> Extraction<Vec<ComponentSpec>> {
    let document = file.document.as_ref();
    let mut specs = Vec::new();
    let mut skipped: Vec<SkippedItem> = Vec::new();

    if !file.components.is_empty() {
        log::info!("extracting {} local components", file.components.len());
    }
    for (id, meta) in &file.components {
        specs.push(local_component(id, meta, document));
    }

    if !file.component_sets.is_empty() {
        log::info!("extracting {} component sets", file.component_sets.len());
    }
    for (id, meta) in &file.component_sets {
        match component_set(id, meta, document) {
            Ok(spec) => specs.push(spec),
            Err(reason) => record_skip(
                &mut skipped,
                format!(
                    "component set {}",
                    non_empty(meta.name.as_deref()).unwrap_or(id)
                ),
                reason,
            ),
        }
    }

    let published = &published.meta.components;
    if !published.is_empty() {
        log::info!("adding {} published components", published.len());
        specs.extend(published.iter().map(published_component));
    }

    if specs.is_empty() {
        if let Some(root) = document {
            log::info!("no listed components, scanning the document tree");
            specs.extend(scan_document(root));
        }
    }

    if specs.is_empty() {
        log::warn!("no components found, using sample components");
        specs = fallback_components();
    }

    log::info!("extracted {} components", specs.len());
    Extraction::new(specs, skipped)
}

/// [`extract_components`] wrapped with the file's version metadata.
pub fn component_specs_document(
    file: &FigmaFile,
    published: &ComponentsResponse,
) -> Extraction<ComponentSpecsDocument> {
    extract_components(file, published).map(|components| ComponentSpecsDocument {
        components,
        version: file.version.clone(),
        last_modified: file.last_modified.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(value: serde_json::Value) -> FigmaFile {
        serde_json::from_value(value).unwrap()
    }

    fn no_published() -> ComponentsResponse {
        ComponentsResponse::default()
    }

    #[test]
    fn empty_file_yields_the_three_samples() {
        let file = file(json!({
            "document": {"id": "0:0", "type": "DOCUMENT", "children": [
                {"id": "1:0", "type": "CANVAS", "children": [{"id": "1:1", "type": "FRAME"}]}
            ]}
        }));
        let extraction = extract_components(&file, &no_published());
        let ids: Vec<_> = extraction.value.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["button-component", "input-component", "card-component"]);
    }

    #[test]
    fn missing_node_yields_metadata_only() {
        let file = file(json!({
            "document": {"id": "0:0", "type": "DOCUMENT"},
            "components": {
                "9:9": {"key": "abc123", "name": "Ghost", "remote": false}
            }
        }));
        let specs = extract_components(&file, &no_published()).value;
        assert_eq!(specs.len(), 1);
        let keys: Vec<_> = specs[0].properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["componentKey", "remote", "documentationLinks"]);
        assert_eq!(specs[0].description.as_deref(), Some("Local component: Ghost"));
    }

    #[test]
    fn local_components_and_sets_both_run() {
        let file = file(json!({
            "document": {"id": "0:0", "type": "DOCUMENT", "children": [
                {"id": "1:1", "type": "COMPONENT", "name": "Button", "cornerRadius": 6,
                 "absoluteBoundingBox": {"x": 0, "y": 0, "width": 120, "height": 40}},
                {"id": "2:1", "type": "COMPONENT_SET", "name": "Chip",
                 "componentPropertyDefinitions": {
                    "Size": {"type": "VARIANT", "defaultValue": "md", "variantOptions": ["sm", "md"]}
                 }}
            ]},
            "components": {"1:1": {"key": "k1", "name": "Button"}},
            "componentSets": {"2:1": {"key": "k2", "name": "Chip"}}
        }));

        let specs = extract_components(&file, &no_published()).value;
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].component_type, "component");
        assert_eq!(specs[0].properties["width"], PropertyValue::Number(120.0));
        assert_eq!(specs[1].component_type, "component-set");

        let value = serde_json::to_value(&specs[1]).unwrap();
        assert_eq!(
            value["variants"],
            json!({"Size": {"type": "VARIANT", "defaultValue": "md", "variantOptions": ["sm", "md"]}})
        );
        assert_eq!(value["description"], "Component set with variants: Chip");
    }

    #[test]
    fn component_set_without_node_has_empty_variants() {
        let file = file(json!({
            "componentSets": {"5:5": {"key": "k"}}
        }));
        let specs = extract_components(&file, &no_published()).value;
        assert_eq!(specs[0].name, "ComponentSet 5:5");
        assert_eq!(specs[0].variants, Some(IndexMap::new()));
        assert_eq!(
            specs[0].description.as_deref(),
            Some("Component set with variants: 5:5")
        );
    }

    #[test]
    fn malformed_variant_definition_skips_only_that_set() {
        let file = file(json!({
            "document": {"id": "0:0", "type": "DOCUMENT", "children": [
                {"id": "2:1", "type": "COMPONENT_SET", "componentPropertyDefinitions": {"Size": null}},
                {"id": "3:1", "type": "COMPONENT_SET", "componentPropertyDefinitions": {}}
            ]},
            "componentSets": {
                "2:1": {"name": "Broken"},
                "3:1": {"name": "Fine"}
            }
        }));
        let extraction = extract_components(&file, &no_published());
        assert_eq!(extraction.value.len(), 1);
        assert_eq!(extraction.value[0].name, "Fine");
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].item, "component set Broken");
    }

    #[test]
    fn scalar_variant_definition_keeps_the_set() {
        let file = file(json!({
            "document": {"id": "0:0", "type": "DOCUMENT", "children": [
                {"id": "2:1", "type": "COMPONENT_SET", "componentPropertyDefinitions": {
                    "Size": "large",
                    "State": {"type": "VARIANT", "defaultValue": "on", "variantOptions": ["on", "off"]}
                }}
            ]},
            "componentSets": {"2:1": {"name": "Toggle"}}
        }));
        let extraction = extract_components(&file, &no_published());
        assert!(extraction.skipped.is_empty());
        assert_eq!(extraction.value.len(), 1);

        let spec = serde_json::to_value(&extraction.value[0]).unwrap();
        assert_eq!(spec["name"], "Toggle");
        assert_eq!(spec["variants"]["Size"], json!({"variantOptions": []}));
        assert_eq!(spec["variants"]["State"]["variantOptions"], json!(["on", "off"]));
    }

    #[test]
    fn published_components_are_appended() {
        let file = file(json!({}));
        let published: ComponentsResponse = serde_json::from_value(json!({
            "meta": {"components": [
                {"key": "pub1", "name": "Avatar", "node_id": "7:7", "file_key": "FILE", "description": ""}
            ]}
        }))
        .unwrap();

        let specs = extract_components(&file, &published).value;
        assert_eq!(specs.len(), 1);
        let value = serde_json::to_value(&specs[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "pub1",
                "name": "Avatar",
                "type": "published-component",
                "properties": {"nodeId": "7:7", "fileKey": "FILE"},
                "description": "Published component: Avatar"
            })
        );
    }

    #[test]
    fn document_scan_runs_only_when_nothing_is_listed() {
        let file = file(json!({
            "document": {"id": "0:0", "type": "DOCUMENT", "children": [
                {"id": "1:1", "type": "COMPONENT", "name": "Icon", "visible": false},
                {"id": "1:2", "type": "COMPONENT_SET", "name": "Tabs",
                 "absoluteBoundingBox": {"x": 10, "y": 20, "width": 300, "height": 48}}
            ]}
        }));
        let specs = extract_components(&file, &no_published()).value;
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].component_type, "component");
        assert_eq!(specs[0].properties["visible"], PropertyValue::Bool(false));
        assert_eq!(specs[1].component_type, "component_set");

        let value = serde_json::to_value(&specs[1]).unwrap();
        assert_eq!(
            value["properties"],
            json!({
                "nodeType": "COMPONENT_SET",
                "visible": true,
                "absoluteBoundingBox": {"x": 10, "y": 20, "width": 300, "height": 48}
            })
        );
        assert_eq!(value["description"], "Component extracted from file: Tabs");
    }

    #[test]
    fn property_values_drop_nulls() {
        let value = PropertyValue::from_json(&json!({"a": null, "b": [1, null, "x"]})).unwrap();
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"b": [1, "x"]})
        );
    }

    #[test]
    fn specs_document_carries_file_metadata() {
        let file = file(json!({"version": "123", "lastModified": "2024-01-01T00:00:00Z"}));
        let doc = component_specs_document(&file, &no_published()).value;
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["version"], "123");
        assert_eq!(value["lastModified"], "2024-01-01T00:00:00Z");
        assert_eq!(value["components"].as_array().unwrap().len(), 3);
    }
}
