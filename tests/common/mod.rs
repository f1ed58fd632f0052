//! Saved Figma responses shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;

pub fn file_json() -> Value {
    json!({
        "name": "Design Kit",
        "lastModified": "2024-05-01T12:00:00Z",
        "version": "4242",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "name": "Page 1",
                "type": "CANVAS",
                "children": [{
                    "id": "1:0",
                    "name": "Toolbar",
                    "type": "FRAME",
                    "layoutMode": "HORIZONTAL",
                    "itemSpacing": 8,
                    "paddingLeft": 16,
                    "cornerRadius": 4,
                    "strokeWeight": 1,
                    "children": [{
                        "id": "1:1",
                        "name": "Button",
                        "type": "COMPONENT",
                        "absoluteBoundingBox": {"x": 0, "y": 0, "width": 120, "height": 40},
                        "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0.478, "b": 1, "a": 1}}]
                    }]
                }]
            }]
        },
        "components": {
            "1:1": {"key": "btn", "name": "Button", "description": "Primary action", "remote": false, "documentationLinks": []}
        },
        "componentSets": {},
        "styles": {
            "k-brand": {
                "name": "Brand/Primary",
                "styleType": "FILL",
                "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0.478, "b": 1, "a": 1}}]
            }
        }
    })
}

pub fn styles_json() -> Value {
    json!({
        "meta": {"styles": [
            {"key": "k-brand", "style_type": "FILL", "name": "Brand/Primary"},
            {"key": "k-missing", "style_type": "TEXT", "name": "Heading/H1"}
        ]}
    })
}

pub fn components_json() -> Value {
    json!({
        "meta": {"components": [
            {"key": "icon", "name": "Icon", "node_id": "3:1", "file_key": "AbC123"}
        ]}
    })
}

pub fn variables_json() -> Value {
    json!({
        "meta": {
            "variables": {
                "V:1": {
                    "id": "V:1",
                    "name": "Spacing/MD",
                    "variableCollectionId": "C:1",
                    "resolvedType": "FLOAT",
                    "valuesByMode": {"M:1": 12}
                }
            },
            "variableCollections": {
                "C:1": {"id": "C:1", "name": "Tokens", "defaultModeId": "M:1",
                        "modes": [{"modeId": "M:1", "name": "Default"}]}
            }
        }
    })
}

/// Write all four responses into `dir` in the layout `DirectorySource` reads.
pub fn write_fixture_dir(dir: &Path) {
    for (name, value) in [
        ("file.json", file_json()),
        ("styles.json", styles_json()),
        ("components.json", components_json()),
        ("variables.json", variables_json()),
    ] {
        std::fs::write(dir.join(name), value.to_string()).expect("write fixture");
    }
}
