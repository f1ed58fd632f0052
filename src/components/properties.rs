//! Property bags of component nodes.

use indexmap::IndexMap;
use serde_json::Value;

use super::{PropertyBag, PropertyValue, VariantProperty};
use crate::color::{rgb_to_hex, rgba_to_string};
use crate::figma::{ComponentMeta, FigmaEffect, FigmaPaint, FigmaTypeStyle, Node};

/// Builds a bag that only receives the values that are actually present.
#[derive(Default)]
struct BagBuilder(PropertyBag);

impl BagBuilder {
    fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    fn set_opt<T: Into<PropertyValue>>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    fn set_text(&mut self, key: &str, value: Option<&str>) {
        self.set_opt(key, value.filter(|s| !s.is_empty()));
    }

    fn finish(self) -> PropertyBag {
        self.0
    }
}

fn paint(paint: &FigmaPaint) -> PropertyValue {
    let mut bag = BagBuilder::default();
    bag.set("type", paint.paint_type.as_str());
    bag.set_opt("color", paint.color.as_ref().map(rgb_to_hex));
    bag.set_opt("opacity", paint.opacity);
    bag.finish().into()
}

fn effect(effect: &FigmaEffect) -> PropertyValue {
    let mut bag = BagBuilder::default();
    bag.set("type", effect.effect_type.as_str());
    bag.set_opt("visible", effect.visible);
    bag.set_opt("radius", effect.radius);
    bag.set_opt("color", effect.color.as_ref().map(rgba_to_string));
    if let Some(offset) = effect.offset {
        let mut xy = BagBuilder::default();
        xy.set("x", offset.x);
        xy.set("y", offset.y);
        bag.set("offset", xy.finish());
    }
    bag.finish().into()
}

fn text_style(style: &FigmaTypeStyle) -> PropertyValue {
    let mut bag = BagBuilder::default();
    bag.set_text("fontFamily", style.font_family.as_deref());
    bag.set_opt("fontSize", style.font_size);
    bag.set_opt("fontWeight", style.font_weight);
    let line_height = style
        .line_height_px
        .filter(|px| *px != 0.0)
        .or(style.line_height_percent);
    bag.set_opt("lineHeight", line_height);
    bag.set_opt("letterSpacing", style.letter_spacing);
    bag.set_text("textCase", style.text_case.as_deref());
    bag.finish().into()
}

fn numbers(values: &[f64]) -> PropertyValue {
    values
        .iter()
        .map(|value| PropertyValue::Number(*value))
        .collect::<Vec<_>>()
        .into()
}

/// Everything the node says about itself that is useful to a code generator.
/// Absent fields are left out rather than written as null.
pub fn node_properties(node: &Node) -> PropertyBag {
    let mut bag = BagBuilder::default();

    bag.set_text("nodeType", Some(node.node_type.as_str()));
    bag.set_opt("visible", node.visible);
    if let Some(bbox) = node.absolute_bounding_box {
        bag.set("width", bbox.width);
        bag.set("height", bbox.height);
    }

    bag.set_text("layoutMode", node.layout_mode.as_deref());
    bag.set_text("primaryAxisSizingMode", node.primary_axis_sizing_mode.as_deref());
    bag.set_text("counterAxisSizingMode", node.counter_axis_sizing_mode.as_deref());
    bag.set_opt("itemSpacing", node.item_spacing);

    bag.set_opt("paddingLeft", node.padding_left);
    bag.set_opt("paddingRight", node.padding_right);
    bag.set_opt("paddingTop", node.padding_top);
    bag.set_opt("paddingBottom", node.padding_bottom);

    bag.set_opt("cornerRadius", node.corner_radius);
    bag.set_opt(
        "cornerRadii",
        node.rectangle_corner_radii.as_deref().map(numbers),
    );

    if !node.fills.is_empty() {
        bag.set("fills", node.fills.iter().map(paint).collect::<Vec<_>>());
    }
    if !node.strokes.is_empty() {
        bag.set("strokes", node.strokes.iter().map(paint).collect::<Vec<_>>());
    }
    bag.set_opt("strokeWeight", node.stroke_weight);

    if !node.effects.is_empty() {
        bag.set("effects", node.effects.iter().map(effect).collect::<Vec<_>>());
    }

    bag.set_opt("textStyle", node.style.as_ref().map(text_style));

    bag.finish()
}

/// What the file listing alone says about a component whose node is missing.
pub fn metadata_properties(meta: &ComponentMeta) -> PropertyBag {
    let mut bag = BagBuilder::default();
    bag.set_opt("componentKey", meta.key.clone());
    bag.set_opt("remote", meta.remote);
    bag.set(
        "documentationLinks",
        meta.documentation_links
            .iter()
            .filter_map(PropertyValue::from_json)
            .collect::<Vec<_>>(),
    );
    bag.finish()
}

/// Variant properties declared on a component set node.
///
/// A definition that is not an object still yields an entry with no type,
/// no default and no options. Only a `null` definition fails, which makes
/// the whole component set unusable.
pub fn variant_definitions(node: &Node) -> Result<IndexMap<String, VariantProperty>, String> {
    let Some(definitions) = &node.component_property_definitions else {
        return Ok(IndexMap::new());
    };

    definitions
        .iter()
        .map(|(name, definition)| {
            if definition.is_null() {
                return Err(format!("property definition {name} is null"));
            }
            let options: Vec<PropertyValue> = definition
                .get("variantOptions")
                .and_then(Value::as_array)
                .map(|options| options.iter().filter_map(PropertyValue::from_json).collect())
                .unwrap_or_default();

            Ok((
                name.clone(),
                VariantProperty {
                    property_type: definition.get("type").and_then(PropertyValue::from_json),
                    default_value: definition
                        .get("defaultValue")
                        .and_then(PropertyValue::from_json),
                    variant_options: options,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rich_bag_from_auto_layout_frame() {
        let node = node(json!({
            "id": "1:1",
            "type": "COMPONENT",
            "visible": true,
            "absoluteBoundingBox": {"x": 0, "y": 0, "width": 96, "height": 40},
            "layoutMode": "HORIZONTAL",
            "primaryAxisSizingMode": "AUTO",
            "itemSpacing": 0,
            "paddingLeft": 16,
            "paddingRight": 16,
            "cornerRadius": 8,
            "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0.478, "b": 1, "a": 1}, "opacity": 0.5}],
            "strokes": [{"type": "GRADIENT_LINEAR"}],
            "strokeWeight": 1,
            "effects": [{"type": "DROP_SHADOW", "visible": true, "radius": 4,
                         "color": {"r": 0, "g": 0, "b": 0, "a": 0.1}, "offset": {"x": 0, "y": 2}}]
        }));

        let value = serde_json::to_value(node_properties(&node)).unwrap();
        assert_eq!(
            value,
            json!({
                "nodeType": "COMPONENT",
                "visible": true,
                "width": 96,
                "height": 40,
                "layoutMode": "HORIZONTAL",
                "primaryAxisSizingMode": "AUTO",
                "itemSpacing": 0,
                "paddingLeft": 16,
                "paddingRight": 16,
                "cornerRadius": 8,
                "fills": [{"type": "SOLID", "color": "#007AFF", "opacity": 0.5}],
                "strokes": [{"type": "GRADIENT_LINEAR"}],
                "strokeWeight": 1,
                "effects": [{"type": "DROP_SHADOW", "visible": true, "radius": 4,
                             "color": "rgba(0, 0, 0, 0.1)", "offset": {"x": 0, "y": 2}}]
            })
        );
    }

    #[test]
    fn text_style_prefers_pixel_line_height() {
        let text = node(json!({
            "id": "1:2",
            "type": "TEXT",
            "style": {"fontFamily": "Inter", "fontSize": 14, "fontWeight": 500,
                      "lineHeightPx": 0, "lineHeightPercent": 140, "textCase": "UPPER"},
            "rectangleCornerRadii": [2, 2, 0, 0]
        }));
        let value = serde_json::to_value(node_properties(&text)).unwrap();
        assert_eq!(
            value["textStyle"],
            json!({"fontFamily": "Inter", "fontSize": 14, "fontWeight": 500,
                   "lineHeight": 140, "textCase": "UPPER"})
        );
        assert_eq!(value["cornerRadii"], json!([2, 2, 0, 0]));
    }

    #[test]
    fn bare_node_has_only_its_type() {
        let bare = node(json!({"id": "1:3", "type": "COMPONENT"}));
        let keys: Vec<_> = node_properties(&bare).into_keys().collect();
        assert_eq!(keys, vec!["nodeType"]);
    }

    #[test]
    fn metadata_bag_always_lists_documentation_links() {
        let meta: ComponentMeta = serde_json::from_value(json!({"name": "Anonymous"})).unwrap();
        let value = serde_json::to_value(metadata_properties(&meta)).unwrap();
        assert_eq!(value, json!({"documentationLinks": []}));
    }

    #[test]
    fn variant_options_default_to_empty() {
        let set = node(json!({
            "id": "2:1",
            "type": "COMPONENT_SET",
            "componentPropertyDefinitions": {
                "State": {"type": "VARIANT", "defaultValue": "default"},
                "Label": {"type": "TEXT", "defaultValue": "Click"}
            }
        }));
        let variants = variant_definitions(&set).unwrap();
        assert_eq!(variants.len(), 2);
        assert!(variants["State"].variant_options.is_empty());
        assert_eq!(
            variants["Label"].default_value.as_ref().and_then(PropertyValue::as_str),
            Some("Click")
        );
    }

    #[test]
    fn scalar_definition_becomes_an_empty_entry() {
        let set = node(json!({
            "id": "2:1",
            "type": "COMPONENT_SET",
            "componentPropertyDefinitions": {"Size": "large"}
        }));
        let variants = variant_definitions(&set).unwrap();
        assert_eq!(
            variants["Size"],
            VariantProperty {
                property_type: None,
                default_value: None,
                variant_options: Vec::new(),
            }
        );
    }

    #[test]
    fn null_definition_is_an_error() {
        let set = node(json!({
            "id": "2:1",
            "type": "COMPONENT_SET",
            "componentPropertyDefinitions": {"Size": null}
        }));
        let err = variant_definitions(&set).unwrap_err();
        assert!(err.contains("Size"));
    }
}
