//! Tokens mined from raw node geometry, ranked by how often each value occurs.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use super::TokenMap;
use crate::figma::{for_each_node, Node};
use crate::scale::{radius_bucket, spacing_bucket, stroke_bucket};

pub const SPACING_TOKEN_LIMIT: usize = 15;
pub const RADIUS_TOKEN_LIMIT: usize = 10;
pub const STROKE_TOKEN_LIMIT: usize = 10;

/// Occurrence count per distinct value, in first-seen order.
#[derive(Debug, Default)]
struct Frequencies(IndexMap<OrderedFloat<f64>, usize>);

impl Frequencies {
    fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        *self.0.entry(OrderedFloat(value)).or_insert(0) += 1;
    }

    fn add_non_zero(&mut self, value: Option<f64>) {
        if let Some(value) = value.filter(|v| *v != 0.0) {
            self.add(value);
        }
    }

    /// The `limit` most frequent values named by `label`. Equal counts keep
    /// first-seen order; values landing on the same label overwrite each other.
    fn into_tokens(self, limit: usize, label: impl Fn(f64) -> String) -> TokenMap<f64> {
        let mut ranked: Vec<_> = self.0.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut tokens = TokenMap::new();
        for (OrderedFloat(value), _) in ranked.into_iter().take(limit) {
            tokens.insert(label(value), value);
        }
        tokens
    }
}

fn count(document: Option<&Node>, mut visit: impl FnMut(&Node, &mut Frequencies)) -> Frequencies {
    let mut counts = Frequencies::default();
    if let Some(root) = document {
        for_each_node(root, |node| visit(node, &mut counts));
    }
    counts
}

/// Auto-layout gaps and left/top padding.
pub(crate) fn spacing_from_nodes(document: Option<&Node>) -> TokenMap<f64> {
    count(document, |node, counts| {
        if node.layout_mode.as_deref().is_some_and(|mode| !mode.is_empty()) {
            counts.add_non_zero(node.item_spacing);
        }
        counts.add_non_zero(node.padding_left);
        counts.add_non_zero(node.padding_top);
    })
    .into_tokens(SPACING_TOKEN_LIMIT, |value| {
        spacing_bucket(value).to_string()
    })
}

/// Corner radii of rectangles and frames.
pub(crate) fn radius_from_nodes(document: Option<&Node>) -> TokenMap<f64> {
    count(document, |node, counts| {
        if node.node_type != "RECTANGLE" && node.node_type != "FRAME" {
            return;
        }
        counts.add_non_zero(node.corner_radius);
        if let Some(radii) = &node.rectangle_corner_radii {
            for radius in radii {
                counts.add(*radius);
            }
        }
    })
    .into_tokens(RADIUS_TOKEN_LIMIT, |value| radius_bucket(value).to_string())
}

pub(crate) fn stroke_from_nodes(document: Option<&Node>) -> TokenMap<f64> {
    count(document, |node, counts| counts.add_non_zero(node.stroke_weight))
        .into_tokens(STROKE_TOKEN_LIMIT, |value| stroke_bucket(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(children: serde_json::Value) -> Node {
        serde_json::from_value(json!({"id": "0:0", "type": "DOCUMENT", "children": children}))
            .unwrap()
    }

    #[test]
    fn spacing_counts_gaps_only_on_auto_layout() {
        let doc = document(json!([
            {"id": "1", "type": "FRAME", "layoutMode": "HORIZONTAL", "itemSpacing": 8, "paddingLeft": 16, "paddingTop": 16},
            {"id": "2", "type": "FRAME", "itemSpacing": 40, "paddingLeft": 0},
            {"id": "3", "type": "FRAME", "layoutMode": "VERTICAL", "itemSpacing": 8}
        ]));
        let spacing = spacing_from_nodes(Some(&doc));
        let entries: Vec<_> = spacing.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("md", 8.0), ("xl", 16.0)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let doc = document(json!([
            {"id": "1", "type": "FRAME", "paddingLeft": 24},
            {"id": "2", "type": "FRAME", "paddingLeft": 4},
            {"id": "3", "type": "FRAME", "paddingLeft": 48, "paddingTop": 48}
        ]));
        let keys: Vec<_> = spacing_from_nodes(Some(&doc)).keys().cloned().collect();
        assert_eq!(keys, vec!["4xl", "2xl", "sm"]);
    }

    #[test]
    fn same_label_keeps_the_less_frequent_value() {
        let doc = document(json!([
            {"id": "1", "type": "FRAME", "paddingLeft": 8, "paddingTop": 8},
            {"id": "2", "type": "FRAME", "paddingLeft": 6}
        ]));
        let spacing = spacing_from_nodes(Some(&doc));
        assert_eq!(spacing.len(), 1);
        assert_eq!(spacing["md"], 6.0);
    }

    #[test]
    fn radius_reads_rectangles_and_frames_only() {
        let doc = document(json!([
            {"id": "1", "type": "RECTANGLE", "cornerRadius": 4},
            {"id": "2", "type": "FRAME", "rectangleCornerRadii": [0, 0, 9999, 9999]},
            {"id": "3", "type": "ELLIPSE", "cornerRadius": 12}
        ]));
        let radius = radius_from_nodes(Some(&doc));
        let entries: Vec<_> = radius.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("none", 0.0), ("full", 9999.0), ("md", 4.0)]);
    }

    #[test]
    fn stroke_ranks_by_frequency() {
        let doc = document(json!([
            {"id": "1", "type": "RECTANGLE", "strokeWeight": 1},
            {"id": "2", "type": "RECTANGLE", "strokeWeight": 2},
            {"id": "3", "type": "RECTANGLE", "strokeWeight": 2},
            {"id": "4", "type": "RECTANGLE", "strokeWeight": 0}
        ]));
        let keys: Vec<_> = stroke_from_nodes(Some(&doc)).keys().cloned().collect();
        assert_eq!(keys, vec!["normal", "thin"]);
    }

    #[test]
    fn limit_caps_distinct_values() {
        let children: Vec<_> = (1..=20)
            .map(|i| json!({"id": format!("{i}"), "type": "RECTANGLE", "strokeWeight": i}))
            .collect();
        let doc = document(json!(children));
        let mut counts = Frequencies::default();
        for_each_node(&doc, |node| counts.add_non_zero(node.stroke_weight));
        let tokens = counts.into_tokens(STROKE_TOKEN_LIMIT, |value| format!("w{value}"));
        assert_eq!(tokens.len(), STROKE_TOKEN_LIMIT);
        assert!(tokens.contains_key("w1"));
        assert!(!tokens.contains_key("w11"));
    }

    #[test]
    fn missing_document_yields_nothing() {
        assert!(spacing_from_nodes(None).is_empty());
        assert!(radius_from_nodes(None).is_empty());
        assert!(stroke_from_nodes(None).is_empty());
    }
}
