//! Figma document model and traversal.
//!
//! This module provides:
//! - API types for parsing Figma JSON responses (file, styles, components, variables)
//! - [`walker`] - Depth-first traversal used by the token and component extractors

pub mod api_types;
pub mod walker;


pub use api_types::{
    ComponentMeta, ComponentsResponse, FigmaBoundingBox, FigmaColor, FigmaEffect, FigmaFile,
    FigmaPaint, FigmaTypeStyle, FigmaVector, Node, PublishedComponent, PublishedStyle, StyleData,
    StyleType, StylesResponse, Variable, VariableCollection, VariableType, VariablesResponse,
};
pub use walker::{collect_nodes, find_node_by_id, for_each_node, walk, Walk};
