use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::error::ErrorPayload;
use crate::extraction::SkippedItem;
use crate::tokens::DesignTokens;

/// Schema version for output payloads.
pub const DTX_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DtxOutput {
    Extract(ExtractOutput),
    AnalyzeImage(AnalyzeImageOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutput {
    pub version: String,
    pub file_key: String,
    pub file_name: String,
    pub tokens_path: PathBuf,
    pub components_path: PathBuf,
    pub counts: TokenCounts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCounts {
    pub color: usize,
    pub typography: usize,
    pub spacing: usize,
    pub effects: usize,
    pub border_radius: usize,
    pub stroke_weight: usize,
    pub components: usize,
}

impl TokenCounts {
    pub fn new(tokens: &DesignTokens, components: usize) -> Self {
        Self {
            color: tokens.color.len(),
            typography: tokens.typography.len(),
            spacing: tokens.spacing.len(),
            effects: tokens.effects.len(),
            border_radius: tokens.border_radius.len(),
            stroke_weight: tokens.stroke_weight.len(),
            components,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageOutput {
    pub version: String,
    pub image: PathBuf,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_count: Option<usize>,
    /// Inline document, present when no output path was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
