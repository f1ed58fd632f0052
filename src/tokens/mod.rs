//! Design token extraction.
//!
//! Every category is resolved through the same ordered chain of sources:
//! local variables, then published styles, then a frequency scan of the
//! document tree, then a fixed table. The first source that yields at least
//! one token wins; categories without a given source simply leave it out of
//! their chain.

mod fallback;
mod styles;
mod traversal;
mod variables;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::extraction::{Extraction, SkippedItem};
use crate::figma::{FigmaFile, StylesResponse, VariablesResponse};
use crate::serde_helpers::{whole_number, whole_number_map};

pub use fallback::{
    fallback_border_radius, fallback_colors, fallback_effects, fallback_spacing,
    fallback_stroke_weights, fallback_typography,
};

/// Normalized token name to token value, in insertion order.
pub type TokenMap<T> = IndexMap<String, T>;

pub const SPACING_VARIABLE_KEYWORDS: &[&str] = &["spacing"];
pub const RADIUS_VARIABLE_KEYWORDS: &[&str] = &["radius", "border"];
pub const STROKE_VARIABLE_KEYWORDS: &[&str] = &["stroke", "weight"];

/// The design-tokens document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    pub color: TokenMap<String>,
    pub typography: TokenMap<TypographyToken>,
    #[serde(serialize_with = "whole_number_map")]
    pub spacing: TokenMap<f64>,
    pub effects: TokenMap<EffectToken>,
    #[serde(serialize_with = "whole_number_map")]
    pub border_radius: TokenMap<f64>,
    #[serde(serialize_with = "whole_number_map")]
    pub stroke_weight: TokenMap<f64>,
}

impl DesignTokens {
    pub fn token_count(&self) -> usize {
        self.color.len()
            + self.typography.len()
            + self.spacing.len()
            + self.effects.len()
            + self.border_radius.len()
            + self.stroke_weight.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    #[serde(serialize_with = "whole_number")]
    pub font_size: f64,
    #[serde(serialize_with = "whole_number")]
    pub font_weight: f64,
    #[serde(serialize_with = "whole_number")]
    pub line_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "optional_whole_number"
    )]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
    /// Raw style name as authored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Drop or inner shadow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectToken {
    #[serde(rename = "type")]
    pub effect_type: String,
    #[serde(serialize_with = "whole_number")]
    pub x: f64,
    #[serde(serialize_with = "whole_number")]
    pub y: f64,
    #[serde(serialize_with = "whole_number")]
    pub blur: f64,
    #[serde(serialize_with = "whole_number")]
    pub spread: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn optional_whole_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(value) => whole_number(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Color,
    Typography,
    Spacing,
    Effects,
    BorderRadius,
    StrokeWeight,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
            TokenCategory::Typography => "typography",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Effects => "effects",
            TokenCategory::BorderRadius => "borderRadius",
            TokenCategory::StrokeWeight => "strokeWeight",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a category's resolution chain.
pub(crate) struct TokenSource<'a, T> {
    label: &'static str,
    extract: Box<dyn FnOnce(&mut Vec<SkippedItem>) -> TokenMap<T> + 'a>,
}

impl<'a, T> TokenSource<'a, T> {
    pub(crate) fn new(
        label: &'static str,
        extract: impl FnOnce(&mut Vec<SkippedItem>) -> TokenMap<T> + 'a,
    ) -> Self {
        Self {
            label,
            extract: Box::new(extract),
        }
    }
}

/// Run `sources` in order and keep the first non-empty result, or the
/// fallback table when every source came back empty.
pub(crate) fn resolve<T>(
    category: TokenCategory,
    sources: Vec<TokenSource<'_, T>>,
    fallback: fn() -> TokenMap<T>,
    skipped: &mut Vec<SkippedItem>,
) -> TokenMap<T> {
    for source in sources {
        let tokens = (source.extract)(skipped);
        if !tokens.is_empty() {
            log::info!(
                "{category}: {} tokens from {}",
                tokens.len(),
                source.label
            );
            return tokens;
        }
        log::debug!("{category}: nothing from {}", source.label);
    }

    log::info!("{category}: no design data found, using fallback table");
    fallback()
}

/// Build all six token categories from one fetched payload.
///
/// Never fails: unusable variables and styles are reported in
/// [`Extraction::skipped`] and every category falls back to a fixed table.
pub fn extract_tokens(
    file: &FigmaFile,
    styles: &StylesResponse,
    variables: &VariablesResponse,
) -> Extraction<DesignTokens> {
    let mut skipped = Vec::new();
    let document = file.document.as_ref();

    let color = resolve(
        TokenCategory::Color,
        vec![
            TokenSource::new("variables", |skipped| {
                variables::color_variables(variables, skipped)
            }),
            TokenSource::new("fill styles", |skipped| {
                styles::color_styles(file, styles, skipped)
            }),
        ],
        fallback_colors,
        &mut skipped,
    );

    // Typography variables are not modelled; text styles are the first source.
    let typography = resolve(
        TokenCategory::Typography,
        vec![TokenSource::new("text styles", |skipped| {
            styles::typography_styles(file, styles, skipped)
        })],
        fallback_typography,
        &mut skipped,
    );

    let spacing = resolve(
        TokenCategory::Spacing,
        vec![
            TokenSource::new("variables", |skipped| {
                variables::number_variables(variables, SPACING_VARIABLE_KEYWORDS, skipped)
            }),
            TokenSource::new("document nodes", |_| traversal::spacing_from_nodes(document)),
        ],
        fallback_spacing,
        &mut skipped,
    );

    let effects = resolve(
        TokenCategory::Effects,
        vec![TokenSource::new("effect styles", |skipped| {
            styles::effect_styles(file, styles, skipped)
        })],
        fallback_effects,
        &mut skipped,
    );

    let border_radius = resolve(
        TokenCategory::BorderRadius,
        vec![
            TokenSource::new("variables", |skipped| {
                variables::number_variables(variables, RADIUS_VARIABLE_KEYWORDS, skipped)
            }),
            TokenSource::new("document nodes", |_| traversal::radius_from_nodes(document)),
        ],
        fallback_border_radius,
        &mut skipped,
    );

    let stroke_weight = resolve(
        TokenCategory::StrokeWeight,
        vec![
            TokenSource::new("variables", |skipped| {
                variables::number_variables(variables, STROKE_VARIABLE_KEYWORDS, skipped)
            }),
            TokenSource::new("document nodes", |_| traversal::stroke_from_nodes(document)),
        ],
        fallback_stroke_weights,
        &mut skipped,
    );

    Extraction::new(
        DesignTokens {
            color,
            typography,
            spacing,
            effects,
            border_radius,
            stroke_weight,
        },
        skipped,
    )
}
