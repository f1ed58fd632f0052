//! Tokens from published styles joined with the file's style data.

use super::{EffectToken, TokenMap, TypographyToken};
use crate::color::{rgb_to_hex, rgba_to_string};
use crate::extraction::{record_skip, SkippedItem};
use crate::figma::{FigmaFile, FigmaTypeStyle, PublishedStyle, StyleData, StyleType, StylesResponse};
use crate::naming::normalize_token_name;

pub(crate) const DEFAULT_FONT_SIZE: f64 = 16.0;
pub(crate) const DEFAULT_FONT_WEIGHT: f64 = 400.0;
pub(crate) const DEFAULT_LINE_HEIGHT: f64 = 1.4;
pub(crate) const DEFAULT_FONT_FAMILY: &str = "Inter";
pub(crate) const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.1)";

/// Zero and NaN count as "not set", the same as a missing value.
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn published_of_type(
    styles: &StylesResponse,
    style_type: StyleType,
) -> impl Iterator<Item = &PublishedStyle> {
    styles
        .meta
        .styles
        .iter()
        .filter(move |style| style.style_type == style_type)
}

fn style_data<'a>(file: &'a FigmaFile, style: &PublishedStyle) -> Result<&'a StyleData, String> {
    file.styles
        .get(&style.key)
        .ok_or_else(|| format!("no style data for key {}", style.key))
}

/// Join every published style of `style_type` with its data and convert it.
fn join_styles<T>(
    file: &FigmaFile,
    styles: &StylesResponse,
    style_type: StyleType,
    skipped: &mut Vec<SkippedItem>,
    mut convert: impl FnMut(&PublishedStyle, &StyleData) -> Result<T, String>,
) -> TokenMap<T> {
    let mut tokens = TokenMap::new();

    for style in published_of_type(styles, style_type) {
        match style_data(file, style).and_then(|data| convert(style, data)) {
            Ok(token) => {
                tokens.insert(normalize_token_name(&style.name), token);
            }
            Err(reason) => record_skip(skipped, format!("style {}", style.name), reason),
        }
    }

    tokens
}

/// First paint of a fill style, when it is a solid color.
pub(crate) fn color_from_style_data(data: &StyleData) -> Option<String> {
    let fill = data.fills.first()?;
    if fill.paint_type != "SOLID" {
        return None;
    }
    fill.color.as_ref().map(rgb_to_hex)
}

pub(crate) fn typography_from_type_style(style: &FigmaTypeStyle) -> TypographyToken {
    let font_size = non_zero(style.font_size).unwrap_or(DEFAULT_FONT_SIZE);
    let line_height = match (
        non_zero(style.line_height_px),
        non_zero(style.line_height_percent),
    ) {
        (Some(px), _) => px / font_size,
        (None, Some(percent)) => percent / 100.0,
        (None, None) => DEFAULT_LINE_HEIGHT,
    };

    TypographyToken {
        font_size,
        font_weight: non_zero(style.font_weight).unwrap_or(DEFAULT_FONT_WEIGHT),
        line_height,
        font_family: Some(
            style
                .font_family
                .clone()
                .filter(|family| !family.is_empty())
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        ),
        letter_spacing: Some(non_zero(style.letter_spacing).unwrap_or(0.0)),
        text_transform: Some(
            style
                .text_case
                .clone()
                .filter(|case| !case.is_empty())
                .unwrap_or_else(|| "none".to_string()),
        ),
        name: None,
        description: None,
    }
}

/// First effect of an effect style, when it is a drop or inner shadow.
pub(crate) fn effect_from_style_data(data: &StyleData) -> Option<EffectToken> {
    let effect = data.effects.first()?;
    if effect.effect_type != "DROP_SHADOW" && effect.effect_type != "INNER_SHADOW" {
        return None;
    }
    let offset = effect.offset.unwrap_or_default();

    Some(EffectToken {
        effect_type: effect.effect_type.to_lowercase().replacen('_', "", 1),
        x: offset.x,
        y: offset.y,
        blur: effect.radius.unwrap_or(0.0),
        spread: effect.spread.unwrap_or(0.0),
        color: effect
            .color
            .as_ref()
            .map(rgba_to_string)
            .unwrap_or_else(|| DEFAULT_SHADOW_COLOR.to_string()),
        name: None,
        description: None,
    })
}

pub(crate) fn color_styles(
    file: &FigmaFile,
    styles: &StylesResponse,
    skipped: &mut Vec<SkippedItem>,
) -> TokenMap<String> {
    join_styles(file, styles, StyleType::Fill, skipped, |_, data| {
        color_from_style_data(data).ok_or_else(|| "style has no solid fill".to_string())
    })
}

pub(crate) fn typography_styles(
    file: &FigmaFile,
    styles: &StylesResponse,
    skipped: &mut Vec<SkippedItem>,
) -> TokenMap<TypographyToken> {
    join_styles(file, styles, StyleType::Text, skipped, |style, data| {
        let text_style = data
            .style
            .as_ref()
            .ok_or_else(|| "style has no text properties".to_string())?;
        Ok(TypographyToken {
            name: Some(style.name.clone()),
            description: Some(style.description.clone().unwrap_or_default()),
            ..typography_from_type_style(text_style)
        })
    })
}

/// Published effect styles, then named `EFFECT` entries of the file's style
/// map on top (those win on a name collision).
pub(crate) fn effect_styles(
    file: &FigmaFile,
    styles: &StylesResponse,
    skipped: &mut Vec<SkippedItem>,
) -> TokenMap<EffectToken> {
    let mut effects = join_styles(file, styles, StyleType::Effect, skipped, |style, data| {
        let effect =
            effect_from_style_data(data).ok_or_else(|| "style has no shadow effect".to_string())?;
        Ok(EffectToken {
            name: Some(style.name.clone()),
            description: Some(style.description.clone().unwrap_or_default()),
            ..effect
        })
    });

    for data in file.styles.values() {
        if data.style_type.as_deref() != Some("EFFECT") {
            continue;
        }
        let Some(name) = data.name.as_deref().filter(|name| !name.is_empty()) else {
            continue;
        };
        match effect_from_style_data(data) {
            Some(effect) => {
                effects.insert(normalize_token_name(name), effect);
            }
            None => log::debug!("effect style {name} carries no shadow"),
        }
    }

    effects
}
