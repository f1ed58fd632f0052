//! Fixed tables used when a category finds no design data at all.

use super::{EffectToken, TokenMap, TypographyToken};
use super::styles::DEFAULT_SHADOW_COLOR;

fn numbers(entries: &[(&str, f64)]) -> TokenMap<f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

pub fn fallback_colors() -> TokenMap<String> {
    [
        ("primary", "#007AFF"),
        ("secondary", "#5AC8FA"),
        ("accent", "#F43F5E"),
        ("neutral", "#8E8E93"),
    ]
    .into_iter()
    .map(|(name, hex)| (name.to_string(), hex.to_string()))
    .collect()
}

pub fn fallback_typography() -> TokenMap<TypographyToken> {
    let style = |font_size: f64, font_weight: f64, line_height: f64| TypographyToken {
        font_size,
        font_weight,
        line_height,
        font_family: None,
        letter_spacing: None,
        text_transform: None,
        name: None,
        description: None,
    };

    TokenMap::from([
        ("heading-xl".to_string(), style(32.0, 700.0, 1.2)),
        ("heading-lg".to_string(), style(24.0, 600.0, 1.3)),
        ("body".to_string(), style(16.0, 400.0, 1.5)),
    ])
}

pub fn fallback_spacing() -> TokenMap<f64> {
    numbers(&[("xs", 4.0), ("sm", 8.0), ("md", 16.0), ("lg", 24.0), ("xl", 32.0)])
}

pub fn fallback_effects() -> TokenMap<EffectToken> {
    let shadow = |y: f64, blur: f64, spread: f64| EffectToken {
        effect_type: "dropShadow".to_string(),
        x: 0.0,
        y,
        blur,
        spread,
        color: DEFAULT_SHADOW_COLOR.to_string(),
        name: None,
        description: None,
    };

    TokenMap::from([
        ("shadow-sm".to_string(), shadow(1.0, 3.0, 0.0)),
        ("shadow-lg".to_string(), shadow(4.0, 6.0, -1.0)),
    ])
}

pub fn fallback_border_radius() -> TokenMap<f64> {
    numbers(&[
        ("none", 0.0),
        ("sm", 2.0),
        ("md", 4.0),
        ("lg", 8.0),
        ("xl", 12.0),
        ("full", 9999.0),
    ])
}

pub fn fallback_stroke_weights() -> TokenMap<f64> {
    numbers(&[("thin", 1.0), ("normal", 2.0), ("thick", 4.0)])
}
