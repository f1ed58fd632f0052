//! Tokens from the local variables endpoint.

use serde_json::Value;

use super::TokenMap;
use crate::color::rgb_to_hex;
use crate::extraction::{record_skip, SkippedItem};
use crate::figma::{FigmaColor, Variable, VariableType, VariablesResponse};
use crate::naming::normalize_token_name;

/// Value of `variable` in its collection's default mode.
fn default_mode_value<'a>(
    variable: &'a Variable,
    variables: &VariablesResponse,
) -> Result<&'a Value, String> {
    let collection = variables
        .meta
        .variable_collections
        .get(&variable.variable_collection_id)
        .ok_or_else(|| {
            format!(
                "variable collection {} not found",
                variable.variable_collection_id
            )
        })?;

    variable
        .values_by_mode
        .get(&collection.default_mode_id)
        .ok_or_else(|| format!("no value for default mode {}", collection.default_mode_id))
}

fn color_from_value(value: &Value) -> Result<FigmaColor, String> {
    let channel = |key: &str| value.get(key).and_then(Value::as_f64);
    match (channel("r"), channel("g"), channel("b")) {
        (Some(r), Some(g), Some(b)) => Ok(FigmaColor { r, g, b, a: None }),
        _ => Err("default mode value is not an RGB color".to_string()),
    }
}

/// `COLOR` variables as `#RRGGBB` tokens.
pub(crate) fn color_variables(
    variables: &VariablesResponse,
    skipped: &mut Vec<SkippedItem>,
) -> TokenMap<String> {
    let mut colors = TokenMap::new();

    for variable in variables.meta.variables.values() {
        if variable.resolved_type != VariableType::Color {
            continue;
        }
        match default_mode_value(variable, variables).and_then(color_from_value) {
            Ok(color) => {
                let hex = rgb_to_hex(&color);
                log::debug!("color variable {} = {hex}", variable.name);
                colors.insert(normalize_token_name(&variable.name), hex);
            }
            Err(reason) => record_skip(skipped, format!("variable {}", variable.name), reason),
        }
    }

    colors
}

/// `FLOAT` variables whose name mentions one of `keywords`.
pub(crate) fn number_variables(
    variables: &VariablesResponse,
    keywords: &[&str],
    skipped: &mut Vec<SkippedItem>,
) -> TokenMap<f64> {
    let mut numbers = TokenMap::new();

    for variable in variables.meta.variables.values() {
        if variable.resolved_type != VariableType::Float {
            continue;
        }
        let lower = variable.name.to_lowercase();
        if !keywords.iter().any(|keyword| lower.contains(keyword)) {
            continue;
        }

        let value = default_mode_value(variable, variables).and_then(|value| {
            value
                .as_f64()
                .ok_or_else(|| "default mode value is not a number".to_string())
        });
        match value {
            Ok(number) => {
                numbers.insert(normalize_token_name(&variable.name), number);
            }
            Err(reason) => record_skip(skipped, format!("variable {}", variable.name), reason),
        }
    }

    numbers
}
