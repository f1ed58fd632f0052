//! Conversions from Figma's normalized float colors to CSS strings.
//!
//! Channels are scaled by 255 and rounded but never clamped: a channel outside
//! `[0, 1]` produces an out-of-range component (e.g. `1.2` becomes `132` in hex).

use crate::figma::FigmaColor;

/// Scale a `[0, 1]` channel to `0..=255`, rounding halves up.
fn scale_channel(channel: f64) -> i64 {
    (channel * 255.0 + 0.5).floor() as i64
}

fn hex_channel(channel: f64) -> String {
    let value = scale_channel(channel);
    if value < 0 {
        format!("-{:X}", value.unsigned_abs())
    } else {
        format!("{value:02X}")
    }
}

/// `#RRGGBB` with uppercase digits. Alpha is ignored.
pub fn rgb_to_hex(color: &FigmaColor) -> String {
    format!(
        "#{}{}{}",
        hex_channel(color.r),
        hex_channel(color.g),
        hex_channel(color.b)
    )
}

/// `rgba(R, G, B, A)` with alpha passed through unrounded (defaults to 1).
pub fn rgba_to_string(color: &FigmaColor) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        scale_channel(color.r),
        scale_channel(color.g),
        scale_channel(color.b),
        color.a.unwrap_or(1.0)
    )
}
