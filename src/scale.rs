//! Semantic scales for raw measurements.
//!
//! Each bucket function maps a single number to the first label whose
//! threshold it satisfies, checking thresholds in ascending order.

use std::fmt;

macro_rules! scale_labels {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

scale_labels!(SpacingScale {
    None => "none",
    Xs => "xs",
    Sm => "sm",
    Md => "md",
    Lg => "lg",
    Xl => "xl",
    Xl2 => "2xl",
    Xl3 => "3xl",
    Xl4 => "4xl",
    Xl5 => "5xl",
});

scale_labels!(RadiusScale {
    None => "none",
    Sm => "sm",
    Md => "md",
    Lg => "lg",
    Xl => "xl",
    Xl2 => "2xl",
    Xl3 => "3xl",
    Full => "full",
});

scale_labels!(StrokeScale {
    Thin => "thin",
    Normal => "normal",
    Medium => "medium",
    Thick => "thick",
    ExtraThick => "extra-thick",
});

scale_labels!(TypographyScale {
    HeadingXl => "heading-xl",
    DisplayXl => "display-xl",
    HeadingLg => "heading-lg",
    DisplayLg => "display-lg",
    HeadingMd => "heading-md",
    DisplayMd => "display-md",
    HeadingSm => "heading-sm",
    TextLg => "text-lg",
    TextBold => "text-bold",
    TextBase => "text-base",
    TextSm => "text-sm",
    TextXs => "text-xs",
});

pub fn spacing_bucket(value: f64) -> SpacingScale {
    if value == 0.0 {
        SpacingScale::None
    } else if value <= 2.0 {
        SpacingScale::Xs
    } else if value <= 4.0 {
        SpacingScale::Sm
    } else if value <= 8.0 {
        SpacingScale::Md
    } else if value <= 12.0 {
        SpacingScale::Lg
    } else if value <= 16.0 {
        SpacingScale::Xl
    } else if value <= 24.0 {
        SpacingScale::Xl2
    } else if value <= 32.0 {
        SpacingScale::Xl3
    } else if value <= 48.0 {
        SpacingScale::Xl4
    } else {
        SpacingScale::Xl5
    }
}

/// Radii of 1000 and above are treated as pill shapes; everything between
/// 16 and 1000 lands in `3xl`.
pub fn radius_bucket(value: f64) -> RadiusScale {
    if value == 0.0 {
        RadiusScale::None
    } else if value <= 2.0 {
        RadiusScale::Sm
    } else if value <= 4.0 {
        RadiusScale::Md
    } else if value <= 8.0 {
        RadiusScale::Lg
    } else if value <= 12.0 {
        RadiusScale::Xl
    } else if value <= 16.0 {
        RadiusScale::Xl2
    } else if value >= 1000.0 {
        RadiusScale::Full
    } else {
        RadiusScale::Xl3
    }
}

pub fn stroke_bucket(value: f64) -> StrokeScale {
    if value <= 1.0 {
        StrokeScale::Thin
    } else if value <= 2.0 {
        StrokeScale::Normal
    } else if value <= 4.0 {
        StrokeScale::Medium
    } else if value <= 6.0 {
        StrokeScale::Thick
    } else {
        StrokeScale::ExtraThick
    }
}

/// Name a text style by size, with weights of 600+ counted as headings.
pub fn typography_bucket(font_size: f64, font_weight: f64) -> TypographyScale {
    let heavy = font_weight >= 600.0;
    if font_size >= 32.0 {
        if heavy {
            TypographyScale::HeadingXl
        } else {
            TypographyScale::DisplayXl
        }
    } else if font_size >= 24.0 {
        if heavy {
            TypographyScale::HeadingLg
        } else {
            TypographyScale::DisplayLg
        }
    } else if font_size >= 20.0 {
        if heavy {
            TypographyScale::HeadingMd
        } else {
            TypographyScale::DisplayMd
        }
    } else if font_size >= 18.0 {
        if heavy {
            TypographyScale::HeadingSm
        } else {
            TypographyScale::TextLg
        }
    } else if font_size >= 16.0 {
        if heavy {
            TypographyScale::TextBold
        } else {
            TypographyScale::TextBase
        }
    } else if font_size >= 14.0 {
        TypographyScale::TextSm
    } else {
        TypographyScale::TextXs
    }
}
