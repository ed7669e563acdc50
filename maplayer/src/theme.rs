//! Declarative style tables for rendering layers.
//!
//! These are data, not behaviour: line, polygon and marker parameters plus
//! the brand color palette. Everything serializes with the property names
//! the rendering engine expects (`lineColor`, `fillOutlineColor`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}': expected #rgb, #rrggbb or rgba(r, g, b, a)")]
pub struct ColorParseError(String);

/// An sRGB color with alpha in `0.0..=1.0`.
///
/// Opaque colors render as `#rrggbb`, translucent ones as `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;

        match digits.as_slice() {
            [r, g, b] => Some(Self::rgb(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Some(Self::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            _ => None,
        }
    }

    fn parse_rgba(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();

        match (parts.as_slice(), with_alpha) {
            ([r, g, b, a], true) => {
                let a = a.parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?;
                Some(Self::rgba(channel(*r)?, channel(*g)?, channel(*b)?, a))
            }
            ([r, g, b], false) => Some(Self::rgb(channel(*r)?, channel(*g)?, channel(*b)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(body) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            Self::parse_rgba(body, true)
        } else if let Some(body) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            Self::parse_rgba(body, false)
        } else {
            None
        };

        parsed.ok_or_else(|| ColorParseError(trimmed.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Bevel,
    Round,
    Miter,
}

/// Line layer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub line_color: Color,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

/// Fill layer parameters for polygons and circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub fill_color: Color,
    pub fill_outline_color: Color,
}

/// Marker anchor as a fraction of the icon size; (0.5, 1.0) is bottom center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub anchor_default: Anchor,
    pub icon_size: IconSize,
}

/// Brand palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandColors {
    pub primary: Color,
    pub primary_light: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub white: Color,
    pub warning: Color,
}

/// All layer style tables together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapStyles {
    pub line: LineStyle,
    pub polygon: PolygonStyle,
    pub marker: MarkerStyle,
}

pub const BRAND_COLORS: BrandColors = BrandColors {
    primary: Color::rgb(0x2e, 0x85, 0x55),
    primary_light: Color::rgba(46, 133, 85, 0.5),
    secondary: Color::rgb(0xe7, 0x4c, 0x3c),
    background: Color::rgb(0xf5, 0xf5, 0xf5),
    text: Color::rgb(0x33, 0x33, 0x33),
    white: Color::rgb(0xff, 0xff, 0xff),
    warning: Color::rgb(0xff, 0xc1, 0x07),
};

pub const LINE_STYLE: LineStyle = LineStyle {
    line_color: BRAND_COLORS.primary,
    line_width: 3.0,
    line_cap: LineCap::Round,
    line_join: LineJoin::Round,
};

pub const POLYGON_STYLE: PolygonStyle = PolygonStyle {
    fill_color: BRAND_COLORS.primary_light,
    fill_outline_color: BRAND_COLORS.primary,
};

pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    anchor_default: Anchor { x: 0.5, y: 1.0 },
    icon_size: IconSize {
        width: 40,
        height: 40,
    },
};

pub const MAP_STYLES: MapStyles = MapStyles {
    line: LINE_STYLE,
    polygon: POLYGON_STYLE,
    marker: MARKER_STYLE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_color_renders_hex() {
        assert_eq!(BRAND_COLORS.primary.to_string(), "#2e8555");
        assert_eq!(BRAND_COLORS.text.to_string(), "#333333");
    }

    #[test]
    fn test_translucent_color_renders_rgba() {
        assert_eq!(BRAND_COLORS.primary_light.to_string(), "rgba(46, 133, 85, 0.5)");
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!("#333".parse::<Color>().unwrap(), Color::rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_parse_long_hex_case_insensitive() {
        assert_eq!("#E74C3C".parse::<Color>().unwrap(), BRAND_COLORS.secondary);
    }

    #[test]
    fn test_parse_rgba() {
        let color: Color = "rgba(46,133,85,0.5)".parse().unwrap();
        assert_eq!(color, BRAND_COLORS.primary_light);
    }

    #[test]
    fn test_parse_rgb() {
        let color: Color = "rgb(255, 193, 7)".parse().unwrap();
        assert_eq!(color, BRAND_COLORS.warning);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("rgba(1, 2, 3, 4)".parse::<Color>().is_err());
        assert!("green".parse::<Color>().is_err());
    }

    #[test]
    fn test_polygon_fill_is_translucent_primary() {
        assert_eq!(POLYGON_STYLE.fill_color, BRAND_COLORS.primary.with_alpha(0.5));
        assert_eq!(POLYGON_STYLE.fill_outline_color, BRAND_COLORS.primary);
    }

    #[test]
    fn test_line_style_serializes_engine_props() {
        let json = serde_json::to_value(LINE_STYLE).unwrap();
        assert_eq!(json["lineColor"], "#2e8555");
        assert_eq!(json["lineWidth"], 3.0);
        assert_eq!(json["lineCap"], "round");
        assert_eq!(json["lineJoin"], "round");
    }

    #[test]
    fn test_marker_defaults() {
        let json = serde_json::to_value(MARKER_STYLE).unwrap();
        assert_eq!(json["anchorDefault"]["x"], 0.5);
        assert_eq!(json["anchorDefault"]["y"], 1.0);
        assert_eq!(json["iconSize"]["width"], 40);
    }

    #[test]
    fn test_color_deserializes_from_string() {
        let color: Color = serde_json::from_str("\"#ffffff\"").unwrap();
        assert_eq!(color, BRAND_COLORS.white);
    }
}
