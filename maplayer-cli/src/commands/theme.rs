//! Style table and feature commands: `theme` and `features`.

use maplayer::feature::{line_collection, marker_collection, polygon_collection, sample_features};
use maplayer::theme::{BRAND_COLORS, MAP_STYLES};
use serde_json::{json, Value};

use super::common::print_json;
use crate::error::CliError;

/// Print the line, fill and marker style tables and the brand palette.
pub fn run_theme() -> Result<(), CliError> {
    print_json(&theme_json())
}

fn theme_json() -> Value {
    json!({
        "styles": MAP_STYLES,
        "colors": BRAND_COLORS,
    })
}

/// Print the sample features as the three GeoJSON shape sources.
pub fn run_features() -> Result<(), CliError> {
    let features = sample_features();

    print_json(&json!({
        "markers": marker_collection(&features),
        "lines": line_collection(&features),
        "polygons": polygon_collection(&features),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_includes_styles_and_colors() {
        let theme = theme_json();

        assert!(theme["styles"]["line"].is_object());
        assert!(theme["styles"]["marker"].is_object());
        assert_eq!(theme["colors"]["primary"], "#2e8555");
        assert_eq!(theme["colors"]["primaryLight"], "rgba(46, 133, 85, 0.5)");
    }
}
