//! Coordinate math commands: `distance`, `circle` and `bounds`.

use console::style;
use maplayer::geometry::{
    calculate_distance, create_circle_polygon_with_segments, DEFAULT_CIRCLE_SEGMENTS,
};
use maplayer::{GeoPoint, Region};
use serde_json::json;

use super::common::{load_config, print_json, RegionArg};
use crate::error::CliError;

/// Print the great-circle distance between two points.
pub fn run_distance(from: GeoPoint, to: GeoPoint) -> Result<(), CliError> {
    let km = calculate_distance(from, to);
    println!("{:.3} km", km);
    Ok(())
}

/// Print a circle approximation as a GeoJSON Polygon.
pub fn run_circle(center: GeoPoint, radius_km: f64, segments: Option<usize>) -> Result<(), CliError> {
    let segments = segments.unwrap_or(DEFAULT_CIRCLE_SEGMENTS);
    if segments < 3 {
        return Err(CliError::Config(format!(
            "A polygon needs at least 3 segments, got {}",
            segments
        )));
    }

    let ring = create_circle_polygon_with_segments(center, radius_km, segments);
    print_json(&json!({
        "type": "Polygon",
        "coordinates": [ring],
    }))
}

/// Report whether a point lies within a region's bounds.
pub fn run_bounds(point: GeoPoint, region: Option<RegionArg>) -> Result<(), CliError> {
    let region = match region {
        Some(arg) => Region::from(arg),
        None => load_config().bounds.region,
    };
    let bounds = region.bounds();

    if bounds.contains(point) {
        println!("{} {} is within {}", style("✓").green(), point, region);
    } else {
        println!("{} {} is outside {}", style("✗").red(), point, region);
        println!(
            "  bounds: north {}, south {}, east {}, west {}",
            bounds.north, bounds.south, bounds.east, bounds.west
        );
    }

    Ok(())
}
