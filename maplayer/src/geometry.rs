//! Coordinate math
//!
//! Pure functions used to derive shapes and measurements from [`GeoPoint`]s:
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`create_circle_polygon`] | Closed ring approximating a circle around a point |
//! | [`calculate_distance`] | Great-circle (Haversine) distance in kilometers |
//! | [`path_length`] | Total length of a polyline in kilometers |
//! | [`is_within_bangladesh_bounds`] | Fixed bounding-box membership test |
//!
//! # Circle approximation
//!
//! Circles are built on a local tangent plane: the kilometer radius is turned
//! into degrees with `1° ≈ 111.32 km` and the longitude step is widened by
//! `1 / cos(latitude)` to account for meridian convergence. This is accurate
//! for radii up to a few kilometers at mid latitudes. Near the poles the
//! cosine approaches zero and the ring blows up in longitude; for large radii
//! great-circle curvature is ignored. Both are limits of the approximation.
//!
//! All functions are total over `f64`: NaN in, NaN out.

use std::f64::consts::PI;

use crate::coord::{GeoBounds, GeoPoint};

/// Mean Earth radius used by the Haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude used by the circle approximation.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Default number of segments for circle polygons.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Creates a closed ring approximating a circle with the default segment count.
///
/// See [`create_circle_polygon_with_segments`].
#[inline]
pub fn create_circle_polygon(center: GeoPoint, radius_km: f64) -> Vec<GeoPoint> {
    create_circle_polygon_with_segments(center, radius_km, DEFAULT_CIRCLE_SEGMENTS)
}

/// Creates a closed ring approximating a circle around `center`.
///
/// Places `segments` points at angular steps of `2π / segments`, starting due
/// east and turning counter-clockwise, then repeats the first point to close
/// the ring. The result therefore has `segments + 1` points.
///
/// A zero or negative radius is not rejected: it produces a degenerate ring
/// (all points equal for zero, mirrored for negative). `segments == 0` yields
/// an empty ring. Callers that need a valid polygon must pass at least 3.
///
/// # Example
///
/// ```
/// use maplayer::geometry::create_circle_polygon_with_segments;
/// use maplayer::GeoPoint;
///
/// let ring = create_circle_polygon_with_segments(GeoPoint::new(46.6873, 24.7136), 0.5, 32);
/// assert_eq!(ring.len(), 33);
/// assert_eq!(ring.first(), ring.last());
/// ```
pub fn create_circle_polygon_with_segments(
    center: GeoPoint,
    radius_km: f64,
    segments: usize,
) -> Vec<GeoPoint> {
    if segments == 0 {
        return Vec::new();
    }

    let lat_step = radius_km / KM_PER_DEGREE;
    let lon_step = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());

    let mut ring = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let angle = i as f64 * 2.0 * PI / segments as f64;
        ring.push(GeoPoint::new(
            center.lon + angle.cos() * lon_step,
            center.lat + angle.sin() * lat_step,
        ));
    }

    // Close the ring
    ring.push(ring[0]);
    ring
}

/// Great-circle distance between two points in kilometers (Haversine).
///
/// Symmetric, zero for identical points, no altitude component.
#[inline]
pub fn calculate_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    // Rounding can push h past 1 for near-antipodal points
    let h = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total length of a polyline in kilometers.
///
/// Returns 0 for fewer than two points.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| calculate_distance(pair[0], pair[1]))
        .sum()
}

/// Returns true if `point` lies within the approximate bounds of Bangladesh.
///
/// Bounds are north 26.8°, south 20.3°, east 92.8°, west 88.0°, inclusive on
/// every edge. Use [`GeoBounds::contains`] to test against other regions.
#[inline]
pub fn is_within_bangladesh_bounds(point: GeoPoint) -> bool {
    GeoBounds::BANGLADESH.contains(point)
}
