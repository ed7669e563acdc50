//! Geographic coordinate types
//!
//! Provides the `GeoPoint` value type used throughout the crate together with
//! axis-aligned `GeoBounds` for region membership tests.
//!
//! Points are stored in GeoJSON order: longitude first, then latitude. Values
//! are decimal degrees and are deliberately not clamped, so callers working
//! with raw engine output get back exactly what they passed in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing coordinates from text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Input was not of the form `lon,lat`.
    #[error("Invalid coordinate '{0}': expected 'lon,lat'")]
    InvalidFormat(String),

    /// One of the components was not a number.
    #[error("Invalid {component} value '{value}'")]
    InvalidNumber {
        component: &'static str,
        value: String,
    },

    /// Unknown region name.
    #[error("Unknown region '{0}'")]
    UnknownRegion(String),
}

/// A geographic point in decimal degrees, longitude first.
///
/// Serializes as a two-element `[lon, lat]` array so it can be dropped
/// straight into GeoJSON geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns the point as a `[lon, lat]` array.
    #[inline]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        point.to_array()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}, {:.*}", p, self.lon, p, self.lat),
            None => write!(f, "{}, {}", self.lon, self.lat),
        }
    }
}

impl FromStr for GeoPoint {
    type Err = CoordError;

    /// Parses `lon,lat` (whitespace around either component is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| CoordError::InvalidFormat(s.to_string()))?;

        let parse = |component: &'static str, value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| CoordError::InvalidNumber {
                    component,
                    value: value.trim().to_string(),
                })
        };

        Ok(Self::new(parse("longitude", lon)?, parse("latitude", lat)?))
    }
}

/// Axis-aligned geographic bounding box. All edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Approximate bounds of Bangladesh.
    pub const BANGLADESH: GeoBounds = GeoBounds {
        north: 26.8,
        south: 20.3,
        east: 92.8,
        west: 88.0,
    };

    /// Approximate bounds of Saudi Arabia.
    pub const SAUDI_ARABIA: GeoBounds = GeoBounds {
        north: 32.2,
        south: 16.3,
        east: 55.7,
        west: 34.5,
    };

    /// Returns true if `point` lies inside the box or on one of its edges.
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lon >= self.west
            && point.lon <= self.east
    }
}

/// Named regions with predefined bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Bangladesh,
    SaudiArabia,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Bangladesh, Region::SaudiArabia];

    /// Bounds for this region.
    pub fn bounds(self) -> GeoBounds {
        match self {
            Region::Bangladesh => GeoBounds::BANGLADESH,
            Region::SaudiArabia => GeoBounds::SAUDI_ARABIA,
        }
    }

    /// Config-file name of the region.
    pub fn name(self) -> &'static str {
        match self {
            Region::Bangladesh => "bangladesh",
            Region::SaudiArabia => "saudi_arabia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "bangladesh" | "bd" => Ok(Region::Bangladesh),
            "saudi_arabia" | "sa" | "ksa" => Ok(Region::SaudiArabia),
            _ => Err(CoordError::UnknownRegion(s.to_string())),
        }
    }
}
