//! Named locations and camera defaults.
//!
//! Everything here is plain constant data. [`CameraConfig`] is `Copy`, so a
//! consumer that wants to animate or step the camera works on its own copy
//! and [`DEFAULT_CAMERA`] never changes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::GeoPoint;

pub const RIYADH: GeoPoint = GeoPoint::new(46.6753, 24.7136);
pub const JEDDAH: GeoPoint = GeoPoint::new(39.19797, 21.4858);
pub const MAKKAH: GeoPoint = GeoPoint::new(39.8262, 21.3891);
pub const MADINAH: GeoPoint = GeoPoint::new(39.6142, 24.5247);
pub const DAMMAM: GeoPoint = GeoPoint::new(50.1018, 26.4207);

/// Lowest zoom level the camera steps to.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom level the camera steps to.
pub const MAX_ZOOM: f64 = 20.0;

/// Animation used when recentring on a tapped location.
const RECENTER_DURATION: Duration = Duration::from_millis(500);

/// Default camera: centered on Riyadh at street level.
pub const DEFAULT_CAMERA: CameraConfig = CameraConfig {
    center: RIYADH,
    zoom: 16.0,
    animation_duration: Duration::from_millis(1000),
    animation_mode: AnimationMode::LinearTo,
};

/// Errors from parsing camera-related names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Unknown city '{0}'")]
    UnknownCity(String),

    #[error("Unknown animation mode '{0}'")]
    UnknownAnimationMode(String),
}

/// Cities with predefined coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum City {
    #[default]
    Riyadh,
    Jeddah,
    Makkah,
    Madinah,
    Dammam,
}

impl City {
    pub const ALL: [City; 5] = [
        City::Riyadh,
        City::Jeddah,
        City::Makkah,
        City::Madinah,
        City::Dammam,
    ];

    pub fn coordinates(self) -> GeoPoint {
        match self {
            City::Riyadh => RIYADH,
            City::Jeddah => JEDDAH,
            City::Makkah => MAKKAH,
            City::Madinah => MADINAH,
            City::Dammam => DAMMAM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            City::Riyadh => "Riyadh",
            City::Jeddah => "Jeddah",
            City::Makkah => "Makkah",
            City::Madinah => "Madinah",
            City::Dammam => "Dammam",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CameraError::UnknownCity(s.to_string()))
    }
}

/// How the rendering engine moves the camera to a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationMode {
    #[default]
    LinearTo,
    EaseTo,
    FlyTo,
    MoveTo,
}

impl AnimationMode {
    pub const ALL: [AnimationMode; 4] = [
        AnimationMode::LinearTo,
        AnimationMode::EaseTo,
        AnimationMode::FlyTo,
        AnimationMode::MoveTo,
    ];

    /// Name as understood by the rendering engine.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationMode::LinearTo => "linearTo",
            AnimationMode::EaseTo => "easeTo",
            AnimationMode::FlyTo => "flyTo",
            AnimationMode::MoveTo => "moveTo",
        }
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationMode {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AnimationMode::ALL
            .into_iter()
            .find(|mode| {
                let name = mode.as_str();
                name.eq_ignore_ascii_case(wanted)
                    || name.trim_end_matches("To").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CameraError::UnknownAnimationMode(s.to_string()))
    }
}

/// Camera position and animation settings handed to the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    #[serde(rename = "centerCoordinate")]
    pub center: GeoPoint,

    #[serde(rename = "zoomLevel")]
    pub zoom: f64,

    #[serde(with = "duration_millis")]
    pub animation_duration: Duration,

    pub animation_mode: AnimationMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        DEFAULT_CAMERA
    }
}

impl CameraConfig {
    /// Returns a copy with the given zoom, clamped to `MIN_ZOOM..=MAX_ZOOM`.
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }

    /// Returns a copy one zoom level closer, capped at `MAX_ZOOM`.
    pub fn zoom_in(self) -> Self {
        self.with_zoom(self.zoom + 1.0)
    }

    /// Returns a copy one zoom level further out, floored at `MIN_ZOOM`.
    pub fn zoom_out(self) -> Self {
        self.with_zoom(self.zoom - 1.0)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    /// Returns a copy centered on `point`, eased there over 500ms.
    ///
    /// Keeps the current zoom level.
    pub fn centered_on(self, point: GeoPoint) -> Self {
        Self {
            center: point,
            animation_duration: RECENTER_DURATION,
            animation_mode: AnimationMode::EaseTo,
            ..self
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
