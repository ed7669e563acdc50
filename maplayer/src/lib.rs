//! MapLayer - geospatial utility core for map applications
//!
//! This library provides the pieces a map screen needs around the rendering
//! engine: loading a remote map style, camera defaults, coordinate math,
//! style tables and GeoJSON feature builders.
//!
//! # Modules
//!
//! | Module | Role |
//! |---|---|
//! | [`style`] | Fetch, sanitize and expose a remote style as a [`LoadState`] |
//! | [`camera`] | Named city coordinates and the default camera |
//! | [`geometry`] | Circle polygons, Haversine distance, bounds checks |
//! | [`theme`] | Colors and line / fill / marker style tables |
//! | [`feature`] | Marker, line, polygon and circle features as GeoJSON |
//! | [`config`] | INI configuration file with environment override |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Example
//!
//! ```
//! use maplayer::camera::{JEDDAH, RIYADH};
//! use maplayer::geometry::calculate_distance;
//!
//! let km = calculate_distance(RIYADH, JEDDAH);
//! assert!(km > 800.0 && km < 900.0);
//! ```

pub mod camera;
pub mod config;
pub mod coord;
pub mod feature;
pub mod geometry;
pub mod logging;
pub mod style;
pub mod theme;

pub use coord::{CoordError, GeoBounds, GeoPoint, Region};
pub use style::{LoadState, StyleDocument, StyleError};
