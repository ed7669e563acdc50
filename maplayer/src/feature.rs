//! Map features and GeoJSON builders.
//!
//! A [`MapFeature`] is a marker, line, polygon or circle with optional
//! display properties. The collection builders turn a feature list into the
//! GeoJSON `FeatureCollection`s consumed by the rendering engine's shape
//! sources: one for points, one for lines, one for fills. Circles have no
//! GeoJSON geometry of their own and are expanded into polygon rings with
//! [`create_circle_polygon`].

use serde_json::{json, Map, Value};

use crate::coord::GeoPoint;
use crate::geometry::{create_circle_polygon, path_length};
use crate::theme::{Color, BRAND_COLORS};

/// Radius of circle features in the sample set, in kilometers.
pub const DEFAULT_CIRCLE_RADIUS_KM: f64 = 0.5;

/// Geometry of a map feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Marker(GeoPoint),
    Line(Vec<GeoPoint>),
    /// Outer ring; expected to be closed.
    Polygon(Vec<GeoPoint>),
    Circle {
        center: GeoPoint,
        radius_km: f64,
    },
}

impl FeatureGeometry {
    /// Feature type name as used in the `featureType` property.
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureGeometry::Marker(_) => "marker",
            FeatureGeometry::Line(_) => "line",
            FeatureGeometry::Polygon(_) => "polygon",
            FeatureGeometry::Circle { .. } => "circle",
        }
    }

    /// Point the camera should move to when the feature is selected.
    pub fn anchor(&self) -> Option<GeoPoint> {
        match self {
            FeatureGeometry::Marker(point) => Some(*point),
            FeatureGeometry::Circle { center, .. } => Some(*center),
            FeatureGeometry::Line(points) | FeatureGeometry::Polygon(points) => {
                points.first().copied()
            }
        }
    }
}

/// Optional display properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureProperties {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<Color>,
    pub zoom_level: Option<f64>,
    /// Bearing in degrees clockwise from north.
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub id: String,
    pub geometry: FeatureGeometry,
    pub properties: FeatureProperties,
}

impl MapFeature {
    fn with_geometry(id: impl Into<String>, geometry: FeatureGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties: FeatureProperties::default(),
        }
    }

    pub fn marker(id: impl Into<String>, point: GeoPoint) -> Self {
        Self::with_geometry(id, FeatureGeometry::Marker(point))
    }

    pub fn line(id: impl Into<String>, points: Vec<GeoPoint>) -> Self {
        Self::with_geometry(id, FeatureGeometry::Line(points))
    }

    pub fn polygon(id: impl Into<String>, ring: Vec<GeoPoint>) -> Self {
        Self::with_geometry(id, FeatureGeometry::Polygon(ring))
    }

    pub fn circle(id: impl Into<String>, center: GeoPoint, radius_km: f64) -> Self {
        Self::with_geometry(id, FeatureGeometry::Circle { center, radius_km })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.properties.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.properties.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.properties.color = Some(color);
        self
    }

    pub fn with_zoom_level(mut self, zoom: f64) -> Self {
        self.properties.zoom_level = Some(zoom);
        self
    }

    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.properties.heading = Some(degrees);
        self
    }

    /// Length of a line feature in kilometers; `None` for other kinds.
    pub fn line_length_km(&self) -> Option<f64> {
        match &self.geometry {
            FeatureGeometry::Line(points) => Some(path_length(points)),
            _ => None,
        }
    }

    fn properties_json(&self, with_kind: bool) -> Value {
        let mut props = Map::new();
        props.insert("id".to_string(), json!(self.id));
        if with_kind {
            props.insert("featureType".to_string(), json!(self.geometry.kind()));
        }

        let p = &self.properties;
        if let Some(title) = &p.title {
            props.insert("title".to_string(), json!(title));
        }
        if let Some(description) = &p.description {
            props.insert("description".to_string(), json!(description));
        }
        if let Some(color) = &p.color {
            props.insert("color".to_string(), json!(color.to_string()));
        }
        if let Some(zoom) = p.zoom_level {
            props.insert("zoomLevel".to_string(), json!(zoom));
        }
        if let Some(heading) = p.heading {
            props.insert("heading".to_string(), json!(heading));
        }

        Value::Object(props)
    }

    fn to_feature(&self, geometry: Value, with_kind: bool) -> Value {
        json!({
            "type": "Feature",
            "properties": self.properties_json(with_kind),
            "geometry": geometry,
        })
    }
}

fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// `Point` features for every marker.
pub fn marker_collection(features: &[MapFeature]) -> Value {
    feature_collection(
        features
            .iter()
            .filter_map(|f| match &f.geometry {
                FeatureGeometry::Marker(point) => Some(f.to_feature(
                    json!({ "type": "Point", "coordinates": point }),
                    false,
                )),
                _ => None,
            })
            .collect(),
    )
}

/// `LineString` features for every line.
pub fn line_collection(features: &[MapFeature]) -> Value {
    feature_collection(
        features
            .iter()
            .filter_map(|f| match &f.geometry {
                FeatureGeometry::Line(points) => Some(f.to_feature(
                    json!({ "type": "LineString", "coordinates": points }),
                    false,
                )),
                _ => None,
            })
            .collect(),
    )
}

/// `Polygon` features for every polygon and circle.
///
/// Circles are expanded into a closed ring around their center.
pub fn polygon_collection(features: &[MapFeature]) -> Value {
    feature_collection(
        features
            .iter()
            .filter_map(|f| {
                let ring = match &f.geometry {
                    FeatureGeometry::Polygon(ring) => ring.clone(),
                    FeatureGeometry::Circle { center, radius_km } => {
                        create_circle_polygon(*center, *radius_km)
                    }
                    _ => return None,
                };
                Some(f.to_feature(
                    json!({ "type": "Polygon", "coordinates": [ring] }),
                    true,
                ))
            })
            .collect(),
    )
}

/// Demo feature set around central Riyadh.
pub fn sample_features() -> Vec<MapFeature> {
    vec![
        MapFeature::marker("riyadh-marker", GeoPoint::new(46.6773, 24.7136))
            .with_title("Riyadh City")
            .with_description("Capital of Saudi Arabia"),
        MapFeature::line(
            "connection-line",
            vec![GeoPoint::new(46.6773, 24.7136), GeoPoint::new(46.6823, 24.7186)],
        )
        .with_title("Connection Route")
        .with_color(BRAND_COLORS.primary),
        MapFeature::polygon(
            "area-polygon",
            vec![
                GeoPoint::new(46.6723, 24.7156),
                GeoPoint::new(46.6763, 24.7156),
                GeoPoint::new(46.6763, 24.7116),
                GeoPoint::new(46.6723, 24.7116),
                GeoPoint::new(46.6723, 24.7156),
            ],
        )
        .with_title("Important Area")
        .with_description("Protected zone"),
        MapFeature::circle(
            "circle-area",
            GeoPoint::new(46.6873, 24.7136),
            DEFAULT_CIRCLE_RADIUS_KM,
        )
        .with_title("Circle Zone")
        .with_description("500m radius area"),
    ]
}
