//! Map style documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::StyleError;

/// Style fields the rendering runtime cannot resolve and that are stripped
/// before a document is handed over.
const UNSUPPORTED_FIELDS: &[&str] = &["sprite"];

/// A map style description as served by the style endpoint.
///
/// The document is opaque apart from the sanitization step: fields other
/// than `sprite` are passed through untouched, including ones this crate
/// does not know about.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDocument(Map<String, Value>);

impl StyleDocument {
    /// Wraps an existing JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parses a response body. The top level must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StyleError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(other) => Err(StyleError::Parse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(StyleError::Parse(e.to_string())),
        }
    }

    /// Removes fields the runtime cannot load (the sprite atlas).
    ///
    /// Idempotent: a document without them comes back unchanged.
    pub fn sanitize(mut self) -> Self {
        for field in UNSUPPORTED_FIELDS {
            self.0.remove(*field);
        }
        self
    }

    pub fn has_sprite(&self) -> bool {
        self.0.contains_key("sprite")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The style's `name`, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Number of entries in the `layers` array.
    pub fn layer_count(&self) -> usize {
        self.0
            .get("layers")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Keys of the `sources` object.
    pub fn source_names(&self) -> Vec<&str> {
        self.0
            .get("sources")
            .and_then(Value::as_object)
            .map(|sources| sources.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Serializes back to JSON text.
    pub fn to_json_string(&self, pretty: bool) -> String {
        let value = Value::Object(self.0.clone());
        if pretty {
            format!("{:#}", value)
        } else {
            value.to_string()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_style() -> Value {
        json!({
            "version": 8,
            "name": "spl_bgmaps",
            "sprite": "https://example.com/sprites/spl",
            "glyphs": "https://example.com/fonts/{fontstack}/{range}.pbf",
            "sources": {
                "openmaptiles": { "type": "vector", "url": "https://example.com/tiles.json" }
            },
            "layers": [
                { "id": "background", "type": "background" },
                { "id": "water", "type": "fill", "source": "openmaptiles" }
            ],
            "x-custom": { "kept": true }
        })
    }

    fn parse(value: &Value) -> StyleDocument {
        StyleDocument::from_slice(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_sanitize_strips_sprite() {
        let doc = parse(&sample_style());
        assert!(doc.has_sprite());

        let clean = doc.sanitize();
        assert!(!clean.has_sprite());
        assert!(clean.get("sprite").is_none());
    }

    #[test]
    fn test_sanitize_preserves_other_fields() {
        let mut expected = sample_style();
        expected.as_object_mut().unwrap().remove("sprite");

        let clean = parse(&sample_style()).sanitize();
        assert_eq!(Value::Object(clean.into_inner()), expected);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = parse(&sample_style()).sanitize();
        let twice = once.clone().sanitize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sanitize_without_sprite_is_unchanged() {
        let doc = parse(&json!({ "version": 8, "layers": [] }));
        assert_eq!(doc.clone().sanitize(), doc);
    }

    #[test]
    fn test_sanitize_strips_empty_sprite() {
        let doc = parse(&json!({ "version": 8, "sprite": "" })).sanitize();
        assert!(!doc.has_sprite());
    }

    #[test]
    fn test_accessors() {
        let doc = parse(&sample_style());
        assert_eq!(doc.name(), Some("spl_bgmaps"));
        assert_eq!(doc.layer_count(), 2);
        assert_eq!(doc.source_names(), vec!["openmaptiles"]);
    }

    #[test]
    fn test_accessors_on_minimal_document() {
        let doc = StyleDocument::default();
        assert_eq!(doc.name(), None);
        assert_eq!(doc.layer_count(), 0);
        assert!(doc.source_names().is_empty());
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = StyleDocument::from_slice(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(StyleError::Parse(_))));
    }

    #[test]
    fn test_rejects_non_object_json() {
        match StyleDocument::from_slice(b"[1, 2, 3]") {
            Err(StyleError::Parse(msg)) => assert!(msg.contains("an array")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_transparently() {
        let doc = parse(&json!({ "version": 8 }));
        assert_eq!(serde_json::to_string(&doc).unwrap(), "{\"version\":8}");
    }
}
