use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{value::RawValue, Map, Value};

/// GeoJSON geometry types. Positions keep every ordinate so the depth in a
/// `[lon, lat, depth]` point survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Vec<f64>,
    },
    MultiPoint {
        coordinates: Vec<Vec<f64>>,
    },
    LineString {
        coordinates: Vec<Vec<f64>>,
    },
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    /// Any geometry type this crate does not draw
    #[serde(other)]
    Unsupported,
}

impl GeoJsonGeometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoJsonGeometry::Point { .. } => "Point",
            GeoJsonGeometry::MultiPoint { .. } => "MultiPoint",
            GeoJsonGeometry::LineString { .. } => "LineString",
            GeoJsonGeometry::Polygon { .. } => "Polygon",
            GeoJsonGeometry::Unsupported => "Unsupported",
        }
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl GeoJsonFeature {
    /// Looks up a property, treating JSON `null` as absent
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .filter(|value| !value.is_null())
    }

    /// The feature id rendered as text, whether the feed sent a string or a number
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Header block the USGS summary feeds attach to every collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Root of a feed document.
///
/// Features stay as unparsed JSON text here so one malformed entry, even
/// one holding a number `f64` cannot represent, cannot fail the whole
/// collection; each is validated separately downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoJsonFeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
}

impl GeoJsonFeatureCollection {
    /// Parses a feed document, rejecting anything but a `FeatureCollection`
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        let collection: Self = serde_json::from_str(geojson_str)
            .map_err(|e| MapError::ParseError(format!("Invalid GeoJSON: {}", e)))?;

        if collection.kind != "FeatureCollection" {
            return Err(MapError::ParseError(format!(
                "expected a FeatureCollection, got {}",
                collection.kind
            )));
        }

        Ok(collection)
    }
}

#[derive(Deserialize)]
struct FeatureId {
    #[serde(default)]
    id: Option<Value>,
}

/// Best-effort id of a raw feature, read without interpreting any other
/// member, so it still works for entries that fail validation
pub fn raw_feature_id(raw: &RawValue) -> Option<String> {
    match serde_json::from_str::<FeatureId>(raw.get()).ok()?.id? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "metadata": {"title": "USGS All Earthquakes, Past Week", "count": 1, "status": 200},
            "features": [
                {
                    "type": "Feature",
                    "id": "ak0241xyz",
                    "properties": {"place": "10 km S of Anchorage, Alaska", "mag": 2.1},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-149.9, 61.1, 35.2]
                    }
                }
            ],
            "bbox": [-149.9, 61.1, 35.2, -149.9, 61.1, 35.2]
        }
        "#;

        let collection = GeoJsonFeatureCollection::from_str(geojson_str).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(
            raw_feature_id(&collection.features[0]).as_deref(),
            Some("ak0241xyz")
        );

        let metadata = collection.metadata.unwrap();
        assert_eq!(metadata.count, Some(1));
        assert_eq!(metadata.title.as_deref(), Some("USGS All Earthquakes, Past Week"));
    }

    #[test]
    fn test_rejects_non_collection() {
        let err = GeoJsonFeatureCollection::from_str(
            r#"{"type": "Feature", "features": [], "geometry": null}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::ParseError(_)));

        assert!(GeoJsonFeatureCollection::from_str("<html>503</html>").is_err());
    }

    #[test]
    fn test_out_of_range_number_stays_in_its_feature() {
        let collection = GeoJsonFeatureCollection::from_str(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "id": 7, "properties": {"mag": 1e400}, "geometry": null}
            ]}"#,
        )
        .unwrap();

        assert_eq!(collection.features.len(), 1);
        assert!(collection.features[0].get().contains("1e400"));
        assert_eq!(raw_feature_id(&collection.features[0]).as_deref(), Some("7"));
    }

    #[test]
    fn test_point_keeps_depth() {
        let geometry: GeoJsonGeometry =
            serde_json::from_str(r#"{"type": "Point", "coordinates": [-155.28, 19.41, -1.3]}"#)
                .unwrap();

        assert_eq!(
            geometry,
            GeoJsonGeometry::Point {
                coordinates: vec![-155.28, 19.41, -1.3]
            }
        );
    }

    #[test]
    fn test_unknown_geometry_type() {
        let geometry: GeoJsonGeometry = serde_json::from_str(
            r#"{"type": "GeometryCollection", "geometries": []}"#,
        )
        .unwrap();
        assert_eq!(geometry, GeoJsonGeometry::Unsupported);
        assert_eq!(geometry.type_name(), "Unsupported");
    }

    #[test]
    fn test_null_property_is_absent() {
        let feature: GeoJsonFeature = serde_json::from_str(
            r#"{"type": "Feature", "id": 42, "properties": {"mag": null, "place": "x"}, "geometry": null}"#,
        )
        .unwrap();

        assert!(feature.property("mag").is_none());
        assert_eq!(feature.property("place"), Some(&Value::from("x")));
        assert_eq!(feature.id_string().as_deref(), Some("42"));
    }
}
