//! Validated earthquake records.
//!
//! Feeds are external, untrusted input. Every raw feature goes through
//! [`EarthquakeFeature::from_raw`] once; a feature that fails is reported
//! and dropped without touching its neighbours.

use crate::{
    constants::UNKNOWN_PLACE,
    core::geo::LatLng,
    data::geojson::{GeoJsonFeature, GeoJsonGeometry},
};
use serde::{Deserialize, Serialize};
use serde_json::{value::RawValue, Value};

/// Why a single feed entry could not become an [`EarthquakeFeature`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("expected a Feature, got {0}")]
    NotAFeature(String),

    #[error("malformed feature: {0}")]
    Malformed(String),

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("unsupported geometry type {0}, expected Point")]
    UnsupportedGeometry(&'static str),

    #[error("point has {0} coordinates, expected [lon, lat, depth]")]
    MissingDepth(usize),

    #[error("feature has no magnitude")]
    MissingMagnitude,

    #[error("position ({lat}, {lng}) is outside valid latitude/longitude ranges")]
    InvalidPosition { lat: f64, lng: f64 },

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// One seismic event, read-only once validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub place: String,
    pub magnitude: f64,
    /// Hypocenter depth in kilometers, negative above the reference surface
    pub depth_km: f64,
    pub position: LatLng,
    /// Origin time in milliseconds since the Unix epoch
    pub time_ms: Option<i64>,
    /// Event detail page
    pub url: Option<String>,
}

impl EarthquakeFeature {
    pub fn new(place: impl Into<String>, magnitude: f64, position: LatLng, depth_km: f64) -> Self {
        Self {
            id: None,
            place: place.into(),
            magnitude,
            depth_km,
            position,
            time_ms: None,
            url: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// GeoJSON position triple `[lon, lat, depth]`
    pub fn coordinates(&self) -> [f64; 3] {
        [self.position.lng, self.position.lat, self.depth_km]
    }

    /// Validates one unparsed entry of a feed's `features` array
    pub fn from_raw(raw: &RawValue) -> Result<Self, FeatureError> {
        let feature: GeoJsonFeature =
            serde_json::from_str(raw.get()).map_err(|e| FeatureError::Malformed(e.to_string()))?;
        Self::try_from(&feature)
    }

    /// Validates a feature that is already a JSON value
    pub fn from_value(value: &Value) -> Result<Self, FeatureError> {
        let feature: GeoJsonFeature = serde_json::from_value(value.clone())
            .map_err(|e| FeatureError::Malformed(e.to_string()))?;
        Self::try_from(&feature)
    }
}

impl TryFrom<&GeoJsonFeature> for EarthquakeFeature {
    type Error = FeatureError;

    fn try_from(feature: &GeoJsonFeature) -> Result<Self, Self::Error> {
        if feature.kind != "Feature" {
            return Err(FeatureError::NotAFeature(feature.kind.clone()));
        }

        let coordinates = match feature.geometry.as_ref() {
            None => return Err(FeatureError::MissingGeometry),
            Some(GeoJsonGeometry::Point { coordinates }) => coordinates,
            Some(other) => return Err(FeatureError::UnsupportedGeometry(other.type_name())),
        };

        let (lng, lat, depth_km) = match coordinates.as_slice() {
            [lng, lat, depth, ..] => (*lng, *lat, *depth),
            short => return Err(FeatureError::MissingDepth(short.len())),
        };

        for (name, ordinate) in [("longitude", lng), ("latitude", lat), ("depth", depth_km)] {
            if !ordinate.is_finite() {
                return Err(FeatureError::NonFinite(name));
            }
        }

        let position = LatLng::from_lng_lat(lng, lat);
        if !position.is_valid() {
            return Err(FeatureError::InvalidPosition { lat, lng });
        }

        let magnitude = feature
            .property("mag")
            .and_then(Value::as_f64)
            .ok_or(FeatureError::MissingMagnitude)?;
        if !magnitude.is_finite() {
            return Err(FeatureError::NonFinite("magnitude"));
        }

        let place = feature
            .property("place")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|place| !place.is_empty())
            .unwrap_or(UNKNOWN_PLACE)
            .to_string();

        Ok(Self {
            id: feature.id_string(),
            place,
            magnitude,
            depth_km,
            position,
            time_ms: feature.property("time").and_then(Value::as_i64),
            url: feature
                .property("url")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}
