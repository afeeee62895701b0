//! The earthquake overlay: one circle marker per validated feature.

use crate::{
    constants::EARTHQUAKE_LAYER_NAME,
    core::geo::LatLngBounds,
    data::{feature::EarthquakeFeature, feed::FeedBatch},
    layers::{
        base::{LayerProperties, LayerRole, LayerTrait, LayerType},
        marker::CircleMarker,
    },
    style::encoder::FeatureEncoder,
};

pub const EARTHQUAKE_LAYER_ID: &str = "earthquakes";

pub struct EarthquakeLayer {
    properties: LayerProperties,
    markers: Vec<CircleMarker>,
    /// Feed entries dropped during validation
    skipped: usize,
    /// Feed title, when the feed supplied one
    source_title: Option<String>,
}

impl EarthquakeLayer {
    /// An overlay with nothing on it, used when the feed is unavailable
    pub fn empty() -> Self {
        let properties = LayerProperties::new(
            EARTHQUAKE_LAYER_ID.to_string(),
            EARTHQUAKE_LAYER_NAME.to_string(),
            LayerType::Marker,
            LayerRole::Overlay,
        );
        Self {
            properties,
            markers: Vec::new(),
            skipped: 0,
            source_title: None,
        }
    }

    /// Encodes `features` in order, one marker each
    pub fn from_features(features: &[EarthquakeFeature], encoder: &FeatureEncoder) -> Self {
        let units = encoder.units();
        let markers = features
            .iter()
            .map(|feature| {
                CircleMarker::from_encoding(feature, encoder.encode(feature))
                    .with_units(units)
                    .with_fill_opacity(encoder.fill_opacity())
            })
            .collect();

        Self {
            markers,
            ..Self::empty()
        }
    }

    pub fn from_batch(batch: &FeedBatch, encoder: &FeatureEncoder) -> Self {
        let mut layer = Self::from_features(&batch.features, encoder);
        layer.skipped = batch.skipped.len();
        layer.source_title = batch.title().map(str::to_string);
        layer
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn source_title(&self) -> Option<&str> {
        self.source_title.as_deref()
    }
}

impl Default for EarthquakeLayer {
    fn default() -> Self {
        Self::empty()
    }
}

impl LayerTrait for EarthquakeLayer {
    crate::impl_layer_trait!(EarthquakeLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "count": self.markers.len(),
            "skipped": self.skipped,
            "title": self.source_title,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.markers.iter().map(|m| m.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            config::{MarkerScale, RadiusUnits},
            geo::LatLng,
        },
        data::feed::parse_feed,
        style::palette::DepthPalette,
    };

    fn features() -> Vec<EarthquakeFeature> {
        vec![
            EarthquakeFeature::new("Tonga", 5.5, LatLng::new(-20.1, -174.2), 210.0),
            EarthquakeFeature::new("Puerto Rico", 2.9, LatLng::new(18.0, -66.8), 11.0),
        ]
    }

    #[test]
    fn test_empty_layer() {
        let layer = EarthquakeLayer::empty();
        assert!(layer.is_empty());
        assert_eq!(layer.id(), EARTHQUAKE_LAYER_ID);
        assert_eq!(layer.name(), "Earthquakes");
        assert_eq!(layer.role(), LayerRole::Overlay);
        assert!(layer.is_visible());
        assert!(layer.bounds().is_none());
    }

    #[test]
    fn test_from_features_preserves_order() {
        let layer = EarthquakeLayer::from_features(&features(), &FeatureEncoder::default());

        assert_eq!(layer.len(), 2);
        assert_eq!(layer.markers()[0].fill_color, "darkred");
        assert_eq!(layer.markers()[0].radius, 22.0);
        assert_eq!(layer.markers()[1].fill_color, "yellow");

        let bounds = layer.bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(-20.1, -174.2));
        assert_eq!(bounds.north_east, LatLng::new(18.0, -66.8));
    }

    #[test]
    fn test_meter_markers() {
        let encoder = FeatureEncoder::new(MarkerScale::Meters, DepthPalette::standard());
        let layer = EarthquakeLayer::from_features(&features(), &encoder);
        assert!(layer.markers().iter().all(|m| m.units == RadiusUnits::Meters));
        assert!(layer.markers().iter().all(|m| m.fill_opacity == 0.8));
        assert_eq!(layer.markers()[1].radius, 43_500.0);
    }

    #[test]
    fn test_from_batch_counts_skips() {
        let batch = parse_feed(
            r#"{"type": "FeatureCollection", "metadata": {"title": "Past Hour"}, "features": [
                {"type": "Feature", "properties": {"mag": 1.2, "place": "a"},
                 "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}},
                {"type": "Feature", "properties": {"place": "b"},
                 "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}}
            ]}"#,
        )
        .unwrap();

        let layer = EarthquakeLayer::from_batch(&batch, &FeatureEncoder::default());
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.skipped(), 1);
        assert_eq!(layer.source_title(), Some("Past Hour"));
        assert_eq!(layer.options()["skipped"], 1);
    }
}
