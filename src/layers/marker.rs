use crate::{
    constants::{MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT},
    core::{config::RadiusUnits, geo::LatLng},
    data::feature::EarthquakeFeature,
    style::encoder::VisualEncoding,
    ui::popup::Popup,
};
use serde::{Deserialize, Serialize};

/// Filled circle drawn for one earthquake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarker {
    /// Feed id of the event this marker stands for
    pub feature_id: Option<String>,
    pub position: LatLng,
    pub radius: f64,
    pub units: RadiusUnits,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub weight: f64,
    pub popup: Option<Popup>,
}

impl CircleMarker {
    pub fn new(position: LatLng, radius: f64, fill_color: impl Into<String>) -> Self {
        Self {
            feature_id: None,
            position,
            radius,
            units: RadiusUnits::Pixels,
            fill_color: fill_color.into(),
            fill_opacity: MARKER_FILL_OPACITY,
            stroke_color: MARKER_STROKE_COLOR.to_string(),
            weight: MARKER_STROKE_WEIGHT,
            popup: None,
        }
    }

    /// Marker for `feature` drawn the way `encoding` says
    pub fn from_encoding(feature: &EarthquakeFeature, encoding: VisualEncoding) -> Self {
        let mut marker = Self::new(feature.position, encoding.radius, encoding.color);
        marker.feature_id = feature.id.clone();
        marker.popup = Some(Popup::new(feature.position, encoding.popup_html));
        marker
    }

    pub fn with_units(mut self, units: RadiusUnits) -> Self {
        self.units = units;
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_popup(mut self, content: String) -> Self {
        self.popup = Some(Popup::new(self.position, content));
        self
    }

    pub fn popup_html(&self) -> Option<&str> {
        self.popup.as_ref().map(|p| p.content.as_str())
    }
}
