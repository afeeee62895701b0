use crate::{
    constants::MARKER_FILL_OPACITY,
    core::config::{EncoderConfig, MarkerScale, RadiusUnits},
    data::feature::EarthquakeFeature,
    style::palette::DepthPalette,
    ui::popup,
};
use serde::{Deserialize, Serialize};

/// How one earthquake is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEncoding {
    pub radius: f64,
    pub color: String,
    pub popup_html: String,
}

/// Marker radius for `magnitude` at `scale` units per magnitude step.
///
/// Negative magnitudes size to zero.
pub fn radius(magnitude: f64, scale: f64) -> f64 {
    magnitude.max(0.0) * scale
}

/// Turns earthquake features into radius, color and popup text.
///
/// Holds configuration only; encoding a feature never depends on any
/// other feature or on earlier calls.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    scale: MarkerScale,
    palette: DepthPalette,
    fill_opacity: f64,
}

impl FeatureEncoder {
    pub fn new(scale: MarkerScale, palette: DepthPalette) -> Self {
        Self {
            scale,
            palette,
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::new(config.marker_scale, config.palette.clone())
            .with_fill_opacity(config.fill_opacity)
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn fill_opacity(&self) -> f64 {
        self.fill_opacity
    }

    pub fn palette(&self) -> &DepthPalette {
        &self.palette
    }

    pub fn units(&self) -> RadiusUnits {
        self.scale.units()
    }

    pub fn radius(&self, magnitude: f64) -> f64 {
        radius(magnitude, self.scale.resolve())
    }

    pub fn depth_color(&self, depth_km: f64) -> &str {
        self.palette.color_for(depth_km)
    }

    pub fn popup_text(&self, feature: &EarthquakeFeature) -> String {
        popup::earthquake_popup(&feature.place, feature.magnitude, feature.depth_km)
    }

    pub fn encode(&self, feature: &EarthquakeFeature) -> VisualEncoding {
        VisualEncoding {
            radius: self.radius(feature.magnitude),
            color: self.depth_color(feature.depth_km).to_string(),
            popup_html: self.popup_text(feature),
        }
    }

    /// Encodes every feature in order
    pub fn encode_all<'a, I>(&self, features: I) -> Vec<VisualEncoding>
    where
        I: IntoIterator<Item = &'a EarthquakeFeature>,
    {
        features.into_iter().map(|f| self.encode(f)).collect()
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::from_config(&EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn quake(magnitude: f64, depth_km: f64) -> EarthquakeFeature {
        EarthquakeFeature::new(
            "5 km NE of Ridgecrest, CA",
            magnitude,
            LatLng::new(35.66, -117.6),
            depth_km,
        )
    }

    #[test]
    fn test_radius_linear_in_magnitude() {
        let encoder = FeatureEncoder::default();
        assert_eq!(encoder.radius(5.0), 20.0);
        assert_eq!(encoder.radius(0.0), 0.0);
        assert_eq!(encoder.radius(2.5), 10.0);

        let meters = FeatureEncoder::new(MarkerScale::Meters, DepthPalette::standard());
        assert_eq!(meters.radius(2.0), 30_000.0);
        assert_eq!(meters.units(), RadiusUnits::Meters);
    }

    #[test]
    fn test_radius_monotonic() {
        let encoder = FeatureEncoder::new(MarkerScale::Compact, DepthPalette::standard());
        let mut previous = encoder.radius(0.0);
        for step in 1..=100 {
            let current = encoder.radius(step as f64 * 0.1);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_negative_magnitude_sizes_to_zero() {
        let encoder = FeatureEncoder::default();
        assert_eq!(encoder.radius(-0.7), 0.0);
        assert_eq!(radius(-3.0, 15_000.0), 0.0);
    }

    #[test]
    fn test_depth_colors() {
        let encoder = FeatureEncoder::default();
        assert_eq!(encoder.depth_color(90.0), "darkred");
        assert_eq!(encoder.depth_color(89.999), "orangered");
        assert_eq!(encoder.depth_color(10.0), "limegreen");
        assert_eq!(encoder.depth_color(10.5), "yellow");
        assert_eq!(encoder.depth_color(-5.0), "limegreen");
    }

    #[test]
    fn test_encode() {
        let encoder = FeatureEncoder::default();
        let encoding = encoder.encode(&quake(4.2, 72.0));

        assert_eq!(encoding.radius, 16.8);
        assert_eq!(encoding.color, "orangered");
        assert_eq!(
            encoding.popup_html,
            "<h1>Location: 5 km NE of Ridgecrest, CA</h1><hr><h3>Magnitude: 4.2</h3><br><h3>Depth: 72</h3>"
        );
    }

    #[test]
    fn test_encode_is_idempotent() {
        let encoder = FeatureEncoder::default();
        let feature = quake(3.3, 12.0);
        assert_eq!(encoder.encode(&feature), encoder.encode(&feature));
    }

    #[test]
    fn test_encode_all_independent() {
        let encoder = FeatureEncoder::default();
        let features = vec![quake(1.0, 5.0), quake(6.0, 300.0), quake(1.0, 5.0)];
        let encodings = encoder.encode_all(&features);

        assert_eq!(encodings.len(), 3);
        assert_eq!(encodings[0], encodings[2]);
        assert_eq!(encodings[1].color, "darkred");
        assert_eq!(encodings[0], encoder.encode(&features[0]));
    }

    #[test]
    fn test_fill_opacity_from_config() {
        let config = EncoderConfig {
            fill_opacity: 0.5,
            ..EncoderConfig::default()
        };
        assert_eq!(FeatureEncoder::from_config(&config).fill_opacity(), 0.5);
        assert_eq!(FeatureEncoder::default().fill_opacity(), 0.8);
    }

    #[test]
    fn test_custom_palette() {
        let encoder = FeatureEncoder::new(MarkerScale::Pixels, DepthPalette::hex());
        assert_eq!(encoder.depth_color(95.0), "#ea2c2c");
        assert_eq!(encoder.depth_color(0.0), "#98ee00");
    }
}
