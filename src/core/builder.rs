//! Map builder for fluent API configuration
//!
//! [`MapBuilder`] collects a [`QuakeMapConfig`] one setting at a time and
//! hands out the pieces a render needs: the map chrome, the feature encoder
//! and the feed source.

use crate::{
    core::{
        config::{MarkerScale, QuakeMapConfig},
        geo::LatLng,
        map::{init_map, Map},
    },
    data::feed::{FeedMagnitude, FeedPeriod, FeedSource, UsgsFeed},
    layers::tile::BaseLayerKind,
    style::{encoder::FeatureEncoder, palette::DepthPalette},
    Result,
};
use std::path::PathBuf;

/// Builder for creating and configuring Map instances
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    config: QuakeMapConfig,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration
    pub fn with_config(config: QuakeMapConfig) -> Self {
        Self { config }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.map.title = title.into();
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.config.map.center = center;
        self.config.map.zoom = zoom;
        self
    }

    /// Open on the extent of the earthquakes instead of the fixed view
    pub fn with_fit_to_data(mut self, enabled: bool) -> Self {
        self.config.map.fit_to_data = enabled;
        self
    }

    /// Base maps offered in the layer control, in order
    pub fn with_base_layers(mut self, layers: Vec<BaseLayerKind>) -> Self {
        self.config.map.base_layers = layers;
        self
    }

    pub fn with_default_base(mut self, kind: BaseLayerKind) -> Self {
        self.config.map.default_base = kind;
        self
    }

    /// Lower label of the shallowest legend entry
    pub fn with_legend_floor(mut self, floor: f64) -> Self {
        self.config.map.legend_floor = floor;
        self
    }

    pub fn with_marker_scale(mut self, scale: MarkerScale) -> Self {
        self.config.encoder.marker_scale = scale;
        self
    }

    pub fn with_palette(mut self, palette: DepthPalette) -> Self {
        self.config.encoder.palette = palette;
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.config.encoder.fill_opacity = opacity;
        self
    }

    /// Fetch from an explicit feed URL
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.config.feed.url = Some(url.into());
        self.config.feed.file = None;
        self
    }

    /// Read the feed from a local GeoJSON file
    pub fn with_feed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.feed.file = Some(path.into());
        self.config.feed.url = None;
        self
    }

    /// Use one of the USGS summary feeds
    pub fn with_usgs_feed(mut self, magnitude: FeedMagnitude, period: FeedPeriod) -> Self {
        self.config.feed.usgs = UsgsFeed::new(magnitude, period);
        self.config.feed.url = None;
        self.config.feed.file = None;
        self
    }

    pub fn with_feed_timeout(mut self, secs: u64) -> Self {
        self.config.feed.timeout_secs = secs;
        self
    }

    pub fn config(&self) -> &QuakeMapConfig {
        &self.config
    }

    pub fn into_config(self) -> QuakeMapConfig {
        self.config
    }

    /// Encoder for the configured scale and palette
    pub fn encoder(&self) -> FeatureEncoder {
        FeatureEncoder::from_config(&self.config.encoder)
    }

    pub fn feed_source(&self) -> Result<Box<dyn FeedSource>> {
        self.config.feed.source()
    }

    /// Validate the configuration and build the map chrome
    pub fn build(&self) -> Result<Map> {
        self.config.validate()?;
        init_map(&self.config.map, &self.config.encoder.palette)
    }
}

/// Preset configurations
impl MapBuilder {
    /// Everything USGS recorded in the past week, North American view
    pub fn weekly_overview() -> Self {
        Self::new().with_usgs_feed(FeedMagnitude::All, FeedPeriod::Week)
    }

    /// Significant events of the past month on a world view
    pub fn significant_month() -> Self {
        Self::new()
            .with_usgs_feed(FeedMagnitude::Significant, FeedPeriod::Month)
            .with_center_and_zoom(LatLng::new(20.0, 0.0), 2.0)
            .with_marker_scale(MarkerScale::Pixels)
    }

    /// Past day of M2.5+ events, framed on the data, with meter radii
    pub fn daily_regional() -> Self {
        Self::new()
            .with_usgs_feed(FeedMagnitude::M2_5, FeedPeriod::Day)
            .with_marker_scale(MarkerScale::Meters)
            .with_default_base(BaseLayerKind::Topography)
            .with_fit_to_data(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RadiusUnits;

    #[test]
    fn test_map_builder_basic() {
        let map = MapBuilder::new()
            .with_title("Quakes")
            .with_center_and_zoom(LatLng::new(35.0, 139.0), 6.0)
            .build()
            .unwrap();

        assert_eq!(map.title(), "Quakes");
        assert_eq!(map.center(), LatLng::new(35.0, 139.0));
        assert_eq!(map.zoom(), 6.0);
        assert_eq!(map.active_base().unwrap().id(), "street");
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        assert!(MapBuilder::new().with_center_and_zoom(LatLng::default(), 25.0).build().is_err());
        assert!(MapBuilder::new().with_fill_opacity(1.5).build().is_err());
        assert!(MapBuilder::new()
            .with_base_layers(vec![BaseLayerKind::Topography])
            .build()
            .is_err());
    }

    #[test]
    fn test_feed_selection_is_exclusive() {
        let builder = MapBuilder::new()
            .with_feed_file("quakes.geojson")
            .with_feed_url("https://example.com/feed.geojson");
        assert!(builder.config().feed.file.is_none());
        assert_eq!(
            builder.config().feed.resolved_url(),
            "https://example.com/feed.geojson"
        );

        let builder = builder.with_usgs_feed(FeedMagnitude::M4_5, FeedPeriod::Day);
        assert!(builder.config().feed.resolved_url().ends_with("4.5_day.geojson"));
    }

    #[test]
    fn test_weekly_overview_preset() {
        let builder = MapBuilder::weekly_overview();
        assert!(builder.config().feed.resolved_url().ends_with("all_week.geojson"));
        assert_eq!(builder.encoder().radius(5.0), 20.0);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_daily_regional_preset() {
        let builder = MapBuilder::daily_regional();
        assert_eq!(builder.encoder().units(), RadiusUnits::Meters);

        let map = builder.build().unwrap();
        assert_eq!(map.active_base().unwrap().id(), "topography");
    }

    #[test]
    fn test_significant_month_preset() {
        let map = MapBuilder::significant_month().build().unwrap();
        assert_eq!(map.zoom(), 2.0);
    }
}
