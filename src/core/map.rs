//! Map assembly.
//!
//! [`init_map`] builds the static part of the page (base layers, layer
//! control, legend) and [`render_pass`] produces a fresh earthquake overlay.
//! Both return plain values; the caller joins them with
//! [`Map::set_earthquakes`].

use crate::{
    core::{
        config::MapConfig,
        geo::{LatLng, LatLngBounds},
    },
    data::feed::{parse_feed, FeedSource},
    layers::{
        base::{LayerRole, LayerTrait},
        manager::LayerManager,
        overlay::{EarthquakeLayer, EARTHQUAKE_LAYER_ID},
        tile::{BaseLayerKind, TileLayer},
    },
    style::{encoder::FeatureEncoder, palette::DepthPalette},
    ui::{controls::LayerControl, legend::Legend},
    Result,
};

pub struct Map {
    title: String,
    center: LatLng,
    zoom: f64,
    fit_to_data: bool,
    layers: LayerManager,
    control: LayerControl,
    legend: Legend,
}

impl Map {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn control(&self) -> &LayerControl {
        &self.control
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Base tile layers in control order
    pub fn base_layers(&self) -> Vec<&TileLayer> {
        self.control
            .base_layers
            .iter()
            .filter_map(|name| {
                self.layers
                    .layers_with_role(LayerRole::Base)
                    .into_iter()
                    .find(|layer| layer.name() == name)
                    .and_then(|layer| layer.as_any().downcast_ref::<TileLayer>())
            })
            .collect()
    }

    pub fn active_base(&self) -> Option<&dyn LayerTrait> {
        self.layers.active_base()
    }

    pub fn set_base_layer(&mut self, kind: BaseLayerKind) -> Result<()> {
        self.layers.set_active_base(kind.id())
    }

    /// Installs `layer` as the earthquake overlay, replacing the previous one
    /// but keeping its visibility.
    pub fn set_earthquakes(&mut self, mut layer: EarthquakeLayer) -> Result<()> {
        if let Some(previous) = self.layers.get_layer(EARTHQUAKE_LAYER_ID) {
            layer.set_visible(previous.is_visible());
        }
        self.control.add_overlay(layer.name().to_string());
        self.layers.add_layer(Box::new(layer))
    }

    pub fn earthquakes(&self) -> Option<&EarthquakeLayer> {
        self.layers.get_layer_as::<EarthquakeLayer>(EARTHQUAKE_LAYER_ID)
    }

    pub fn set_earthquakes_visible(&mut self, visible: bool) -> Result<()> {
        self.layers.set_overlay_visible(EARTHQUAKE_LAYER_ID, visible)
    }

    /// Extent the view should open on: the earthquakes when fitting to data
    /// and there are any, otherwise `None` for the fixed center and zoom.
    pub fn fit_bounds(&self) -> Option<LatLngBounds> {
        if !self.fit_to_data {
            return None;
        }
        self.earthquakes().and_then(|layer| layer.bounds())
    }
}

/// Builds the map chrome: base layers, layer control and depth legend
pub fn init_map(config: &MapConfig, palette: &DepthPalette) -> Result<Map> {
    let mut layers = LayerManager::new();
    let mut control = LayerControl::new();

    for kind in &config.base_layers {
        let tile_layer = kind.tile_layer();
        control.add_base_layer(tile_layer.name().to_string());
        layers.add_layer(Box::new(tile_layer))?;
    }
    layers.set_active_base(config.default_base.id())?;

    log::debug!(
        "map initialised with {} base layers, default {}",
        config.base_layers.len(),
        config.default_base.id()
    );

    Ok(Map {
        title: config.title.clone(),
        center: config.center,
        zoom: config.zoom,
        fit_to_data: config.fit_to_data,
        layers,
        control,
        legend: Legend::from_palette(palette, config.legend_floor),
    })
}

/// One fetch-parse-encode cycle.
///
/// Never fails: a feed that cannot be fetched or parsed is logged and
/// yields an empty overlay so the base map still renders.
pub async fn render_pass(source: &dyn FeedSource, encoder: &FeatureEncoder) -> EarthquakeLayer {
    let text = match source.fetch().await {
        Ok(text) => text,
        Err(e) => {
            log::error!("failed to fetch {}: {}", source.describe(), e);
            return EarthquakeLayer::empty();
        }
    };

    match parse_feed(&text) {
        Ok(batch) => {
            let layer = EarthquakeLayer::from_batch(&batch, encoder);
            log::info!(
                "encoded {} earthquakes from {} ({} skipped)",
                layer.len(),
                source.describe(),
                layer.skipped()
            );
            layer
        }
        Err(e) => {
            log::error!("failed to parse feed from {}: {}", source.describe(), e);
            EarthquakeLayer::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feed::StaticFeedSource;

    const FEED: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "id": "nc1", "properties": {"mag": 3.0, "place": "The Geysers, CA"},
         "geometry": {"type": "Point", "coordinates": [-122.8, 38.8, 2.1]}},
        {"type": "Feature", "id": "us2", "properties": {"mag": 6.1, "place": "Kuril Islands"},
         "geometry": {"type": "Point", "coordinates": [153.2, 46.5, 95.0]}}
    ]}"#;

    fn default_map() -> Map {
        init_map(&MapConfig::default(), &DepthPalette::standard()).unwrap()
    }

    #[test]
    fn test_init_map() {
        let map = default_map();

        assert_eq!(map.center(), LatLng::new(52.245, -104.847));
        assert_eq!(map.zoom(), 5.0);
        assert_eq!(map.control().base_layers, vec!["Street", "Topography", "Satellite"]);
        assert!(map.control().overlays.is_empty());
        assert!(!map.control().collapsed);
        assert_eq!(map.active_base().unwrap().id(), "street");
        assert_eq!(map.legend().entries.len(), 6);
        assert!(map.earthquakes().is_none());
        assert_eq!(map.base_layers().len(), 3);
    }

    #[test]
    fn test_default_base_from_config() {
        let config = MapConfig {
            default_base: BaseLayerKind::Topography,
            ..MapConfig::default()
        };
        let mut map = init_map(&config, &DepthPalette::standard()).unwrap();
        assert_eq!(map.active_base().unwrap().id(), "topography");

        map.set_base_layer(BaseLayerKind::Imagery).unwrap();
        assert_eq!(map.active_base().unwrap().id(), "imagery");
    }

    #[test]
    fn test_set_earthquakes_keeps_visibility() {
        let mut map = default_map();
        map.set_earthquakes(EarthquakeLayer::empty()).unwrap();
        assert_eq!(map.control().overlays, vec!["Earthquakes"]);

        map.set_earthquakes_visible(false).unwrap();
        map.set_earthquakes(EarthquakeLayer::empty()).unwrap();

        assert!(!map.earthquakes().unwrap().is_visible());
        assert_eq!(map.control().overlays.len(), 1);
    }

    #[test]
    fn test_fit_bounds_only_when_enabled() {
        let encoder = FeatureEncoder::default();
        let batch = parse_feed(FEED).unwrap();

        let mut fixed = default_map();
        fixed
            .set_earthquakes(EarthquakeLayer::from_batch(&batch, &encoder))
            .unwrap();
        assert!(fixed.fit_bounds().is_none());

        let config = MapConfig {
            fit_to_data: true,
            ..MapConfig::default()
        };
        let mut fitted = init_map(&config, &DepthPalette::standard()).unwrap();
        assert!(fitted.fit_bounds().is_none());
        fitted
            .set_earthquakes(EarthquakeLayer::from_batch(&batch, &encoder))
            .unwrap();
        let bounds = fitted.fit_bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(38.8, -122.8));
        assert_eq!(bounds.north_east, LatLng::new(46.5, 153.2));
    }

    #[tokio::test]
    async fn test_render_pass() {
        let source = StaticFeedSource::new(FEED);
        let layer = render_pass(&source, &FeatureEncoder::default()).await;

        assert_eq!(layer.len(), 2);
        assert_eq!(layer.markers()[0].fill_color, "limegreen");
        assert_eq!(layer.markers()[1].fill_color, "darkred");
        assert_eq!(layer.markers()[1].radius, 24.4);
    }

    #[tokio::test]
    async fn test_render_pass_degrades_to_empty_layer() {
        let garbage = StaticFeedSource::new("<html>upstream timeout</html>");
        assert!(render_pass(&garbage, &FeatureEncoder::default()).await.is_empty());

        let missing = crate::data::feed::FileFeedSource::new("/nonexistent/feed.geojson");
        assert!(render_pass(&missing, &FeatureEncoder::default()).await.is_empty());
    }
}
