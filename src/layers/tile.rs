use crate::{
    constants::MAX_ZOOM,
    layers::base::{LayerProperties, LayerRole, LayerTrait, LayerType},
};
use serde::{Deserialize, Serialize};

/// Bundled background maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseLayerKind {
    Street,
    Topography,
    Imagery,
}

impl BaseLayerKind {
    pub fn id(&self) -> &'static str {
        match self {
            BaseLayerKind::Street => "street",
            BaseLayerKind::Topography => "topography",
            BaseLayerKind::Imagery => "imagery",
        }
    }

    /// Label shown in the layer control
    pub fn display_name(&self) -> &'static str {
        match self {
            BaseLayerKind::Street => "Street",
            BaseLayerKind::Topography => "Topography",
            BaseLayerKind::Imagery => "Satellite",
        }
    }

    pub fn tile_layer(&self) -> TileLayer {
        match self {
            BaseLayerKind::Street => TileLayer::street(),
            BaseLayerKind::Topography => TileLayer::topography(),
            BaseLayerKind::Imagery => TileLayer::imagery(),
        }
    }
}

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution HTML
    pub attribution: String,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            max_zoom: MAX_ZOOM,
            min_zoom: 0,
        }
    }
}

/// A background layer of map tiles from a tile server
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        let properties = LayerProperties::new(id, name, LayerType::Tile, LayerRole::Base);
        Self {
            properties,
            options,
        }
    }

    /// OpenStreetMap standard tiles
    pub fn street() -> Self {
        let kind = BaseLayerKind::Street;
        Self::with_options(
            kind.id().to_string(),
            kind.display_name().to_string(),
            TileLayerOptions::default(),
        )
    }

    /// OpenTopoMap contour and hillshade tiles
    pub fn topography() -> Self {
        let kind = BaseLayerKind::Topography;
        let options = TileLayerOptions {
            url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)".to_string(),
            max_zoom: 17,
            ..TileLayerOptions::default()
        };
        Self::with_options(kind.id().to_string(), kind.display_name().to_string(), options)
    }

    /// Esri World Imagery
    pub fn imagery() -> Self {
        let kind = BaseLayerKind::Imagery;
        let options = TileLayerOptions {
            url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".to_string(),
            // ArcGIS doesn't use subdomains
            subdomains: Vec::new(),
            attribution: "Tiles &copy; Esri &mdash; Source: Esri, Maxar, Earthstar Geographics, and the GIS User Community".to_string(),
            max_zoom: 18,
            ..TileLayerOptions::default()
        };
        Self::with_options(kind.id().to_string(), kind.display_name().to_string(), options)
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "urlTemplate": self.options.url_template,
            "subdomains": self.options.subdomains,
            "attribution": self.options.attribution,
            "maxZoom": self.options.max_zoom,
            "minZoom": self.options.min_zoom,
            "opacity": self.properties.opacity,
        })
    }
}
