//! Configuration for the feed, map view, feature encoding and output.
//!
//! Every section has defaults, so a JSON config file only needs the keys it
//! changes. Marker sizing follows a preset-with-`resolve()` pattern: named
//! scales cover the common marker kinds and `Custom` takes anything else.

use crate::{
    constants::{
        COMPACT_RADIUS_SCALE, DEFAULT_CENTER, DEFAULT_FEED_TIMEOUT_SECS, DEFAULT_ZOOM,
        MARKER_FILL_OPACITY, MAX_ZOOM, METER_RADIUS_SCALE, PIXEL_RADIUS_SCALE,
    },
    core::geo::LatLng,
    data::feed::{FeedSource, FileFeedSource, HttpFeedSource, UsgsFeed},
    layers::tile::BaseLayerKind,
    style::palette::DepthPalette,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// What a marker radius is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusUnits {
    /// Screen pixels, constant across zoom levels
    #[default]
    Pixels,
    /// Ground meters, growing with zoom
    Meters,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerScale {
    /// 3 px per magnitude unit
    Compact,
    /// 4 px per magnitude unit
    #[default]
    Pixels,
    /// 15 km per magnitude unit
    Meters,
    Custom { factor: f64, units: RadiusUnits },
}

impl MarkerScale {
    /// Radius per unit of magnitude
    pub fn resolve(&self) -> f64 {
        match self {
            Self::Compact => COMPACT_RADIUS_SCALE,
            Self::Pixels => PIXEL_RADIUS_SCALE,
            Self::Meters => METER_RADIUS_SCALE,
            Self::Custom { factor, .. } => *factor,
        }
    }

    pub fn units(&self) -> RadiusUnits {
        match self {
            Self::Compact | Self::Pixels => RadiusUnits::Pixels,
            Self::Meters => RadiusUnits::Meters,
            Self::Custom { units, .. } => *units,
        }
    }
}

impl std::str::FromStr for MarkerScale {
    type Err = MapError;

    /// Accepts `compact`, `pixels`, `meters` or a bare pixel factor
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pixels" => Ok(Self::Pixels),
            "meters" => Ok(Self::Meters),
            other => other
                .parse::<f64>()
                .map(|factor| Self::Custom {
                    factor,
                    units: RadiusUnits::Pixels,
                })
                .map_err(|_| {
                    MapError::Config(format!(
                        "unknown marker scale '{}', expected compact, pixels, meters or a number",
                        other
                    ))
                }),
        }
    }
}

/// Where the feed comes from. A file wins over a URL, which wins over the
/// USGS feed selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub usgs: UsgsFeed,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            usgs: UsgsFeed::default(),
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

impl FeedConfig {
    /// The URL an HTTP source would hit
    pub fn resolved_url(&self) -> String {
        self.url.clone().unwrap_or_else(|| self.usgs.url())
    }

    pub fn source(&self) -> Result<Box<dyn FeedSource>> {
        if let Some(path) = &self.file {
            return Ok(Box::new(FileFeedSource::new(path)));
        }

        let source = HttpFeedSource::with_timeout(
            self.resolved_url(),
            Duration::from_secs(self.timeout_secs),
        )?;
        Ok(Box::new(source))
    }
}

/// Initial view and chrome of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub center: LatLng,
    pub zoom: f64,
    /// Base layers offered in the layer control, in display order
    pub base_layers: Vec<BaseLayerKind>,
    /// Base layer shown on load
    pub default_base: BaseLayerKind,
    /// Lower label of the legend's catch-all row
    pub legend_floor: f64,
    /// Zoom to the earthquakes instead of the fixed center when there are any
    pub fit_to_data: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Earthquakes".to_string(),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            base_layers: vec![
                BaseLayerKind::Street,
                BaseLayerKind::Topography,
                BaseLayerKind::Imagery,
            ],
            default_base: BaseLayerKind::Street,
            legend_floor: -10.0,
            fit_to_data: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub marker_scale: MarkerScale,
    pub palette: DepthPalette,
    pub fill_opacity: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            marker_scale: MarkerScale::default(),
            palette: DepthPalette::default(),
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone Leaflet page
    #[default]
    Html,
    /// Marker descriptor list
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(MapError::Config(format!(
                "unknown output format '{}', expected html or json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: PathBuf,
    /// Seconds between refresh cycles; `None` renders once
    pub refresh_secs: Option<u64>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            path: PathBuf::from("earthquakes.html"),
            refresh_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuakeMapConfig {
    pub feed: FeedConfig,
    pub map: MapConfig,
    pub encoder: EncoderConfig,
    pub output: OutputConfig,
}

impl QuakeMapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MapError::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let scale = self.encoder.marker_scale.resolve();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MapError::Config(format!(
                "marker scale must be a positive number, got {}",
                scale
            )));
        }

        if !(0.0..=1.0).contains(&self.encoder.fill_opacity) {
            return Err(MapError::Config(format!(
                "fill opacity must be within 0..=1, got {}",
                self.encoder.fill_opacity
            )));
        }

        self.encoder.palette.validate()?;

        if !(0.0..=f64::from(MAX_ZOOM)).contains(&self.map.zoom) {
            return Err(MapError::Config(format!(
                "zoom must be within 0..={}, got {}",
                MAX_ZOOM, self.map.zoom
            )));
        }

        if !self.map.center.is_valid() {
            return Err(MapError::Config(format!(
                "map center ({}, {}) is not a valid position",
                self.map.center.lat, self.map.center.lng
            )));
        }

        if self.map.base_layers.is_empty() {
            return Err(MapError::Config("at least one base layer is required".into()));
        }

        if !self.map.base_layers.contains(&self.map.default_base) {
            return Err(MapError::Config(format!(
                "default base layer {:?} is not among the configured base layers",
                self.map.default_base
            )));
        }

        if self.feed.timeout_secs == 0 {
            return Err(MapError::Config("feed timeout must be at least one second".into()));
        }

        if self.output.refresh_secs == Some(0) {
            return Err(MapError::Config("refresh interval must be at least one second".into()));
        }

        Ok(())
    }
}
