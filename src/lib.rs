//! # quakemap
//!
//! Fetches a GeoJSON earthquake feed and turns it into an interactive web
//! map description: one circle marker per event sized by magnitude and
//! colored by depth, a depth legend, and switchable base layers.
//!
//! The pieces follow the path of the data:
//! - [`data`] fetches the feed and validates each feature,
//! - [`style`] encodes every feature into radius, color and popup text,
//! - [`layers`] and [`ui`] describe tiles, markers, legend and controls,
//! - [`core`] assembles them into a [`Map`],
//! - [`rendering`] hands the map to a concrete renderer (Leaflet HTML, JSON),
//! - `runtime` (feature `tokio-runtime`) repeats the render pass on a timer.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod rendering;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod style;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::MapBuilder,
    config::QuakeMapConfig,
    geo::{LatLng, LatLngBounds},
    map::{init_map, render_pass, Map},
};

pub use data::{
    feature::{EarthquakeFeature, FeatureError},
    feed::{FeedBatch, FeedSource, FileFeedSource, HttpFeedSource},
};

pub use layers::{marker::CircleMarker, overlay::EarthquakeLayer, tile::TileLayer};

pub use style::{
    encoder::{FeatureEncoder, VisualEncoding},
    palette::DepthPalette,
};

pub use rendering::{
    descriptor::DescriptorRenderer, leaflet::LeafletRenderer, renderer_for, MapRenderer,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
