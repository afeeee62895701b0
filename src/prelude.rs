//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{
        EncoderConfig, FeedConfig, MapConfig, MarkerScale, OutputConfig, OutputFormat,
        QuakeMapConfig, RadiusUnits,
    },
    geo::{LatLng, LatLngBounds},
    map::{init_map, render_pass, Map},
};

pub use crate::data::{
    feature::{EarthquakeFeature, FeatureError},
    feed::{
        parse_feed, FeedBatch, FeedMagnitude, FeedPeriod, FeedSource, FileFeedSource,
        HttpFeedSource, StaticFeedSource, UsgsFeed,
    },
};

pub use crate::layers::{
    base::{LayerRole, LayerTrait},
    manager::LayerManager,
    marker::CircleMarker,
    overlay::EarthquakeLayer,
    tile::{BaseLayerKind, TileLayer},
};

pub use crate::style::{
    encoder::{FeatureEncoder, VisualEncoding},
    palette::DepthPalette,
};

pub use crate::ui::{controls::LayerControl, legend::Legend, popup::Popup};

pub use crate::rendering::{
    renderer_for, DescriptorRenderer, LeafletRenderer, MapRenderer, MarkerDescriptor,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::RefreshLoop;

pub use crate::{MapError, Result};
