//! Feed ingestion: GeoJSON wire types, validated features and feed sources.

pub mod feature;
pub mod feed;
pub mod geojson;

pub use feature::{EarthquakeFeature, FeatureError};
pub use feed::{
    parse_feed, FeedBatch, FeedMagnitude, FeedPeriod, FeedSource, FileFeedSource, HttpFeedSource,
    SkippedFeature, StaticFeedSource, UsgsFeed,
};
pub use geojson::{
    raw_feature_id, FeedMetadata, GeoJsonFeature, GeoJsonFeatureCollection, GeoJsonGeometry,
};
