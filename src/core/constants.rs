//! Core constants derived from the public USGS feed and Leaflet defaults.
//! Keeping them in a single place makes it easier to tweak map-wide magic numbers.

/// Base of the USGS real-time summary feeds.
pub const USGS_FEED_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Feed fetched when nothing else is configured: every event of the past week.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// User-Agent sent with feed requests.
pub const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// Feed request timeout in seconds.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Initial map center (latitude, longitude).
pub const DEFAULT_CENTER: (f64, f64) = (52.245, -104.847);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Highest zoom level any bundled tile source serves.
pub const MAX_ZOOM: u8 = 19;

/// Pixel radius per unit of magnitude for fixed-size circle markers.
pub const PIXEL_RADIUS_SCALE: f64 = 4.0;

/// Smaller pixel scale for dense feeds.
pub const COMPACT_RADIUS_SCALE: f64 = 3.0;

/// Meters per unit of magnitude for geographically scaled circles.
pub const METER_RADIUS_SCALE: f64 = 15_000.0;

/// Marker outline color and weight.
pub const MARKER_STROKE_COLOR: &str = "black";
pub const MARKER_STROKE_WEIGHT: f64 = 1.0;

/// Marker fill opacity.
pub const MARKER_FILL_OPACITY: f64 = 0.8;

/// Label shown when a feature carries no place name.
pub const UNKNOWN_PLACE: &str = "Unknown location";

/// Name of the earthquake overlay in the layer control.
pub const EARTHQUAKE_LAYER_NAME: &str = "Earthquakes";

/// Leaflet release loaded by the generated page.
pub const LEAFLET_VERSION: &str = "1.9.4";
