pub mod base;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod overlay;
pub mod tile;

pub use base::{LayerProperties, LayerRole, LayerTrait, LayerType};
pub use manager::LayerManager;
pub use marker::CircleMarker;
pub use overlay::{EarthquakeLayer, EARTHQUAKE_LAYER_ID};
pub use tile::{BaseLayerKind, TileLayer, TileLayerOptions};
