//! Visual encoding of earthquake features.

pub mod encoder;
pub mod palette;

pub use encoder::{FeatureEncoder, VisualEncoding};
pub use palette::{DepthBucket, DepthPalette, DepthRange};
