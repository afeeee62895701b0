//! Turning an assembled [`Map`] into something a viewer can display.

pub mod descriptor;
pub mod leaflet;

pub use descriptor::{DescriptorRenderer, MarkerDescriptor};
pub use leaflet::LeafletRenderer;

use crate::{core::config::OutputFormat, core::map::Map, Result};

/// Draws a map. Implementations only read the map; fetching and encoding
/// have already happened.
pub trait MapRenderer: Send + Sync {
    fn render(&self, map: &Map) -> Result<String>;

    /// Extension for files holding this renderer's output
    fn file_extension(&self) -> &'static str;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn MapRenderer> {
    match format {
        OutputFormat::Html => Box::new(LeafletRenderer::new()),
        OutputFormat::Json => Box::new(DescriptorRenderer::new()),
    }
}
