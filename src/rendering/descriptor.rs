use crate::{core::geo::LatLng, core::map::Map, rendering::MapRenderer, Result};
use serde::{Deserialize, Serialize};

/// Everything a drawing backend needs for one earthquake marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDescriptor {
    pub position: LatLng,
    pub radius: f64,
    pub color: String,
    pub popup_html: String,
}

/// Emits the earthquake markers as a pretty-printed JSON array
#[derive(Debug, Clone, Default)]
pub struct DescriptorRenderer;

impl DescriptorRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Descriptors in feed order; empty when the map has no overlay yet
    pub fn descriptors(map: &Map) -> Vec<MarkerDescriptor> {
        map.earthquakes()
            .map(|layer| {
                layer
                    .markers()
                    .iter()
                    .map(|marker| MarkerDescriptor {
                        position: marker.position,
                        radius: marker.radius,
                        color: marker.fill_color.clone(),
                        popup_html: marker.popup_html().unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl MapRenderer for DescriptorRenderer {
    fn render(&self, map: &Map) -> Result<String> {
        let descriptors = Self::descriptors(map);
        log::debug!("rendering {} marker descriptors", descriptors.len());
        Ok(serde_json::to_string_pretty(&descriptors)?)
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
