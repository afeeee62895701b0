//! Depth legend, derived from the same palette the markers use so the two
//! can never disagree.

use crate::{style::palette::DepthPalette, ui::controls::ControlPosition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub position: ControlPosition,
    /// Shallowest first
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// One swatch per bucket. `floor` labels the open lower end of the
    /// catch-all bucket, which has no threshold of its own.
    pub fn from_palette(palette: &DepthPalette, floor: f64) -> Self {
        let entries = palette
            .ranges()
            .into_iter()
            .map(|range| {
                let lower = range.lower.unwrap_or(floor);
                let label = match range.upper {
                    Some(upper) => format!("{}\u{2013}{}", lower, upper),
                    None => format!("{}+", lower),
                };
                LegendEntry {
                    label,
                    color: range.color.to_string(),
                }
            })
            .collect();

        Self {
            title: "Depth (km)".to_string(),
            position: ControlPosition::BottomRight,
            entries,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }
}
