use serde::{Deserialize, Serialize};

/// Map corner a control is anchored to, named as Leaflet names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

/// Switcher between base layers and toggles for overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerControl {
    /// Names of mutually exclusive base layers
    pub base_layers: Vec<String>,
    /// Names of independently toggled overlays
    pub overlays: Vec<String>,
    pub collapsed: bool,
    pub position: ControlPosition,
}

impl LayerControl {
    pub fn new() -> Self {
        Self {
            base_layers: Vec::new(),
            overlays: Vec::new(),
            collapsed: false,
            position: ControlPosition::TopRight,
        }
    }

    pub fn add_base_layer(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.base_layers.contains(&name) {
            self.base_layers.push(name);
        }
    }

    pub fn add_overlay(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.overlays.contains(&name) {
            self.overlays.push(name);
        }
    }
}

impl Default for LayerControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_entries() {
        let mut control = LayerControl::new();
        control.add_base_layer("Street");
        control.add_base_layer("Street");
        control.add_overlay("Earthquakes");
        control.add_overlay("Earthquakes");

        assert_eq!(control.base_layers, vec!["Street"]);
        assert_eq!(control.overlays, vec!["Earthquakes"]);
        assert!(!control.collapsed);
    }

    #[test]
    fn test_position_names() {
        assert_eq!(ControlPosition::BottomRight.as_str(), "bottomright");
        assert_eq!(
            serde_json::to_string(&ControlPosition::TopLeft).unwrap(),
            "\"topleft\""
        );
    }
}
