//! Standalone Leaflet page.
//!
//! The map is serialized once into a JSON island inside the page and a
//! fixed script turns it into Leaflet layers, so nothing from the feed is
//! ever spliced into JavaScript source.

use crate::{
    constants::LEAFLET_VERSION,
    core::{
        geo::{LatLng, LatLngBounds},
        map::Map,
    },
    layers::{base::LayerTrait, marker::CircleMarker, tile::TileLayerOptions},
    rendering::MapRenderer,
    ui::{controls::LayerControl, legend::Legend, popup::escape_html},
    Result,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseLayerModel<'a> {
    name: &'a str,
    active: bool,
    #[serde(flatten)]
    options: &'a TileLayerOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayModel<'a> {
    name: &'a str,
    visible: bool,
    markers: &'a [CircleMarker],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageModel<'a> {
    center: LatLng,
    zoom: f64,
    base_layers: Vec<BaseLayerModel<'a>>,
    earthquakes: Option<OverlayModel<'a>>,
    control: &'a LayerControl,
    legend: &'a Legend,
    fit_bounds: Option<LatLngBounds>,
}

impl<'a> PageModel<'a> {
    fn from_map(map: &'a Map) -> Self {
        let active_id = map.active_base().map(|layer| layer.id().to_string());
        let base_layers = map
            .base_layers()
            .into_iter()
            .map(|layer| BaseLayerModel {
                name: layer.name(),
                active: active_id.as_deref() == Some(layer.id()),
                options: layer.tile_options(),
            })
            .collect();

        let earthquakes = map.earthquakes().map(|layer| OverlayModel {
            name: layer.name(),
            visible: layer.is_visible(),
            markers: layer.markers(),
        });

        Self {
            center: map.center(),
            zoom: map.zoom(),
            base_layers,
            earthquakes,
            control: map.control(),
            legend: map.legend(),
            fit_bounds: map.fit_bounds(),
        }
    }
}

const PAGE_STYLE: &str = r#"    <style>
      html, body { height: 100%; margin: 0; }
      #map { width: 100%; height: 100%; }
      .legend { background: white; padding: 6px 10px; line-height: 20px; border-radius: 4px; box-shadow: 0 0 15px rgba(0, 0, 0, 0.2); }
      .legend h4 { margin: 0 0 4px; }
      .legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.8; }
    </style>
"#;

const PAGE_SCRIPT: &str = r#"    <script>
      (function () {
        var model = JSON.parse(document.getElementById("quakemap-data").textContent);
        var map = L.map("map", { center: [model.center.lat, model.center.lng], zoom: model.zoom });

        var baseMaps = {};
        model.baseLayers.forEach(function (base) {
          var layer = L.tileLayer(base.urlTemplate, {
            subdomains: base.subdomains,
            attribution: base.attribution,
            maxZoom: base.maxZoom,
            minZoom: base.minZoom
          });
          baseMaps[base.name] = layer;
          if (base.active) { layer.addTo(map); }
        });

        var overlays = {};
        if (model.earthquakes) {
          var quakes = L.layerGroup(model.earthquakes.markers.map(function (m) {
            var latlng = [m.position.lat, m.position.lng];
            var style = {
              radius: m.radius,
              fillColor: m.fillColor,
              fillOpacity: m.fillOpacity,
              color: m.strokeColor,
              weight: m.weight
            };
            var marker = m.units === "meters" ? L.circle(latlng, style) : L.circleMarker(latlng, style);
            if (m.popup) { marker.bindPopup(m.popup.content, { maxWidth: m.popup.maxWidth }); }
            return marker;
          }));
          overlays[model.earthquakes.name] = quakes;
          if (model.earthquakes.visible) { quakes.addTo(map); }
        }

        L.control.layers(baseMaps, overlays, {
          collapsed: model.control.collapsed,
          position: model.control.position
        }).addTo(map);

        var legend = L.control({ position: model.legend.position });
        legend.onAdd = function () {
          var div = L.DomUtil.create("div", "info legend");
          var title = L.DomUtil.create("h4", "", div);
          title.textContent = model.legend.title;
          model.legend.entries.forEach(function (entry) {
            var row = L.DomUtil.create("div", "", div);
            var swatch = L.DomUtil.create("i", "", row);
            swatch.style.background = entry.color;
            row.appendChild(document.createTextNode(entry.label));
          });
          return div;
        };
        legend.addTo(map);

        if (model.fitBounds) {
          var sw = model.fitBounds.south_west, ne = model.fitBounds.north_east;
          map.fitBounds([[sw.lat, sw.lng], [ne.lat, ne.lng]]);
        }
      })();
    </script>
"#;

/// Renders a self-contained HTML page driven by Leaflet from unpkg
#[derive(Debug, Clone)]
pub struct LeafletRenderer {
    leaflet_version: String,
}

impl LeafletRenderer {
    pub fn new() -> Self {
        Self {
            leaflet_version: LEAFLET_VERSION.to_string(),
        }
    }

    pub fn with_leaflet_version(mut self, version: impl Into<String>) -> Self {
        self.leaflet_version = version.into();
        self
    }

    /// Map description as JSON that is safe inside a `<script>` element
    pub fn page_data(map: &Map) -> Result<String> {
        let json = serde_json::to_string(&PageModel::from_map(map))?;
        Ok(escape_script_json(&json))
    }
}

impl Default for LeafletRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `<` never appears raw, so `</script>` or `<!--` in feed text cannot end
/// the data island. The JSON value is unchanged.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

impl MapRenderer for LeafletRenderer {
    fn render(&self, map: &Map) -> Result<String> {
        let data = Self::page_data(map)?;
        let base = format!("https://unpkg.com/leaflet@{}/dist", self.leaflet_version);

        let mut page = String::with_capacity(data.len() + PAGE_SCRIPT.len() + 1024);
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n");
        page.push_str("    <meta charset=\"utf-8\">\n");
        page.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        page.push_str(&format!("    <title>{}</title>\n", escape_html(map.title())));
        page.push_str(&format!(
            "    <link rel=\"stylesheet\" href=\"{}/leaflet.css\">\n",
            base
        ));
        page.push_str(&format!("    <script src=\"{}/leaflet.js\"></script>\n", base));
        page.push_str(PAGE_STYLE);
        page.push_str("  </head>\n  <body>\n    <div id=\"map\"></div>\n");
        page.push_str(
            "    <script type=\"application/json\" id=\"quakemap-data\">",
        );
        page.push_str(&data);
        page.push_str("</script>\n");
        page.push_str(PAGE_SCRIPT);
        page.push_str("  </body>\n</html>\n");

        log::debug!(
            "rendered leaflet page with {} markers ({} bytes)",
            map.earthquakes().map(|layer| layer.len()).unwrap_or(0),
            page.len()
        );
        Ok(page)
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}
