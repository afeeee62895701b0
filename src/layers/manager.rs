use crate::{
    layers::base::{LayerRole, LayerTrait},
    MapError, Result,
};
use fxhash::FxHashMap as HashMap;

/// Manages layers for the map, handling ordering and base layer exclusivity
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for rendering (sorted by z-index, then insertion)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer, replacing any layer with the same ID.
    ///
    /// A base layer added while another base layer is visible starts hidden.
    pub fn add_layer(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if layer_id.is_empty() {
            return Err(MapError::Layer("layer id must not be empty".into()));
        }

        self.remove_layer(&layer_id);

        if layer.role() == LayerRole::Base && self.active_base().is_some() {
            layer.set_visible(false);
        }

        let z_index = layer.z_index();
        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Gets a layer by ID as its concrete type
    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.get_layer(layer_id)
            .and_then(|layer| layer.as_any().downcast_ref::<T>())
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Layers of one role in render order
    pub fn layers_with_role(&self, role: LayerRole) -> Vec<&dyn LayerTrait> {
        self.layers()
            .into_iter()
            .filter(|layer| layer.role() == role)
            .collect()
    }

    /// The visible base layer
    pub fn active_base(&self) -> Option<&dyn LayerTrait> {
        self.layers()
            .into_iter()
            .find(|layer| layer.role() == LayerRole::Base && layer.is_visible())
    }

    /// Shows `layer_id` and hides every other base layer
    pub fn set_active_base(&mut self, layer_id: &str) -> Result<()> {
        match self.layers.get(layer_id) {
            Some(layer) if layer.role() == LayerRole::Base => {}
            Some(_) => {
                return Err(MapError::Layer(format!("{} is not a base layer", layer_id)));
            }
            None => return Err(MapError::Layer(format!("no layer named {}", layer_id))),
        }

        for (id, layer) in self.layers.iter_mut() {
            if layer.role() == LayerRole::Base {
                layer.set_visible(id == layer_id);
            }
        }
        Ok(())
    }

    /// Shows or hides an overlay
    pub fn set_overlay_visible(&mut self, layer_id: &str, visible: bool) -> Result<()> {
        match self.layers.get_mut(layer_id) {
            Some(layer) if layer.role() == LayerRole::Overlay => {
                layer.set_visible(visible);
                Ok(())
            }
            Some(_) => Err(MapError::Layer(format!("{} is not an overlay", layer_id))),
            None => Err(MapError::Layer(format!("no layer named {}", layer_id))),
        }
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
