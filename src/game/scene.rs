//! Scene registry
//!
//! Named sprite layers in creation order. Drawing walks the layers in that
//! order; collision and physics look layers up by name.

use std::collections::HashMap;
use macroquad::prelude::vec2;
use tracing::debug;
use crate::world::{LayerOptions, TileMap};
use super::entity::{EntityAllocator, EntityId};
use super::layer::Layer;
use super::render::Canvas;
use super::sprite::{Sprite, Visual};

#[derive(Debug, Default)]
pub struct Scene {
    layers: Vec<(String, Layer)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one layer per tile-map layer, placing a sprite on every tile.
    ///
    /// Tile (col, row) with row 0 at the top of the map lands at centre
    /// `((col + 0.5) * w, (rows - 1 - row + 0.5) * h)` with the scaled tile size.
    pub fn from_tilemap(
        map: &TileMap,
        scaling: f32,
        layer_options: &HashMap<String, LayerOptions>,
        entities: &mut EntityAllocator,
    ) -> Self {
        let mut scene = Scene::new();
        let tile_w = map.tile_width as f32 * scaling;
        let tile_h = map.tile_height as f32 * scaling;

        for map_layer in &map.layers {
            let options = layer_options.get(&map_layer.name).copied().unwrap_or_default();
            let mut layer = Layer::new(options.use_spatial_hash);
            for (col, row, tile) in map_layer.tiles() {
                let center = vec2(
                    (col as f32 + 0.5) * tile_w,
                    ((map_layer.height - 1 - row) as f32 + 0.5) * tile_h,
                );
                let sprite = Sprite::new(entities.allocate(), Visual::new(tile.texture.clone()), vec2(tile_w, tile_h))
                    .at(center);
                layer.push(sprite);
            }
            debug!(
                layer = %map_layer.name,
                tiles = map_layer.tile_count(),
                hashed = layer.uses_spatial_hash(),
                "map layer built"
            );
            scene.insert_layer(&map_layer.name, layer);
        }
        scene
    }

    /// Add an empty layer if `name` does not exist yet.
    pub fn add_layer(&mut self, name: &str, use_spatial_hash: bool) -> &mut Layer {
        if let Some(i) = self.position(name) {
            return &mut self.layers[i].1;
        }
        self.insert_layer(name, Layer::new(use_spatial_hash))
    }

    fn insert_layer(&mut self, name: &str, layer: Layer) -> &mut Layer {
        match self.position(name) {
            Some(i) => {
                self.layers[i].1 = layer;
                &mut self.layers[i].1
            }
            None => {
                self.layers.push((name.to_string(), layer));
                let last = self.layers.len() - 1;
                &mut self.layers[last].1
            }
        }
    }

    /// Append a sprite to `name`, creating the layer if needed.
    pub fn add_sprite(&mut self, name: &str, sprite: Sprite) {
        self.add_layer(name, false).push(sprite);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|(n, _)| n == name)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.position(name).map(|i| &self.layers[i].1)
    }

    #[cfg(test)]
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(n, _)| n.as_str())
    }

    /// Remove a sprite from every layer holding it. Returns true if any did.
    pub fn remove_sprite(&mut self, id: EntityId) -> bool {
        let mut removed = false;
        for (_, layer) in &mut self.layers {
            removed |= layer.remove(id).is_some();
        }
        removed
    }

    /// Total sprites across all layers
    pub fn sprite_count(&self) -> usize {
        self.layers.iter().map(|(_, l)| l.len()).sum()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for (_, layer) in &self.layers {
            layer.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::parse_tilemap;

    const MAP: &str = r#"(
        tile_width: 128,
        tile_height: 128,
        tiles: { '=': (texture: "grass.png"), 'X': (texture: "crate.png") },
        layers: [
            (name: "Background", rows: ["X..", "..."]),
            (name: "Platforms", rows: [
                "..X",
                "===",
            ]),
        ],
    )"#;

    fn load() -> (Scene, EntityAllocator) {
        let map = parse_tilemap(MAP.as_bytes()).unwrap();
        let mut options = HashMap::new();
        options.insert("Platforms".to_string(), LayerOptions { use_spatial_hash: true });
        let mut entities = EntityAllocator::new();
        let scene = Scene::from_tilemap(&map, 0.5, &options, &mut entities);
        (scene, entities)
    }

    #[test]
    fn test_from_tilemap_places_tiles_bottom_up() {
        let (scene, _) = load();

        let names: Vec<_> = scene.layer_names().collect();
        assert_eq!(names, vec!["Background", "Platforms"]);

        let platforms = scene.layer("Platforms").unwrap();
        assert!(platforms.uses_spatial_hash());
        assert!(!scene.layer("Background").unwrap().uses_spatial_hash());
        assert_eq!(platforms.len(), 4);

        let positions: Vec<_> = platforms.iter().map(|s| (s.position.x, s.position.y)).collect();
        assert_eq!(positions, vec![(160.0, 96.0), (32.0, 32.0), (96.0, 32.0), (160.0, 32.0)]);
        assert!(platforms.iter().all(|s| s.size == vec2(64.0, 64.0)));
    }

    #[test]
    fn test_add_sprite_creates_layer_after_existing() {
        let (mut scene, mut entities) = load();
        let coin = Sprite::new(entities.allocate(), Visual::new("coin.png"), vec2(64.0, 64.0));
        scene.add_sprite("Coins", coin);

        let names: Vec<_> = scene.layer_names().collect();
        assert_eq!(names, vec!["Background", "Platforms", "Coins"]);
        assert_eq!(scene.layer("Coins").map(Layer::len), Some(1));
    }

    #[test]
    fn test_remove_sprite_from_every_layer() {
        let (mut scene, mut entities) = load();
        let shared = Sprite::new(entities.allocate(), Visual::new("coin.png"), vec2(64.0, 64.0));
        let id = shared.id;
        scene.add_sprite("Coins", shared.clone());
        scene.add_sprite("Sparkles", shared);

        assert!(scene.remove_sprite(id));
        assert!(scene.layer("Coins").unwrap().get(id).is_none());
        assert!(scene.layer("Sparkles").unwrap().get(id).is_none());
        assert!(!scene.remove_sprite(id));
    }
}
