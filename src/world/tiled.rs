//! Tiled JSON maps
//!
//! Supports the subset the tutorial maps use: finite orthogonal maps with
//! tile layers and embedded tilesets. Collection tilesets (one image per
//! tile) resolve to that image's path; atlas tilesets resolve to
//! `image#local_id`. Object and group layers are skipped.

use serde::Deserialize;
use super::tilemap::{limits, MapError, TileLayer, TileMap, TileRef};

/// Tiled stores flip/rotation flags in the top four bits of a gid
const GID_MASK: u32 = 0x0FFF_FFFF;

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: usize,
    height: usize,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    infinite: bool,
    #[serde(default)]
    orientation: Option<String>,
    layers: Vec<TiledLayer>,
    #[serde(default)]
    tilesets: Vec<TiledTileset>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Vec<u32>>,
    #[serde(default)]
    width: Option<usize>,
    #[serde(default)]
    height: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TiledTileset {
    firstgid: u32,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    tiles: Vec<TiledTile>,
}

#[derive(Debug, Deserialize)]
struct TiledTile {
    id: u32,
    #[serde(default)]
    image: Option<String>,
}

impl TiledMap {
    fn resolve(&self, raw_gid: u32, layer: &str) -> Result<Option<TileRef>, MapError> {
        let gid = raw_gid & GID_MASK;
        if gid == 0 {
            return Ok(None);
        }
        let tileset = self.tilesets.iter()
            .filter(|ts| ts.firstgid <= gid)
            .max_by_key(|ts| ts.firstgid)
            .ok_or_else(|| MapError::Validation(format!("gid {} in layer {:?} has no tileset", gid, layer)))?;

        let local = gid - tileset.firstgid;
        if let Some(image) = tileset.tiles.iter().find(|t| t.id == local).and_then(|t| t.image.as_ref()) {
            return Ok(Some(TileRef { texture: image.clone() }));
        }
        match &tileset.image {
            Some(atlas) => Ok(Some(TileRef { texture: format!("{}#{}", atlas, local) })),
            None => Err(MapError::Validation(format!(
                "gid {} in layer {:?} has no image", gid, layer
            ))),
        }
    }

    fn into_tilemap(self) -> Result<TileMap, MapError> {
        if self.infinite {
            return Err(MapError::Validation("infinite Tiled maps are not supported".to_string()));
        }
        if let Some(orientation) = self.orientation.as_deref() {
            if orientation != "orthogonal" {
                return Err(MapError::Validation(format!("unsupported orientation {:?}", orientation)));
            }
        }
        if let Some(ts) = self.tilesets.iter().find(|ts| ts.source.is_some()) {
            return Err(MapError::Validation(format!(
                "external tileset {:?} is not supported, embed it in the map", ts.source
            )));
        }

        let mut layers = Vec::new();
        for layer in &self.layers {
            if layer.kind != "tilelayer" {
                continue;
            }
            let width = layer.width.unwrap_or(self.width);
            let height = layer.height.unwrap_or(self.height);
            if width > limits::MAX_LAYER_DIM || height > limits::MAX_LAYER_DIM {
                return Err(MapError::Validation(format!(
                    "layer {:?} is {}x{}, limit is {}", layer.name, width, height, limits::MAX_LAYER_DIM
                )));
            }
            let data = layer.data.as_deref().unwrap_or(&[]);
            if data.len() != width * height {
                return Err(MapError::Validation(format!(
                    "layer {:?} has {} gids, expected {}x{}", layer.name, data.len(), width, height
                )));
            }
            let cells = data.iter()
                .map(|&gid| self.resolve(gid, &layer.name))
                .collect::<Result<Vec<_>, _>>()?;
            layers.push(TileLayer::new(layer.name.clone(), width, height, cells)?);
        }

        Ok(TileMap {
            tile_width: self.tilewidth,
            tile_height: self.tileheight,
            layers,
        })
    }
}

/// Parse Tiled JSON text into a [`TileMap`].
pub fn parse_tiled(text: &str) -> Result<TileMap, MapError> {
    let map: TiledMap = serde_json::from_str(text)?;
    map.into_tilemap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::parse_tilemap;

    const TILED: &str = r#"{
        "width": 3, "height": 2, "tilewidth": 128, "tileheight": 128,
        "orientation": "orthogonal", "infinite": false,
        "layers": [
            { "name": "Platforms", "type": "tilelayer", "width": 3, "height": 2,
              "data": [0, 0, 2147483650, 1, 1, 1] },
            { "name": "Spawns", "type": "objectgroup", "objects": [] }
        ],
        "tilesets": [
            { "firstgid": 1, "tiles": [
                { "id": 0, "image": "tiles/grassMid.png" },
                { "id": 1, "image": "tiles/boxCrate_double.png" }
            ] },
            { "firstgid": 10, "image": "tiles/atlas.png" }
        ]
    }"#;

    #[test]
    fn test_parse_collection_tileset() {
        let map = parse_tilemap(TILED.as_bytes()).unwrap();
        assert_eq!(map.layers.len(), 1);

        let layer = map.layer("Platforms").unwrap();
        assert_eq!(layer.get(0, 0), None);
        // Flip flag stripped from gid 2
        assert_eq!(layer.get(2, 0).map(|t| t.texture.as_str()), Some("tiles/boxCrate_double.png"));
        assert_eq!(layer.get(1, 1).map(|t| t.texture.as_str()), Some("tiles/grassMid.png"));
    }

    #[test]
    fn test_atlas_tiles_get_indexed_keys() {
        let text = TILED.replace("[0, 0, 2147483650, 1, 1, 1]", "[12, 0, 0, 0, 0, 0]");
        let map = parse_tilemap(text.as_bytes()).unwrap();
        let layer = map.layer("Platforms").unwrap();
        assert_eq!(layer.get(0, 0).map(|t| t.texture.as_str()), Some("tiles/atlas.png#2"));
    }

    #[test]
    fn test_wrong_data_length_rejected() {
        let text = TILED.replace("[0, 0, 2147483650, 1, 1, 1]", "[1, 1]");
        assert!(matches!(parse_tilemap(text.as_bytes()), Err(MapError::Validation(_))));
    }

    #[test]
    fn test_huge_layer_dimensions_rejected() {
        let text = r#"{"width": 1, "height": 1, "tilewidth": 16, "tileheight": 16, "tilesets": [],
            "layers": [{"name": "Big", "type": "tilelayer",
                "width": 4294967296, "height": 4294967296, "data": []}]}"#;
        assert!(matches!(parse_tiled(text), Err(MapError::Validation(_))));

        let text = text.replace("4294967296", "1025");
        assert!(matches!(parse_tiled(&text), Err(MapError::Validation(_))));
    }

    #[test]
    fn test_external_tileset_rejected() {
        let text = r#"{"width": 1, "height": 1, "tilewidth": 16, "tileheight": 16,
            "layers": [], "tilesets": [{"firstgid": 1, "source": "tiles.tsx"}]}"#;
        assert!(matches!(parse_tilemap(text.as_bytes()), Err(MapError::Validation(_))));
    }
}
