//! Tile map loading
//!
//! The native format is RON: a legend mapping single characters to tile
//! textures plus one block of ASCII rows per layer (row 0 is the top of the
//! map, `.` and space are empty). Tiled JSON maps are accepted as well.
//! - Reading: auto-detects plain text (RON or JSON) vs brotli-compressed
//! - Writing: not supported, maps are authored by hand or in Tiled

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::Cursor;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Validation limits to keep a bad map from exhausting memory
pub mod limits {
    /// Maximum width or height of a layer, in tiles
    pub const MAX_LAYER_DIM: usize = 1024;
    /// Maximum number of layers in a map
    pub const MAX_LAYERS: usize = 64;
    /// Maximum tile edge in pixels
    pub const MAX_TILE_SIZE: u32 = 4096;
}

/// Characters that mean "no tile" in the ASCII rows
const EMPTY_SYMBOLS: [char; 2] = ['.', ' '];

/// Error type for map loading
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Tiled JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("brotli decompression failed: {0}")]
    Decompress(std::io::Error),
    #[error("unknown tile '{symbol}' in layer {layer:?} at row {row}, column {col}")]
    UnknownTile {
        layer: String,
        symbol: char,
        row: usize,
        col: usize,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Per-layer load options, keyed by layer name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LayerOptions {
    #[serde(default)]
    pub use_spatial_hash: bool,
}

/// One placed tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRef {
    /// Texture key (asset path, or `atlas#index` for Tiled atlases)
    pub texture: String,
}

/// A rectangular grid of optional tiles, row-major with row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub width: usize,
    pub height: usize,
    cells: Vec<Option<TileRef>>,
}

impl TileLayer {
    pub fn new(name: impl Into<String>, width: usize, height: usize, cells: Vec<Option<TileRef>>) -> Result<Self, MapError> {
        let name = name.into();
        if width > limits::MAX_LAYER_DIM || height > limits::MAX_LAYER_DIM {
            return Err(MapError::Validation(format!(
                "layer {:?} is {}x{}, limit is {}", name, width, height, limits::MAX_LAYER_DIM
            )));
        }
        if cells.len() != width * height {
            return Err(MapError::Validation(format!(
                "layer {:?} has {} cells, expected {}x{}", name, cells.len(), width, height
            )));
        }
        Ok(Self { name, width, height, cells })
    }

    #[cfg(test)]
    pub fn get(&self, col: usize, row: usize) -> Option<&TileRef> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col].as_ref()
    }

    /// Occupied cells as (col, row, tile), row by row from the top
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, &TileRef)> {
        let width = self.width.max(1);
        self.cells.iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|t| (i % width, i / width, t)))
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// A loaded map, independent of the file format it came from
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    pub tile_width: u32,
    pub tile_height: u32,
    pub layers: Vec<TileLayer>,
}

impl TileMap {
    #[cfg(test)]
    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Every texture key the map references
    pub fn textures(&self) -> BTreeSet<String> {
        self.layers.iter()
            .flat_map(|l| l.tiles().map(|(_, _, t)| t.texture.clone()))
            .collect()
    }

    fn validate(&self) -> Result<(), MapError> {
        for (what, size) in [("tile_width", self.tile_width), ("tile_height", self.tile_height)] {
            if size == 0 || size > limits::MAX_TILE_SIZE {
                return Err(MapError::Validation(format!(
                    "{} must be 1..={}, got {}", what, limits::MAX_TILE_SIZE, size
                )));
            }
        }
        if self.layers.len() > limits::MAX_LAYERS {
            return Err(MapError::Validation(format!(
                "too many layers ({} > {})", self.layers.len(), limits::MAX_LAYERS
            )));
        }
        let mut names = HashSet::new();
        for layer in &self.layers {
            if !names.insert(layer.name.as_str()) {
                return Err(MapError::Validation(format!("duplicate layer name {:?}", layer.name)));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Native RON format
// =============================================================================

#[derive(Debug, Deserialize)]
struct MapFile {
    tile_width: u32,
    tile_height: u32,
    tiles: BTreeMap<char, TileDef>,
    layers: Vec<LayerFile>,
}

#[derive(Debug, Deserialize)]
struct TileDef {
    texture: String,
}

#[derive(Debug, Deserialize)]
struct LayerFile {
    name: String,
    rows: Vec<String>,
}

impl MapFile {
    fn into_tilemap(self) -> Result<TileMap, MapError> {
        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in self.layers {
            let height = layer.rows.len();
            // Short rows are padded with empty cells
            let width = layer.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
            if width > limits::MAX_LAYER_DIM || height > limits::MAX_LAYER_DIM {
                return Err(MapError::Validation(format!(
                    "layer {:?} is {}x{}, limit is {}", layer.name, width, height, limits::MAX_LAYER_DIM
                )));
            }

            let mut cells = vec![None; width * height];
            for (row, line) in layer.rows.iter().enumerate() {
                for (col, symbol) in line.chars().enumerate() {
                    if EMPTY_SYMBOLS.contains(&symbol) {
                        continue;
                    }
                    let def = self.tiles.get(&symbol).ok_or_else(|| MapError::UnknownTile {
                        layer: layer.name.clone(),
                        symbol,
                        row,
                        col,
                    })?;
                    cells[row * width + col] = Some(TileRef { texture: def.texture.clone() });
                }
            }
            layers.push(TileLayer::new(layer.name, width, height, cells)?);
        }

        let map = TileMap {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            layers,
        };
        map.validate()?;
        Ok(map)
    }
}

fn parse_ron_map(text: &str) -> Result<TileMap, MapError> {
    let file: MapFile = match ron::from_str(text) {
        Ok(f) => f,
        Err(e) => {
            let line = text.lines().nth(e.position.line.saturating_sub(1)).unwrap_or("");
            warn!(line = e.position.line, col = e.position.col, context = line.trim(), "map parse failed");
            return Err(e.into());
        }
    };
    file.into_tilemap()
}

// =============================================================================
// Entry points
// =============================================================================

/// Parse a map from text. A leading `{` means Tiled JSON, anything else RON.
pub fn parse_tilemap_str(text: &str) -> Result<TileMap, MapError> {
    let map = if text.trim_start().starts_with('{') {
        super::tiled::parse_tiled(text)?
    } else {
        parse_ron_map(text)?
    };
    map.validate()?;
    Ok(map)
}

/// Parse a map from raw file bytes (plain or brotli-compressed).
pub fn parse_tilemap(bytes: &[u8]) -> Result<TileMap, MapError> {
    let Some(&first) = bytes.first() else {
        return Err(MapError::Validation("map file is empty".to_string()));
    };

    // Text maps start with '(' (RON), '{' (JSON) or whitespace; brotli is binary
    let is_plain_text = matches!(first, b'(' | b'{' | b' ' | b'\n' | b'\r' | b'\t' | b'/');

    let text = if is_plain_text {
        String::from_utf8(bytes.to_vec())?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
            .map_err(MapError::Decompress)?;
        String::from_utf8(decompressed)?
    };
    parse_tilemap_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"(
        tile_width: 128,
        tile_height: 128,
        tiles: {
            '=': (texture: "grass.png"),
            'X': (texture: "crate.png"),
        },
        layers: [
            (name: "Platforms", rows: [
                "X.",
                "==",
                "=",
            ]),
        ],
    )"#;

    #[test]
    fn test_parse_ron_map() {
        let map = parse_tilemap(SMALL.as_bytes()).unwrap();
        assert_eq!((map.tile_width, map.tile_height), (128, 128));

        let layer = map.layer("Platforms").unwrap();
        assert_eq!((layer.width, layer.height), (2, 3));
        assert_eq!(layer.tile_count(), 4);
        assert_eq!(layer.get(0, 0).map(|t| t.texture.as_str()), Some("crate.png"));
        assert_eq!(layer.get(1, 0), None);
        assert_eq!(layer.get(1, 2), None);

        let textures: Vec<_> = map.textures().into_iter().collect();
        assert_eq!(textures, vec!["crate.png", "grass.png"]);
    }

    #[test]
    fn test_unknown_symbol_is_reported_with_location() {
        let text = r#"(tile_width: 64, tile_height: 64, tiles: {}, layers: [(name: "A", rows: ["..", ".?"])])"#;
        match parse_tilemap(text.as_bytes()) {
            Err(MapError::UnknownTile { layer, symbol, row, col }) => {
                assert_eq!((layer.as_str(), symbol, row, col), ("A", '?', 1, 1));
            }
            other => panic!("expected UnknownTile, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_duplicate_layers_and_zero_tiles() {
        let dup = r#"(tile_width: 64, tile_height: 64, tiles: {}, layers: [(name: "A", rows: []), (name: "A", rows: [])])"#;
        assert!(matches!(parse_tilemap(dup.as_bytes()), Err(MapError::Validation(_))));

        let zero = r#"(tile_width: 0, tile_height: 64, tiles: {}, layers: [])"#;
        assert!(matches!(parse_tilemap(zero.as_bytes()), Err(MapError::Validation(_))));
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(matches!(parse_tilemap(b""), Err(MapError::Validation(_))));
        assert!(parse_tilemap(b"(tile_width: ").is_err());
        assert!(parse_tilemap(&[0xff, 0x00, 0x13, 0x37]).is_err());
    }

    #[test]
    fn test_brotli_compressed_map() {
        let mut compressed = Vec::new();
        brotli::BrotliCompress(
            &mut Cursor::new(SMALL.as_bytes()),
            &mut compressed,
            &brotli::enc::BrotliEncoderParams::default(),
        ).unwrap();

        let map = parse_tilemap(&compressed).unwrap();
        assert_eq!(map, parse_tilemap(SMALL.as_bytes()).unwrap());
    }

    #[test]
    fn test_shipped_level_parses() {
        let bytes = include_bytes!("../../assets/maps/level_1.ron");
        let map = parse_tilemap(bytes).unwrap();
        let platforms = map.layer("Platforms").unwrap();
        assert!(platforms.tile_count() > 0);
        // The bottom row is solid ground from edge to edge
        let bottom = platforms.height - 1;
        assert!((0..platforms.width).all(|col| platforms.get(col, bottom).is_some()));
    }
}
