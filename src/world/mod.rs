//! World module - tile maps
//!
//! Maps are grids of tiles grouped into named layers. Loading produces a
//! format-independent `TileMap`; `game::Scene::from_tilemap` turns it into
//! sprites.

mod tilemap;
mod tiled;

pub use tilemap::*;
