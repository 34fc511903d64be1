//! Spatial Hash
//!
//! Uniform grid bucketing of hit boxes. A sprite is registered in every cell
//! its box touches; a query returns the ids registered in the cells the
//! query box touches. Candidates still need an exact overlap test.

use std::collections::{HashMap, HashSet};
use macroquad::prelude::Rect;
use super::entity::EntityId;

/// Default cell edge, matching a scaled tile (128 px * 0.5)
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

type Cell = (i32, i32);

#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<Cell, Vec<EntityId>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: if cell_size > 0.0 { cell_size } else { DEFAULT_CELL_SIZE },
            cells: HashMap::new(),
        }
    }

    fn cell_range(&self, rect: &Rect) -> (Cell, Cell) {
        let min = (
            (rect.x / self.cell_size).floor() as i32,
            (rect.y / self.cell_size).floor() as i32,
        );
        let max = (
            ((rect.x + rect.w) / self.cell_size).floor() as i32,
            ((rect.y + rect.h) / self.cell_size).floor() as i32,
        );
        (min, max)
    }

    pub fn insert(&mut self, id: EntityId, rect: &Rect) {
        let (min, max) = self.cell_range(rect);
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                self.cells.entry((cx, cy)).or_default().push(id);
            }
        }
    }

    /// Remove `id` from the cells covered by `rect` (its last inserted box).
    pub fn remove(&mut self, id: EntityId, rect: &Rect) {
        let (min, max) = self.cell_range(rect);
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                if let Some(bucket) = self.cells.get_mut(&(cx, cy)) {
                    bucket.retain(|&e| e != id);
                    if bucket.is_empty() {
                        self.cells.remove(&(cx, cy));
                    }
                }
            }
        }
    }

    /// Candidate ids near `rect`, each reported once.
    pub fn query(&self, rect: &Rect) -> Vec<EntityId> {
        let (min, max) = self.cell_range(rect);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                if let Some(bucket) = self.cells.get(&(cx, cy)) {
                    for &id in bucket {
                        if seen.insert(id) {
                            out.push(id);
                        }
                    }
                }
            }
        }
        out
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EntityAllocator;

    #[test]
    fn test_query_finds_nearby_only() {
        let mut alloc = EntityAllocator::new();
        let near = alloc.allocate();
        let far = alloc.allocate();

        let mut hash = SpatialHash::new(64.0);
        hash.insert(near, &Rect::new(0.0, 0.0, 64.0, 64.0));
        hash.insert(far, &Rect::new(1000.0, 1000.0, 64.0, 64.0));

        let hits = hash.query(&Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(hits, vec![near]);
    }

    #[test]
    fn test_spanning_box_reported_once() {
        let mut alloc = EntityAllocator::new();
        let wide = alloc.allocate();

        let mut hash = SpatialHash::new(64.0);
        hash.insert(wide, &Rect::new(0.0, 0.0, 300.0, 10.0));

        let hits = hash.query(&Rect::new(-10.0, -10.0, 400.0, 40.0));
        assert_eq!(hits, vec![wide]);
    }

    #[test]
    fn test_remove_clears_every_cell() {
        let mut alloc = EntityAllocator::new();
        let id = alloc.allocate();
        let rect = Rect::new(-32.0, -32.0, 128.0, 128.0);

        let mut hash = SpatialHash::default();
        hash.insert(id, &rect);
        hash.remove(id, &rect);

        assert!(hash.query(&rect).is_empty());
        assert!(hash.is_empty());
    }
}
