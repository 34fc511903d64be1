//! Sprite layers
//!
//! A layer is an ordered list of sprites. Insertion order is draw order.
//! Layers holding static geometry can opt into a spatial hash so collision
//! queries only look at nearby sprites.

use std::collections::HashMap;
use macroquad::prelude::Rect;
use super::collision::overlaps;
use super::entity::EntityId;
use super::render::Canvas;
use super::spatial_hash::SpatialHash;
use super::sprite::Sprite;

#[derive(Debug, Clone)]
pub struct Layer {
    sprites: Vec<Sprite>,
    /// id -> position in `sprites`
    slots: HashMap<EntityId, usize>,
    spatial: Option<SpatialHash>,
    /// Opacity applied to every sprite when drawing (0.0-1.0)
    pub alpha: f32,
}

impl Layer {
    pub fn new(use_spatial_hash: bool) -> Self {
        Self {
            sprites: Vec::new(),
            slots: HashMap::new(),
            spatial: use_spatial_hash.then(SpatialHash::default),
            alpha: 1.0,
        }
    }

    pub fn uses_spatial_hash(&self) -> bool {
        self.spatial.is_some()
    }

    /// Append a sprite. A sprite whose id is already present replaces the old one.
    pub fn push(&mut self, sprite: Sprite) {
        if self.slots.contains_key(&sprite.id) {
            self.remove(sprite.id);
        }
        if let Some(hash) = &mut self.spatial {
            hash.insert(sprite.id, &sprite.hit_box());
        }
        self.slots.insert(sprite.id, self.sprites.len());
        self.sprites.push(sprite);
    }

    /// Remove a sprite, preserving the order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Sprite> {
        let slot = self.slots.remove(&id)?;
        let sprite = self.sprites.remove(slot);
        if let Some(hash) = &mut self.spatial {
            hash.remove(id, &sprite.hit_box());
        }
        for (i, s) in self.sprites.iter().enumerate().skip(slot) {
            self.slots.insert(s.id, i);
        }
        Some(sprite)
    }

    pub fn get(&self, id: EntityId) -> Option<&Sprite> {
        self.slots.get(&id).map(|&slot| &self.sprites[slot])
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Ids of sprites whose hit box overlaps `rect`, in layer order.
    pub fn overlapping(&self, rect: &Rect) -> Vec<EntityId> {
        match &self.spatial {
            Some(hash) => {
                let mut hits: Vec<(usize, EntityId)> = hash.query(rect)
                    .into_iter()
                    .filter_map(|id| {
                        let slot = *self.slots.get(&id)?;
                        overlaps(&self.sprites[slot].hit_box(), rect).then_some((slot, id))
                    })
                    .collect();
                hits.sort_by_key(|&(slot, _)| slot);
                hits.into_iter().map(|(_, id)| id).collect()
            }
            None => self.sprites.iter()
                .filter(|s| overlaps(&s.hit_box(), rect))
                .map(|s| s.id)
                .collect(),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for sprite in &self.sprites {
            canvas.draw_sprite(sprite, self.alpha);
        }
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new(false)
    }
}
