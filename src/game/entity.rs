//! Entity identifiers with generational indices
//!
//! Every sprite placed in a session gets an `EntityId`. Ids are what the
//! scene registry, the spatial hash and the pickup resolver pass around, so
//! a collected coin can be referred to after its sprite has been dropped.
//!
//! The generation counter means a stale id never matches a sprite that later
//! reuses the same slot.

/// Identifier of a sprite within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Hands out ids and tracks which ones are still alive.
///
/// Freed slots are reused LIFO with a bumped generation.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    alive: Vec<bool>,
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id.
    pub fn allocate(&mut self) -> EntityId {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            EntityId::new(index, self.generations[slot])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            EntityId::new(index, 0)
        }
    }

    /// Release an id. Returns false if it was already dead.
    pub fn free(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = id.index as usize;
        self.generations[slot] += 1;
        self.alive[slot] = false;
        self.free_indices.push(id.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        let slot = id.index as usize;
        slot < self.generations.len() && self.alive[slot] && self.generations[slot] == id.generation
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::new();

        let a = alloc.allocate();
        let b = alloc.allocate();
        assert_ne!(a, b);
        assert_eq!(alloc.alive_count(), 2);

        assert!(alloc.free(a));
        assert!(!alloc.is_alive(a));
        assert!(alloc.is_alive(b));
        assert_eq!(alloc.alive_count(), 1);
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        assert!(alloc.free(a));
        assert!(!alloc.free(a));
        assert_eq!(alloc.alive_count(), 0);
    }

    #[test]
    fn test_reused_slot_gets_new_generation() {
        let mut alloc = EntityAllocator::new();

        let old = alloc.allocate();
        alloc.free(old);
        let new = alloc.allocate();

        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(!alloc.is_alive(old));
        assert!(alloc.is_alive(new));
    }
}
