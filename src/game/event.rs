//! Event queues
//!
//! Game logic never talks to the audio device directly. It queues cues
//! during key handling and update; the host loop drains the queue once per
//! frame and plays them. Nothing waits on playback.

use super::entity::EntityId;

/// A queue for events of a single type, drained at a fixed point in the frame.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Take all events, leaving the queue empty
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Coin,
}

/// A collectible was picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupEvent {
    pub item: EntityId,
    pub reward: u32,
}

/// All queues for one session
#[derive(Debug, Default)]
pub struct Events {
    pub sounds: EventQueue<SoundCue>,
    pub pickups: EventQueue<PickupEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<SoundCue> = EventQueue::new();
        queue.send(SoundCue::Jump);
        queue.send(SoundCue::Coin);
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![SoundCue::Jump, SoundCue::Coin]);
        assert!(queue.is_empty());
    }

}
