//! Coin pickup
//!
//! Each frame the player's hit box is tested against the coin layer. A hit
//! coin is removed from every layer, its id is released, a pickup cue is
//! queued and the reward is added. Removal happens before scoring, and only
//! a coin that was actually removed scores, so a coin can never pay twice.

use std::collections::HashSet;
use tracing::debug;
use crate::game::{check_for_collision_with_layer, PickupEvent, SoundCue};
use super::session::Session;

impl Session {
    /// Collect every coin the player overlaps. Returns how many were taken.
    pub fn resolve_pickups(&mut self) -> usize {
        let Some(coins) = self.scene.layer(&self.coin_layer) else {
            return 0;
        };
        let hits = check_for_collision_with_layer(&self.player, coins);

        let mut handled = HashSet::new();
        let mut collected = 0;
        for id in hits {
            if !handled.insert(id) || !self.scene.remove_sprite(id) {
                continue;
            }
            self.entities.free(id);
            self.events.sounds.send(SoundCue::Coin);
            self.events.pickups.send(PickupEvent { item: id, reward: self.coin_reward });
            self.score.add(self.coin_reward);
            collected += 1;
            debug!(item = ?id, score = self.score.value(), left = self.coins_left(), "coin collected");
        }

        if collected > 0 {
            self.score_text.set_text(self.score.to_string());
        }
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::world::TileMap;
    use macroquad::prelude::vec2;

    fn empty_session(coins: Vec<(f32, f32)>) -> Session {
        let config = GameConfig { coin_positions: coins, ..GameConfig::default() };
        let map = TileMap { tile_width: 128, tile_height: 128, layers: Vec::new() };
        Session::new(&config, &map)
    }

    #[test]
    fn test_overlapping_coins_all_collected_once() {
        let mut session = empty_session(vec![(100.0, 100.0), (120.0, 100.0), (900.0, 100.0)]);
        session.player.position = vec2(110.0, 100.0);

        assert_eq!(session.resolve_pickups(), 2);
        assert_eq!(session.score.value(), 150);
        assert_eq!(session.coins_left(), 1);
        assert_eq!(session.score_text.text, "Score: 150");
        assert_eq!(session.events.sounds.len(), 2);
        assert_eq!(session.events.pickups.len(), 2);

        // Still standing in the same spot: nothing left to take
        assert_eq!(session.resolve_pickups(), 0);
        assert_eq!(session.score.value(), 150);
    }

    #[test]
    fn test_collected_ids_are_dead() {
        let mut session = empty_session(vec![(64.0, 128.0)]);
        session.resolve_pickups();

        let event = session.events.pickups.drain().next().unwrap();
        assert!(!session.entities.is_alive(event.item));
        assert!(!session.scene.remove_sprite(event.item));
    }

    #[test]
    fn test_no_hits_leaves_text_untouched() {
        let mut session = empty_session(vec![(1000.0, 1000.0)]);
        assert_eq!(session.resolve_pickups(), 0);
        assert_eq!(session.score_text.text, "Score: 0");
        assert!(session.events.sounds.is_empty());
    }

    #[test]
    fn test_missing_coin_layer_is_a_no_op() {
        let mut session = empty_session(vec![]);
        session.coin_layer = "Nope".to_string();
        assert_eq!(session.resolve_pickups(), 0);
    }
}
