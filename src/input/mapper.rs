//! Key events → player velocity
//!
//! Pressing a direction sets horizontal velocity outright (last press wins).
//! Releasing a direction only stops the player if they are still moving that
//! way, so letting go of LEFT after already pressing RIGHT does not cancel
//! the new direction. Holding both keys and releasing the newer one leaves
//! the player standing even though the older key is still down; there is no
//! per-key held state.

use macroquad::prelude::KeyCode;
use crate::game::Sprite;
use super::actions::{Action, KeyMap};

/// What a key event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Key not bound, or bound to nothing that applies on this edge
    Ignored,
    /// Session should be set up again
    Restart,
    /// Vertical velocity set to jump speed
    Jumped,
    /// Jump pressed while airborne
    JumpIgnored,
    /// Horizontal velocity set
    Moved,
    /// Horizontal velocity zeroed
    Stopped,
}

#[derive(Debug, Clone)]
pub struct InputMapper {
    pub keys: KeyMap,
    pub movement_speed: f32,
    pub jump_speed: f32,
}

impl InputMapper {
    pub fn new(keys: KeyMap, movement_speed: f32, jump_speed: f32) -> Self {
        Self { keys, movement_speed, jump_speed }
    }

    /// Handle a key press. `grounded` is only asked for jump keys.
    pub fn key_down(
        &self,
        key: KeyCode,
        player: &mut Sprite,
        grounded: impl FnOnce(&Sprite) -> bool,
    ) -> InputOutcome {
        match self.keys.action(key) {
            Some(Action::Restart) => InputOutcome::Restart,
            Some(Action::Jump) => {
                if grounded(player) {
                    player.velocity.y = self.jump_speed;
                    InputOutcome::Jumped
                } else {
                    InputOutcome::JumpIgnored
                }
            }
            Some(Action::MoveLeft) => {
                player.velocity.x = -self.movement_speed;
                InputOutcome::Moved
            }
            Some(Action::MoveRight) => {
                player.velocity.x = self.movement_speed;
                InputOutcome::Moved
            }
            None => InputOutcome::Ignored,
        }
    }

    /// Handle a key release.
    pub fn key_up(&self, key: KeyCode, player: &mut Sprite) -> InputOutcome {
        let moving_that_way = match self.keys.action(key) {
            Some(Action::MoveLeft) => player.velocity.x < 0.0,
            Some(Action::MoveRight) => player.velocity.x > 0.0,
            _ => return InputOutcome::Ignored,
        };
        if moving_that_way {
            player.velocity.x = 0.0;
            InputOutcome::Stopped
        } else {
            InputOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EntityAllocator, Visual};
    use macroquad::prelude::vec2;

    fn setup() -> (InputMapper, Sprite) {
        let mut entities = EntityAllocator::new();
        let player = Sprite::new(entities.allocate(), Visual::new("player"), vec2(72.0, 96.0));
        (InputMapper::new(KeyMap::default(), 5.0, 20.0), player)
    }

    #[test]
    fn test_last_direction_pressed_wins() {
        let (mapper, mut player) = setup();
        mapper.key_down(KeyCode::Left, &mut player, |_| true);
        mapper.key_down(KeyCode::Right, &mut player, |_| true);
        assert_eq!(player.velocity.x, 5.0);

        mapper.key_down(KeyCode::A, &mut player, |_| true);
        assert_eq!(player.velocity.x, -5.0);
    }

    #[test]
    fn test_releasing_stale_direction_keeps_moving() {
        let (mapper, mut player) = setup();
        mapper.key_down(KeyCode::Left, &mut player, |_| true);
        mapper.key_down(KeyCode::Right, &mut player, |_| true);

        assert_eq!(mapper.key_up(KeyCode::Left, &mut player), InputOutcome::Ignored);
        assert_eq!(player.velocity.x, 5.0);

        assert_eq!(mapper.key_up(KeyCode::Right, &mut player), InputOutcome::Stopped);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn test_release_with_alternate_key_of_same_direction() {
        let (mapper, mut player) = setup();
        mapper.key_down(KeyCode::Left, &mut player, |_| true);
        assert_eq!(mapper.key_up(KeyCode::A, &mut player), InputOutcome::Stopped);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mapper, mut player) = setup();
        player.velocity.y = -3.0;

        assert_eq!(mapper.key_down(KeyCode::Up, &mut player, |_| false), InputOutcome::JumpIgnored);
        assert_eq!(player.velocity.y, -3.0);

        assert_eq!(mapper.key_down(KeyCode::W, &mut player, |_| true), InputOutcome::Jumped);
        assert_eq!(player.velocity.y, 20.0);
    }

    #[test]
    fn test_grounded_not_queried_for_other_keys() {
        let (mapper, mut player) = setup();
        let outcome = mapper.key_down(KeyCode::Right, &mut player, |_| panic!("asked for ground"));
        assert_eq!(outcome, InputOutcome::Moved);
    }

    #[test]
    fn test_escape_requests_restart_and_unbound_keys_do_nothing() {
        let (mapper, mut player) = setup();
        assert_eq!(mapper.key_down(KeyCode::Escape, &mut player, |_| true), InputOutcome::Restart);
        assert_eq!(mapper.key_down(KeyCode::Down, &mut player, |_| true), InputOutcome::Ignored);
        assert_eq!(mapper.key_up(KeyCode::Up, &mut player), InputOutcome::Ignored);
        assert_eq!(player.velocity, vec2(0.0, 0.0));
    }
}
