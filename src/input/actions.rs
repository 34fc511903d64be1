//! Game actions and key bindings
//!
//! Keys are looked up in a table instead of compared one by one, so
//! rebinding is a matter of editing the map.

use std::collections::HashMap;
use macroquad::prelude::KeyCode;

/// Everything a key can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    MoveLeft,
    MoveRight,
    /// Throw the session away and set up again
    Restart,
}

/// Key → action table
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, Action>,
}

impl KeyMap {
    /// No bindings at all
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Bind `key`, replacing whatever it did before.
    pub fn bind(&mut self, key: KeyCode, action: Action) -> &mut Self {
        self.bindings.insert(key, action);
        self
    }

    pub fn action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyMap {
    /// Arrow keys and WASD, Escape restarts
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(KeyCode::Up, Action::Jump)
            .bind(KeyCode::W, Action::Jump)
            .bind(KeyCode::Left, Action::MoveLeft)
            .bind(KeyCode::A, Action::MoveLeft)
            .bind(KeyCode::Right, Action::MoveRight)
            .bind(KeyCode::D, Action::MoveRight)
            .bind(KeyCode::Escape, Action::Restart);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = KeyMap::default();
        assert_eq!(map.action(KeyCode::W), Some(Action::Jump));
        assert_eq!(map.action(KeyCode::Up), Some(Action::Jump));
        assert_eq!(map.action(KeyCode::A), Some(Action::MoveLeft));
        assert_eq!(map.action(KeyCode::Right), Some(Action::MoveRight));
        assert_eq!(map.action(KeyCode::Escape), Some(Action::Restart));
        assert_eq!(map.action(KeyCode::Down), None);
        assert_eq!(map.action(KeyCode::S), None);
    }

    #[test]
    fn test_rebinding() {
        let mut map = KeyMap::default();
        map.bind(KeyCode::Space, Action::Jump).bind(KeyCode::W, Action::Restart);

        assert_eq!(map.action(KeyCode::Space), Some(Action::Jump));
        assert_eq!(map.action(KeyCode::W), Some(Action::Restart));
        assert_eq!(map.action(KeyCode::Up), Some(Action::Jump));
    }
}
