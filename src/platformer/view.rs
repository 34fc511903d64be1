//! Platformer view
//!
//! Frame orchestration for the full game: `setup` builds a session from the
//! map, `update` runs physics then camera then pickups, `draw` renders the
//! world under the following camera and the score under the fixed one.

use macroquad::prelude::{Color, KeyCode};
use tracing::{debug, info, trace};
use crate::app::{GameHandler, Modifiers};
use crate::config::GameConfig;
use crate::game::{Canvas, CameraSpace, SoundCue};
use crate::input::{Action, InputMapper, InputOutcome, KeyMap};
use crate::world::{parse_tilemap, MapError};
use super::session::Session;

pub struct PlatformerView {
    config: GameConfig,
    /// Raw map file, parsed again on every restart
    map_source: Vec<u8>,
    map_textures: Vec<String>,
    input: InputMapper,
    session: Session,
}

impl PlatformerView {
    /// Parse the map and set up the first session.
    pub fn new(config: GameConfig, map_source: Vec<u8>) -> Result<Self, MapError> {
        let map = parse_tilemap(&map_source)?;
        let input = InputMapper::new(KeyMap::default(), config.player_movement_speed, config.player_jump_speed);
        let session = Session::new(&config, &map);
        let map_textures = map.textures().into_iter().collect();
        info!(entities = session.entities.alive_count(), "platformer ready");
        Ok(Self { config, map_source, map_textures, input, session })
    }

    /// Textures the map's tiles reference
    pub fn map_textures(&self) -> Vec<String> {
        self.map_textures.clone()
    }

    /// Throw the current session away and start over.
    pub fn setup(&mut self) -> Result<(), MapError> {
        let map = parse_tilemap(&self.map_source)?;
        info!(
            frames = self.session.frame,
            seconds = self.session.elapsed,
            score = self.session.score.value(),
            "restarting session"
        );
        self.session = Session::new(&self.config, &map);
        info!(
            entities = self.session.entities.alive_count(),
            sprites = self.session.scene.sprite_count(),
            "session ready"
        );
        Ok(())
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn update(&mut self, delta_time: f32) {
        let session = &mut self.session;
        session.frame += 1;
        session.elapsed += delta_time.max(0.0);
        session.events.pickups.clear();

        let step = session.physics.update(&mut session.player, &session.scene);
        if step.hit_horizontal {
            trace!(position = ?session.player.position, landed = step.hit_vertical, "blocked by wall");
        }
        session.cameras.follow(session.player.position);
        session.resolve_pickups();
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let session = &self.session;

        canvas.use_camera(&session.cameras.world, CameraSpace::World);
        session.scene.draw(canvas);
        canvas.draw_sprite(&session.player, 1.0);

        canvas.use_camera(&session.cameras.ui, CameraSpace::Screen);
        canvas.draw_label(&session.score_text);
    }

    pub fn key_down(&mut self, key: KeyCode) -> Result<(), MapError> {
        let Session { player, physics, scene, events, .. } = &mut self.session;
        let outcome = self.input.key_down(key, player, |p| physics.can_jump(p, scene));
        match outcome {
            InputOutcome::Restart => self.setup()?,
            InputOutcome::Jumped => {
                events.sounds.send(SoundCue::Jump);
                debug!(frame = self.session.frame, "jump");
            }
            _ => {}
        }
        Ok(())
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.input.key_up(key, &mut self.session.player);
    }
}

impl GameHandler for PlatformerView {
    fn background(&self) -> Color {
        self.config.background_color()
    }

    fn on_key_down(&mut self, key: KeyCode, _modifiers: Modifiers) -> anyhow::Result<()> {
        self.key_down(key)?;
        Ok(())
    }

    fn on_key_up(&mut self, key: KeyCode, _modifiers: Modifiers) {
        self.key_up(key);
    }

    fn is_restart_key(&self, key: KeyCode) -> bool {
        self.input.keys.action(key) == Some(Action::Restart)
    }

    fn on_update(&mut self, delta_time: f32) {
        self.update(delta_time);
    }

    fn on_draw(&self, canvas: &mut dyn Canvas) {
        self.draw(canvas);
    }

    fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        self.session.events.sounds.drain().collect()
    }
}
