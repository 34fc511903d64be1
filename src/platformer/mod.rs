//! Platformer
//!
//! The game itself, built on `game`, `input` and `world`:
//! - session: per-run state that setup rebuilds
//! - camera: following world camera plus fixed UI camera
//! - pickup: coin collection and scoring
//! - view: setup / update / draw orchestration
//! - stages: the two static tutorial steps before the full game

mod session;
mod camera;
mod pickup;
mod view;
mod stages;

pub use view::PlatformerView;
pub use stages::{DrawSpriteView, SpriteListView};
