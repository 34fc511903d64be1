//! Game Foundation Module
//!
//! The engine-side building blocks the platformer is composed from:
//! - Sprite: positioned, drawable, collidable object with a generational id
//! - Layer / Scene: named, ordered sprite lists (draw order + collision sets)
//! - Physics: frame-based platformer movement against solid layers
//! - Camera, Label, Canvas: what gets drawn and how
//! - Events: fire-and-forget cues drained by the host loop
//!
//! Nothing here knows about score, coins or key bindings; that lives in
//! `platformer`.

pub mod entity;
pub mod sprite;
pub mod spatial_hash;
pub mod layer;
pub mod scene;
pub mod collision;
pub mod physics;
pub mod camera;
pub mod text;
pub mod event;
pub mod render;
pub mod audio;

pub use entity::EntityAllocator;
pub use sprite::{Sprite, Visual};
pub use layer::Layer;
pub use scene::Scene;
pub use collision::check_for_collision_with_layer;
pub use physics::PlatformerPhysics;
pub use camera::Camera;
pub use text::Label;
pub use event::{Events, PickupEvent, SoundCue};
pub use render::{Canvas, CameraSpace, MacroquadCanvas, TextureCache};
pub use audio::SoundBank;
