//! Simple Platformer
//!
//! A side-scrolling platformer in the style of the classic arcade tutorial:
//! a tile map of platforms, gravity, jumping, coins to collect, a score
//! overlay and a camera that follows the player.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod game;
mod input;
mod platformer;
mod world;

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use config::{GameConfig, Stage, CONFIG_PATH};
use game::{SoundBank, SoundCue, TextureCache};
use platformer::{DrawSpriteView, PlatformerView, SpriteListView};

fn window_conf() -> Conf {
    let config = GameConfig::load_or_default(CONFIG_PATH);
    Conf {
        window_title: config.window_title,
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = VERSION, "starting");

    if let Err(e) = run().await {
        error!("{e:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(CONFIG_PATH);
    let mut textures = config.textures();

    let sounds = SoundBank::load([
        (SoundCue::Jump, config.jump_sound.clone()),
        (SoundCue::Coin, config.coin_sound.clone()),
    ])
    .await;

    match config.stage {
        Stage::DrawSprite => {
            let view = DrawSpriteView::new(&config);
            app::run_game(view, TextureCache::load(textures).await, sounds).await
        }
        Stage::SpriteList => {
            let view = SpriteListView::new(&config);
            app::run_game(view, TextureCache::load(textures).await, sounds).await
        }
        Stage::Platformer => {
            let map_source = load_file(&config.map_path).await
                .map_err(|e| anyhow::anyhow!("failed to read map {}: {e}", config.map_path))?;
            let view = PlatformerView::new(config, map_source)?;
            textures.extend(view.map_textures());
            app::run_game(view, TextureCache::load(textures).await, sounds).await
        }
    }
}
