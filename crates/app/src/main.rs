mod frame_input;
mod render;
mod window_config;

use std::env;

use app::app_loop::AppState;
use app::audio::{LogAudioSink, mute_override};
use app::seed::{generate_runtime_seed, resolve_seed_from_args};
use app::settings_file::{Settings, saved_map_path, write_text_atomic};
use chase_core::{DEFAULT_LEVEL, TileGrid, Tuning};
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use frame_input::capture_frame_input;
use window_config::build_window_conf;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn persist_settings(settings: &Settings) {
    let Some(path) = Settings::get_default_path() else {
        log::warn!("no data directory; settings not saved");
        return;
    };
    if let Err(err) = settings.write_atomic(&path) {
        log::warn!("failed to save settings to {}: {err}", path.display());
    }
}

fn export_map(csv: &str) {
    let Some(path) = saved_map_path() else {
        log::warn!("no data directory; map not saved");
        return;
    };
    match write_text_atomic(&path, csv) {
        Ok(()) => log::info!("map saved to {}", path.display()),
        Err(err) => log::warn!("failed to save map to {}: {err}", path.display()),
    }
}

#[macroquad::main(build_window_conf)]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let seed = match resolve_seed_from_args(&args, generate_runtime_seed()) {
        Ok(choice) => choice.value(),
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };
    let level = match TileGrid::from_csv(DEFAULT_LEVEL) {
        Ok(level) => level,
        Err(err) => {
            log::error!("built-in level is invalid: {err}");
            return;
        }
    };

    let mut settings = Settings::load_or_default(Settings::get_default_path().as_deref());
    if let Some(muted) = mute_override(env::var("CHASE_MUTE").ok().as_deref()) {
        settings.mute_audio = muted;
    }
    log::info!("seed {seed}, muted {}", settings.mute_audio);

    let mut app = AppState::new(level, Tuning::default(), settings, seed);
    let mut sink = LogAudioSink;

    loop {
        let input = capture_frame_input();
        app.tick(&input.keys_pressed, &input.keys_down);
        app.audio.flush(&mut sink);

        if app.take_settings_changed() {
            set_fullscreen(app.settings.fullscreen);
            persist_settings(&app.settings);
        }
        if let Some(csv) = app.take_map_export() {
            export_map(&csv);
        }
        if app.quit_requested() {
            break;
        }

        clear_background(BLACK);
        render::draw_frame(&app);
        next_frame().await
    }
}
