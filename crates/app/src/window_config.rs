//! Window configuration for the desktop app.

use app::APP_NAME;
use app::settings_file::Settings;
use macroquad::window::Conf;

/// 16x12 tiles of 60px plus the status strip.
const DEFAULT_WINDOW_WIDTH: i32 = 960;
const DEFAULT_WINDOW_HEIGHT: i32 = 748;

pub fn build_window_conf() -> Conf {
    let settings = Settings::load_or_default(Settings::get_default_path().as_deref());
    window_conf_for(&settings)
}

pub fn window_conf_for(settings: &Settings) -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        fullscreen: settings.fullscreen,
        high_dpi: true,
        ..Default::default()
    }
}
