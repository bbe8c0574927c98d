use app::app_loop::{AppState, JUMPSCARE_FRAMES};
use app::audio::AudioCommand;
use app::settings_file::Settings;
use chase_core::{
    DEFAULT_LEVEL, DefeatCause, RunOutcome, Screen, TileGrid, Tuning, sounds, tiles::codes,
};
use macroquad::prelude::KeyCode;

/// Player two tiles left of the exit, enemy sealed off in the bottom corner.
const EXIT_CORRIDOR: &str = "\
100,100,100,100,100
100,200,0,99,100
100,250,100,100,100
100,100,100,300,100
100,100,100,100,100
";

/// Enemy parked directly right of the player.
const ENEMY_NEXT_DOOR: &str = "\
100,100,100,100,100
100,200,300,0,100
100,250,100,0,100
100,100,100,100,100
";

fn app_for(level: &str, seed: u64) -> AppState {
    let grid = TileGrid::from_csv(level).expect("test level parses");
    AppState::new(grid, Tuning::default(), Settings::default(), seed)
}

fn run_frames(app: &mut AppState, frames: usize, keys_down: &[KeyCode]) {
    for _ in 0..frames {
        app.tick(&[], keys_down);
    }
}

#[test]
fn test_menu_enter_starts_a_run_with_music() {
    let mut app = app_for(DEFAULT_LEVEL, 7);
    assert_eq!(app.screen, Screen::Menu);
    assert!(app.game().is_none());

    app.tick(&[KeyCode::Enter], &[]);

    assert_eq!(app.screen, Screen::PlayGame);
    assert_eq!(app.game().map(|game| game.seed()), Some(7));
    assert_eq!(app.audio.pending(), &[AudioCommand::Play(sounds::BGM)]);
}

#[test]
fn test_reaching_exit_shows_end_screen_then_menu() {
    let mut app = app_for(EXIT_CORRIDOR, 1);
    app.tick(&[KeyCode::Enter], &[]);

    run_frames(&mut app, 8, &[KeyCode::D]);

    assert_eq!(app.screen, Screen::LoseWin);
    assert_eq!(app.last_outcome(), Some(RunOutcome::Victory));
    assert!(app.audio.pending().contains(&AudioCommand::Play(sounds::DONE)));

    app.tick(&[KeyCode::Enter], &[]);
    assert_eq!(app.screen, Screen::Menu);
    assert!(app.game().is_none());
}

#[test]
fn test_capture_runs_jumpscare_countdown() {
    let mut app = app_for(ENEMY_NEXT_DOOR, 1);
    app.tick(&[KeyCode::Enter], &[]);

    run_frames(&mut app, 4, &[KeyCode::Right]);

    assert_eq!(app.screen, Screen::Jumpscare);
    assert_eq!(app.jumpscare_frames_left(), JUMPSCARE_FRAMES);
    assert_eq!(app.last_outcome(), Some(RunOutcome::Defeat(DefeatCause::Caught)));
    assert!(app.audio.pending().contains(&AudioCommand::Play(sounds::JUMPSCARE)));

    run_frames(&mut app, JUMPSCARE_FRAMES as usize - 1, &[]);
    assert_eq!(app.screen, Screen::Jumpscare);
    assert_eq!(app.jumpscare_frames_left(), 1);

    app.tick(&[], &[]);
    assert_eq!(app.screen, Screen::LoseWin);
}

#[test]
fn test_input_reset_ignores_held_keys_until_released() {
    let mut app = app_for(ENEMY_NEXT_DOOR, 1);
    app.tick(&[KeyCode::Enter], &[]);
    run_frames(&mut app, 4, &[KeyCode::Right]);
    run_frames(&mut app, JUMPSCARE_FRAMES as usize, &[KeyCode::Right]);
    app.tick(&[KeyCode::Enter], &[KeyCode::Right]);
    app.tick(&[KeyCode::Enter], &[KeyCode::Right]);
    assert_eq!(app.screen, Screen::PlayGame);
    assert_eq!(app.game().map(|game| game.seed()), Some(2));

    run_frames(&mut app, 8, &[KeyCode::Right]);
    let player = app.game().expect("run in progress").state().player().clone();
    assert_eq!(player.pos, player.spawn);
    assert!(player.is_aligned());

    app.tick(&[], &[]);
    run_frames(&mut app, 4, &[KeyCode::Right]);
    assert_eq!(app.screen, Screen::Jumpscare);
}

#[test]
fn test_settings_toggles_are_reported_once() {
    let mut app = app_for(DEFAULT_LEVEL, 1);
    app.tick(&[KeyCode::S], &[]);
    assert_eq!(app.screen, Screen::Settings);

    app.tick(&[KeyCode::M, KeyCode::F], &[]);
    assert!(app.settings.mute_audio);
    assert!(app.settings.fullscreen);
    assert!(app.audio.is_muted());
    assert!(app.take_settings_changed());
    assert!(!app.take_settings_changed());

    app.tick(&[KeyCode::Escape], &[]);
    assert_eq!(app.screen, Screen::Menu);
    assert!(!app.quit_requested());

    app.tick(&[KeyCode::Enter], &[]);
    assert!(!app.audio.pending().contains(&AudioCommand::Play(sounds::BGM)));
}

#[test]
fn test_escape_abandons_run_and_stops_music() {
    let mut app = app_for(DEFAULT_LEVEL, 1);
    app.tick(&[KeyCode::Enter], &[]);
    app.tick(&[KeyCode::Escape], &[]);

    assert_eq!(app.screen, Screen::Menu);
    assert!(app.game().is_none());
    assert_eq!(app.audio.pending().last(), Some(&AudioCommand::Stop(sounds::BGM)));

    app.tick(&[KeyCode::Escape], &[]);
    assert!(app.quit_requested());
}

#[test]
fn test_save_map_hotkey_exports_live_grid() {
    let mut app = app_for(DEFAULT_LEVEL, 1);
    assert_eq!(app.take_map_export(), None);
    app.tick(&[KeyCode::Enter], &[]);
    app.tick(&[KeyCode::F5], &[]);

    let csv = app.take_map_export().expect("map exported");
    let grid = TileGrid::from_csv(&csv).expect("export parses");
    assert_eq!((grid.width(), grid.height()), (16, 12));
    assert_eq!(grid.find_first_tile_with_value(codes::PLAYER_SPAWN), None);
    assert_eq!(app.take_map_export(), None);
}

#[test]
fn test_level_without_spawns_stays_on_menu() {
    let mut app = app_for("0,0,0\n0,0,0\n", 1);
    app.tick(&[KeyCode::Enter], &[]);

    assert_eq!(app.screen, Screen::Menu);
    assert!(app.game().is_none());
    assert!(app.last_error().is_some_and(|err| err.contains("spawn")));
}
