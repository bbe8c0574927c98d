//! Screen flow for the desktop front end.
//! This module exists so menu, play, jumpscare and end-screen transitions are testable
//! without a window. It does not draw or poll the keyboard; callers pass each frame's keys.

use std::mem;

use chase_core::{Game, LogEvent, RunOutcome, Screen, TickInput, TileGrid, Tuning, sounds};
use macroquad::prelude::KeyCode;

use crate::audio::{AudioCommand, AudioQueue};
use crate::settings_file::Settings;
use crate::{format_snapshot_hash, outcome_code};

/// Frames the jumpscare stays on screen before the end screen.
pub const JUMPSCARE_FRAMES: u32 = 60;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::A, KeyCode::Left];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::D, KeyCode::Right];
const UP_KEYS: [KeyCode; 2] = [KeyCode::W, KeyCode::Up];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::S, KeyCode::Down];

pub struct AppState {
    pub screen: Screen,
    pub settings: Settings,
    pub audio: AudioQueue,
    game: Option<Game>,
    level: TileGrid,
    tuning: Tuning,
    next_seed: u64,
    jumpscare_frames_left: u32,
    last_outcome: Option<RunOutcome>,
    last_error: Option<String>,
    /// Set by an input reset; movement stays ignored until every direction key is released.
    movement_held_over: bool,
    settings_changed: bool,
    map_export: Option<String>,
    quit_requested: bool,
}

fn any_down(keys_down: &[KeyCode], keys: &[KeyCode]) -> bool {
    keys.iter().any(|key| keys_down.contains(key))
}

fn axis(keys_down: &[KeyCode], negative: &[KeyCode], positive: &[KeyCode]) -> i8 {
    i8::from(any_down(keys_down, positive)) - i8::from(any_down(keys_down, negative))
}

impl AppState {
    pub fn new(level: TileGrid, tuning: Tuning, settings: Settings, seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            audio: AudioQueue::new(settings.mute_audio),
            settings,
            game: None,
            level,
            tuning,
            next_seed: seed,
            jumpscare_frames_left: 0,
            last_outcome: None,
            last_error: None,
            movement_held_over: false,
            settings_changed: false,
            map_export: None,
            quit_requested: false,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn last_outcome(&self) -> Option<RunOutcome> {
        self.last_outcome
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn jumpscare_frames_left(&self) -> u32 {
        self.jumpscare_frames_left
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Returns true once after each settings edit so the caller can persist and apply it.
    pub fn take_settings_changed(&mut self) -> bool {
        mem::take(&mut self.settings_changed)
    }

    /// CSV of the live map, present after the save-map hotkey was pressed.
    pub fn take_map_export(&mut self) -> Option<String> {
        self.map_export.take()
    }

    /// Advance one frame of whichever screen is showing.
    pub fn tick(&mut self, keys_pressed: &[KeyCode], keys_down: &[KeyCode]) {
        match self.screen {
            Screen::Menu => self.tick_menu(keys_pressed),
            Screen::Settings => self.tick_settings(keys_pressed),
            Screen::PlayGame => self.tick_play(keys_pressed, keys_down),
            Screen::Jumpscare => self.tick_jumpscare(),
            Screen::LoseWin => self.tick_lose_win(keys_pressed),
        }
    }

    fn tick_menu(&mut self, keys_pressed: &[KeyCode]) {
        if keys_pressed.contains(&KeyCode::Enter) {
            self.start_run();
        } else if keys_pressed.contains(&KeyCode::S) {
            self.enter(Screen::Settings);
        } else if keys_pressed.contains(&KeyCode::Escape) {
            self.quit_requested = true;
        }
    }

    fn tick_settings(&mut self, keys_pressed: &[KeyCode]) {
        if keys_pressed.contains(&KeyCode::M) {
            self.settings.mute_audio = !self.settings.mute_audio;
            self.audio.set_muted(self.settings.mute_audio);
            self.settings_changed = true;
        }
        if keys_pressed.contains(&KeyCode::F) {
            self.settings.fullscreen = !self.settings.fullscreen;
            self.settings_changed = true;
        }
        if keys_pressed.contains(&KeyCode::Escape) {
            self.enter(Screen::Menu);
        }
    }

    fn start_run(&mut self) {
        let seed = self.next_seed;
        match Game::new(seed, self.level.clone(), self.tuning.clone()) {
            Ok(game) => {
                log::info!("starting run with seed {seed}");
                self.next_seed = seed.wrapping_add(1);
                self.last_outcome = None;
                self.last_error = None;
                self.game = Some(game);
                self.enter(Screen::PlayGame);
                self.route_game_events();
            }
            Err(err) => {
                log::error!("cannot start run: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    fn tick_play(&mut self, keys_pressed: &[KeyCode], keys_down: &[KeyCode]) {
        let Some(game) = self.game.as_mut() else {
            self.enter(Screen::Menu);
            return;
        };
        if keys_pressed.contains(&KeyCode::Escape) {
            log::info!("run abandoned on tick {}", game.current_tick());
            self.audio.push(AudioCommand::Stop(sounds::BGM));
            self.game = None;
            self.enter(Screen::Menu);
            return;
        }
        if keys_pressed.contains(&KeyCode::F5) {
            self.map_export = Some(game.state().grid.to_csv());
        }

        let moving = [LEFT_KEYS, RIGHT_KEYS, UP_KEYS, DOWN_KEYS]
            .iter()
            .any(|keys| any_down(keys_down, keys));
        if self.movement_held_over && !moving {
            self.movement_held_over = false;
        }
        let mut input = TickInput {
            whistle: keys_pressed.contains(&KeyCode::E),
            drop_flare: keys_pressed.contains(&KeyCode::F),
            drop_cereal: keys_pressed.contains(&KeyCode::C),
            ..TickInput::default()
        };
        if !self.movement_held_over {
            input.move_x = axis(keys_down, &LEFT_KEYS, &RIGHT_KEYS);
            input.move_y = axis(keys_down, &UP_KEYS, &DOWN_KEYS);
        }

        game.tick(&input);
        self.route_game_events();
    }

    fn route_game_events(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let events = game.drain_events();
        let finished = game.outcome().map(|outcome| {
            (outcome, game.current_tick(), format_snapshot_hash(game.snapshot_hash()))
        });

        for event in events {
            match event {
                LogEvent::PlaySound(sound) => self.audio.push(AudioCommand::Play(sound)),
                LogEvent::StopSound(sound) => self.audio.push(AudioCommand::Stop(sound)),
                LogEvent::InputReset => self.movement_held_over = true,
                LogEvent::ScreenRequested(screen) => self.enter(screen),
                _ => {}
            }
        }

        if self.last_outcome.is_none()
            && let Some((outcome, tick, hash)) = finished
        {
            log::info!("run finished {} on tick {tick}, snapshot {hash}", outcome_code(&outcome));
            self.last_outcome = Some(outcome);
        }
    }

    fn tick_jumpscare(&mut self) {
        self.jumpscare_frames_left = self.jumpscare_frames_left.saturating_sub(1);
        if self.jumpscare_frames_left == 0 {
            self.enter(Screen::LoseWin);
        }
    }

    fn tick_lose_win(&mut self, keys_pressed: &[KeyCode]) {
        if keys_pressed.contains(&KeyCode::Enter) {
            self.game = None;
            self.enter(Screen::Menu);
        }
    }

    fn enter(&mut self, screen: Screen) {
        if screen == Screen::Jumpscare {
            self.jumpscare_frames_left = JUMPSCARE_FRAMES;
        }
        if screen != self.screen {
            log::debug!("screen {} -> {}", self.screen.name(), screen.name());
        }
        self.screen = screen;
    }
}
