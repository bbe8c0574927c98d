//! Drawing for each screen. Tiles are flat colour blocks and agents are inset squares.

use app::app_loop::AppState;
use app::{format_snapshot_hash, outcome_code};
use chase_core::{Agent, Game, ItemKey, RunOutcome, Screen, Tile};
use macroquad::prelude::*;

const HUD_HEIGHT: f32 = 28.0;
const HUD_FONT_SIZE: f32 = 20.0;
const TITLE_FONT_SIZE: f32 = 48.0;
const BODY_FONT_SIZE: f32 = 24.0;
const LINE_STEP: f32 = 32.0;
const AGENT_INSET: f32 = 0.15;

pub fn draw_frame(app: &AppState) {
    match app.screen {
        Screen::Menu => draw_menu(app),
        Screen::Settings => draw_settings(app),
        Screen::PlayGame => {
            if let Some(game) = app.game() {
                draw_play(game);
            }
        }
        Screen::Jumpscare => draw_jumpscare(app),
        Screen::LoseWin => draw_lose_win(app),
    }
}

fn draw_lines(title: &str, title_color: Color, lines: &[String]) {
    let top = screen_height() * 0.3;
    draw_text(title, 40.0, top, TITLE_FONT_SIZE, title_color);
    for (index, line) in lines.iter().enumerate() {
        let y = top + LINE_STEP * (index as f32 + 2.0);
        draw_text(line, 40.0, y, BODY_FONT_SIZE, LIGHTGRAY);
    }
}

fn draw_menu(app: &AppState) {
    let mut lines = vec![
        "Enter  start".to_string(),
        "S      settings".to_string(),
        "Escape quit".to_string(),
    ];
    if let Some(err) = app.last_error() {
        lines.push(format!("Could not start: {err}"));
    }
    draw_lines("CHASE", WHITE, &lines);
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn draw_settings(app: &AppState) {
    let lines = [
        format!("M      mute audio: {}", on_off(app.settings.mute_audio)),
        format!("F      fullscreen: {}", on_off(app.settings.fullscreen)),
        "Escape back".to_string(),
    ];
    draw_lines("SETTINGS", WHITE, &lines);
}

fn draw_jumpscare(app: &AppState) {
    // Flash between two reds as the countdown runs.
    let color = if app.jumpscare_frames_left() % 10 < 5 { RED } else { MAROON };
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), color);
    draw_text("CAUGHT", screen_width() * 0.35, screen_height() * 0.5, 96.0, BLACK);
}

fn draw_lose_win(app: &AppState) {
    let (title, color) = match app.last_outcome() {
        Some(RunOutcome::Victory) => ("YOU ESCAPED", GREEN),
        _ => ("YOU LOST", RED),
    };
    let mut lines = Vec::new();
    if let (Some(outcome), Some(game)) = (app.last_outcome(), app.game()) {
        lines.push(format!("{} on tick {}", outcome_code(&outcome), game.current_tick()));
        lines.push(format!("snapshot {}", format_snapshot_hash(game.snapshot_hash())));
    }
    lines.push("Enter  back to menu".to_string());
    draw_lines(title, color, &lines);
}

fn tile_color(tile: Tile) -> Option<Color> {
    match tile {
        Tile::Empty | Tile::Spawn(_) | Tile::Inert(_) => None,
        Tile::FlarePickup => Some(ORANGE),
        Tile::FlareDropped => Some(YELLOW),
        Tile::CerealPickup => Some(BEIGE),
        Tile::CerealDropped => Some(BROWN),
        Tile::LifePickup => Some(PINK),
        Tile::Spikes => Some(PURPLE),
        Tile::Exit => Some(DARKGREEN),
        Tile::Obstacle(_) => Some(DARKGRAY),
    }
}

fn draw_play(game: &Game) {
    let state = game.state();
    let grid = &state.grid;
    let width = grid.width().max(1);
    let tile_w = screen_width() / width as f32;
    let tile_h = (screen_height() - HUD_HEIGHT) / grid.height().max(1) as f32;

    for (index, code) in grid.cells().iter().enumerate() {
        if let Some(color) = tile_color(Tile::from_code(*code)) {
            let x = (index % width) as f32 * tile_w;
            let y = HUD_HEIGHT + (index / width) as f32 * tile_h;
            draw_rectangle(x, y, tile_w, tile_h, color);
        }
    }

    let steps = game.tuning().steps_per_tile;
    for (agent, color) in [(state.pet(), GOLD), (state.enemy(), RED), (state.player(), SKYBLUE)] {
        draw_agent(agent, color, tile_w, tile_h, steps);
    }

    let hud = format!(
        "Lives {}/{}   Item {}   Whistle {}   Enemy {:?}",
        state.inventory.count(ItemKey::Lives),
        state.inventory.max(ItemKey::Lives),
        state.held.map_or_else(|| "-".to_string(), |item| format!("{item:?}")),
        state.inventory.count(ItemKey::Whistle),
        state.brain.state,
    );
    draw_text(&hud, 8.0, HUD_HEIGHT - 8.0, HUD_FONT_SIZE, WHITE);
}

fn draw_agent(agent: &Agent, color: Color, tile_w: f32, tile_h: f32, steps: i32) {
    let (x, y) = agent.pixel_position(tile_w, tile_h, steps);
    draw_rectangle(
        x + tile_w * AGENT_INSET,
        HUD_HEIGHT + y + tile_h * AGENT_INSET,
        tile_w * (1.0 - 2.0 * AGENT_INSET),
        tile_h * (1.0 - 2.0 * AGENT_INSET),
        color,
    );
}
