//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

/// Keys acted on once per press: screen navigation, settings toggles, item actions, map save.
const EDGE_KEYS: [KeyCode; 8] = [
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::S,
    KeyCode::M,
    KeyCode::F,
    KeyCode::C,
    KeyCode::E,
    KeyCode::F5,
];

/// Keys acted on every frame while held.
const HELD_KEYS: [KeyCode; 8] = [
    KeyCode::A,
    KeyCode::D,
    KeyCode::W,
    KeyCode::S,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub keys_down: Vec<KeyCode>,
}

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = EDGE_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect();
    let keys_down = HELD_KEYS.into_iter().filter(|key| is_key_down(*key)).collect();
    FrameInput { keys_pressed, keys_down }
}
