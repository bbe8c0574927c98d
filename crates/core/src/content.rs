//! Gameplay tuning and the built-in level.
//! This module exists so balance numbers live in one serde-loadable place.
//! It does not own simulation rules or level parsing.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub steps_per_tile: i32,
    pub player_speed: i32,
    pub enemy_speed: i32,
    pub pet_speed: i32,
    pub idle_limit: u32,
    pub patrol_limit: u32,
    pub stunned_limit: u32,
    pub flare_limit: u32,
    /// Euclidean cell distance inside which the enemy notices the player or pet.
    pub capture_radius: f32,
    /// The pet stops closing in once it is this near the player.
    pub pet_follow_distance: f32,
    pub path_budget: u32,
    pub start_lives: i32,
    pub max_lives: i32,
    pub whistle_charges: i32,
    pub item_capacity: i32,
    /// One-in-N chance per eligible tick of an ambient growl.
    pub ambient_sound_odds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            steps_per_tile: 8,
            player_speed: 2,
            enemy_speed: 2,
            pet_speed: 2,
            idle_limit: 60,
            patrol_limit: 60,
            stunned_limit: 210,
            flare_limit: 210,
            capture_radius: 7.0,
            pet_follow_distance: 2.0,
            path_budget: 512,
            start_lives: 1,
            max_lives: 3,
            whistle_charges: 2,
            item_capacity: 1,
            ambient_sound_odds: 100,
        }
    }
}

#[derive(Debug)]
pub enum TuningError {
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "tuning file is not valid toml: {err}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl Error for TuningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl Tuning {
    pub fn from_toml_str(text: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = toml::from_str(text).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.steps_per_tile < 1 {
            return Err(TuningError::Invalid("steps_per_tile must be at least 1"));
        }
        for speed in [self.player_speed, self.enemy_speed, self.pet_speed] {
            if speed < 1 || speed > self.steps_per_tile {
                return Err(TuningError::Invalid("speeds must be within 1..=steps_per_tile"));
            }
        }
        if self.max_lives < 1 || self.start_lives < 1 || self.start_lives > self.max_lives {
            return Err(TuningError::Invalid("start_lives must be within 1..=max_lives"));
        }
        if self.capture_radius < 0.0 || self.pet_follow_distance < 0.0 {
            return Err(TuningError::Invalid("distances must be non-negative"));
        }
        if self.ambient_sound_odds == 0 {
            return Err(TuningError::Invalid("ambient_sound_odds must be at least 1"));
        }
        Ok(())
    }
}

/// 16x12 level in the comma-separated tile-code format.
pub const DEFAULT_LEVEL: &str = "\
100,100,100,100,100,100,100,100,100,100,100,100,100,100,100,100
100,200,250,0,0,0,0,100,0,0,0,0,0,0,0,100
100,0,0,0,0,0,0,100,0,0,0,0,4,0,0,100
100,0,0,100,100,2,0,0,0,0,100,100,0,0,0,100
100,0,0,100,0,0,0,0,0,0,0,100,0,0,0,100
100,0,0,0,0,0,0,100,100,0,0,0,0,0,0,100
100,100,0,0,0,0,20,0,0,0,0,0,0,100,0,100
100,0,0,0,100,0,0,0,0,0,100,0,0,100,0,100
100,0,10,0,100,0,0,0,0,0,100,0,0,0,0,100
100,0,0,0,0,0,0,100,0,0,0,0,0,0,0,100
100,99,0,0,0,0,0,100,0,0,0,0,0,0,300,100
100,100,100,100,100,100,100,100,100,100,100,100,100,100,100,100
";
