use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub const SETTINGS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub format_version: u32,
    pub mute_audio: bool,
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { format_version: SETTINGS_FORMAT_VERSION, mute_audio: false, fullscreen: false }
    }
}

fn data_file(name: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| proj_dirs.data_dir().join(name))
}

impl Settings {
    pub fn get_default_path() -> Option<PathBuf> {
        data_file("settings.json")
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        write_text_atomic(path, &json)
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }

    /// A missing file is normal on first launch; other failures are logged and defaults used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("ignoring unreadable settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

/// Where the "save current map" hotkey writes the level CSV.
pub fn saved_map_path() -> Option<PathBuf> {
    data_file("saved_map.csv")
}

pub fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
