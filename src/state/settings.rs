use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SETTINGS_FILE: &str = "settings.json";

/// Persistent user settings that are saved between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Last dataset file that was opened
    pub last_dataset_path: Option<PathBuf>,

    /// Zero-based index of the last song shown
    #[serde(default)]
    pub last_song_index: usize,

    pub window_width: f32,

    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_dataset_path: None,
            last_song_index: 0,
            window_width: 1400.0,
            window_height: 900.0,
        }
    }
}

impl Settings {
    /// Platform config directory, or the executable's directory when the
    /// platform has none
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "music-image-annotator")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(|dir| dir.join(SETTINGS_FILE)))
            })
    }

    /// Load settings from disk, or return defaults if the file doesn't exist or is corrupted
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("Could not determine config directory. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        info!("Loading settings from: {:?}", path);

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    info!("Successfully loaded settings");
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No settings file found. Using defaults.");
                Self::default()
            }
            Err(e) => {
                warn!("Failed to read settings file: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.window_width, 1400.0);
        assert_eq!(settings.window_height, 900.0);
        assert_eq!(settings.last_song_index, 0);
        assert!(settings.last_dataset_path.is_none());
    }

    #[test]
    fn test_settings_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            last_dataset_path: Some(PathBuf::from("data/music_image_combined.csv")),
            last_song_index: 42,
            window_width: 1280.0,
            window_height: 720.0,
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_or_corrupt_settings_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        assert_eq!(Settings::load_from(&path), Settings::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_older_settings_without_index_still_load() {
        let json = r#"{"last_dataset_path":null,"window_width":800.0,"window_height":600.0}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.last_song_index, 0);
        assert_eq!(settings.window_width, 800.0);
    }
}
