use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::dataset::ColumnPatterns;

/// Application configuration containing all hardcoded values
///
/// Media folders and the annotation export are resolved next to whichever
/// dataset file is opened, see [`AppConfig::paths_for`].
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub default_dataset_path: PathBuf,
    pub audio_dir_name: String,
    pub image_dir_name: String,
    pub export_file_name: String,
    pub column_patterns: ColumnPatterns,
    /// Write the export file after every commit that leaves the store non-empty
    pub autosave_on_commit: bool,
    pub window_width: f32,
    pub window_height: f32,
    pub images_per_row: usize,
    /// Longest edge of a decoded thumbnail, in pixels
    pub thumbnail_edge: u32,
    pub side_panel_width: f32,
    pub notification_duration: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_dataset_path: PathBuf::from("music_image_combined.csv"),
            audio_dir_name: "audio".to_string(),
            image_dir_name: "image".to_string(),
            export_file_name: "final_annotations.csv".to_string(),
            column_patterns: ColumnPatterns::default(),
            autosave_on_commit: true,
            window_width: 1400.0,
            window_height: 900.0,
            images_per_row: 5,
            thumbnail_edge: 320,
            side_panel_width: 340.0,
            notification_duration: Duration::from_secs(4),
        }
    }
}

/// Files that belong to one opened dataset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetPaths {
    pub dataset: PathBuf,
    pub audio_dir: PathBuf,
    pub image_dir: PathBuf,
    /// Prior annotations are read from here and exports are written here
    pub export_file: PathBuf,
}

impl AppConfig {
    pub fn paths_for(&self, dataset: &Path) -> DatasetPaths {
        let base = dataset
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        DatasetPaths {
            dataset: dataset.to_path_buf(),
            audio_dir: base.join(&self.audio_dir_name),
            image_dir: base.join(&self.image_dir_name),
            export_file: base.join(&self.export_file_name),
        }
    }
}
