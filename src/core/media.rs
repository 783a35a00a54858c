use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Audio file extension looked up for every song
pub const AUDIO_EXTENSION: &str = "mp3";

/// Non-fatal media problem surfaced next to the affected item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaWarning {
    MissingAudio { song_id: String },
    MissingImage { image_id: String },
}

impl fmt::Display for MediaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaWarning::MissingAudio { song_id } => {
                write!(f, "Audio file not found: {}.{}", song_id, AUDIO_EXTENSION)
            }
            MediaWarning::MissingImage { image_id } => write!(f, "Image missing: {}", image_id),
        }
    }
}

/// Read-only view of the audio and image roots
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    audio_root: PathBuf,
    image_root: PathBuf,
}

impl MediaLibrary {
    pub fn new(audio_root: impl Into<PathBuf>, image_root: impl Into<PathBuf>) -> Self {
        Self {
            audio_root: audio_root.into(),
            image_root: image_root.into(),
        }
    }

    pub fn audio_root(&self) -> &Path {
        &self.audio_root
    }

    pub fn image_root(&self) -> &Path {
        &self.image_root
    }

    /// Search the audio root recursively for `<song_id>.mp3`.
    ///
    /// Directories are walked in file-name order and the first match wins.
    pub fn find_audio(&self, song_id: &str) -> Option<PathBuf> {
        if !self.audio_root.is_dir() {
            warn!("Audio root {:?} is not a directory", self.audio_root);
            return None;
        }

        let wanted = OsString::from(format!("{}.{}", song_id, AUDIO_EXTENSION));
        let found = WalkDir::new(&self.audio_root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name() == wanted.as_os_str())
            .map(|entry| entry.into_path());

        match &found {
            Some(path) => debug!("Audio for {} resolved to {:?}", song_id, path),
            None => warn!("No audio file for song {}", song_id),
        }
        found
    }

    /// Location of an image, whether or not it exists
    pub fn image_path(&self, image_id: &str) -> PathBuf {
        self.image_root.join(image_id)
    }

    pub fn image_exists(&self, image_id: &str) -> bool {
        self.image_path(image_id).is_file()
    }
}
