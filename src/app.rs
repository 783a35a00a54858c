use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::{AppConfig, DatasetPaths};
use crate::core::annotation::{load_prior_annotations, write_export, Label};
use crate::core::dataset::load_dataset;
use crate::core::media::MediaLibrary;
use crate::core::session::{LabelingSession, NavigationOutcome, SlotKey};
use crate::core::LoadError;
use crate::state::{Notifications, Settings, ThumbnailCache, UIState};
use crate::ui;

pub struct AnnotatorApp {
    pub config: AppConfig,
    pub settings: Settings,
    /// Where settings are persisted, `None` when the platform has no config dir
    pub settings_path: Option<PathBuf>,

    // Labeling state, absent until a dataset loads
    pub session: Option<LabelingSession>,
    pub paths: Option<DatasetPaths>,
    pub load_error: Option<String>,

    // Presentation-only state
    pub thumbnails: ThumbnailCache,
    pub ui: UIState,
    pub notifications: Notifications,
}

impl AnnotatorApp {
    pub fn new(config: AppConfig, settings: Settings) -> Self {
        let mut app = Self {
            config,
            settings,
            settings_path: Settings::get_config_path(),
            session: None,
            paths: None,
            load_error: None,
            thumbnails: ThumbnailCache::new(),
            ui: UIState::new(),
            notifications: Notifications::new(),
        };

        let (dataset_path, resume) = startup_target(&app.settings, &app.config);
        if dataset_path.exists() {
            app.load_dataset(dataset_path, resume);
        } else {
            warn!("Dataset path does not exist: {:?}", dataset_path);
        }

        app
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            warn!("Could not determine config directory. Settings not saved.");
            return;
        };
        match self.settings.save_to(path) {
            Ok(()) => debug!("Settings saved to: {:?}", path),
            Err(e) => warn!("Failed to write settings file {:?}: {}", path, e),
        }
    }

    /// Track the live window size so the next start reopens at it
    pub fn remember_window_size(&mut self, width: f32, height: f32) {
        if width >= 1.0 && height >= 1.0 {
            self.settings.window_width = width;
            self.settings.window_height = height;
        }
    }

    /// Open a dataset picked by the user, starting at its first song
    pub fn open_dataset(&mut self, path: PathBuf) {
        self.load_dataset(path, 0);
    }

    fn load_dataset(&mut self, path: PathBuf, start_index: usize) {
        let paths = self.config.paths_for(&path);

        match Self::start_session(&self.config, &paths, start_index) {
            Ok(session) => {
                info!(
                    "Dataset {:?} ready: {} songs, {} prior annotations",
                    session.dataset().source(),
                    session.total(),
                    session.store().len()
                );
                self.notifications.info(format!(
                    "Loaded {} songs, {} saved annotations",
                    session.total(),
                    session.store().len()
                ));

                self.settings.last_dataset_path = Some(path);
                self.settings.last_song_index = session.cursor();
                self.save_settings();

                self.session = Some(session);
                self.paths = Some(paths);
                self.load_error = None;
            }
            Err(e) => {
                error!("Failed to load dataset {:?}: {}", path, e);
                self.notifications.error(format!("Could not load dataset: {}", e));
                self.session = None;
                self.paths = None;
                self.load_error = Some(format!("{:?}: {}", path, e));
            }
        }

        self.thumbnails.clear();
    }

    fn start_session(
        config: &AppConfig,
        paths: &DatasetPaths,
        start_index: usize,
    ) -> Result<LabelingSession, LoadError> {
        let dataset = load_dataset(&paths.dataset, &config.column_patterns)?;
        let store = load_prior_annotations(&paths.export_file)?;
        let media = MediaLibrary::new(&paths.audio_dir, &paths.image_dir);

        LabelingSession::starting_at(dataset, store, media, start_index)
    }

    pub fn next_song(&mut self) {
        if let Some(outcome) = self.session.as_mut().map(LabelingSession::next) {
            self.after_navigation(outcome);
        }
    }

    pub fn prev_song(&mut self) {
        if let Some(outcome) = self.session.as_mut().map(LabelingSession::previous) {
            self.after_navigation(outcome);
        }
    }

    pub fn jump_to_first(&mut self) {
        if let Some(outcome) = self.session.as_mut().map(LabelingSession::first) {
            self.after_navigation(outcome);
        }
    }

    pub fn jump_to_last(&mut self) {
        if let Some(outcome) = self.session.as_mut().map(LabelingSession::last) {
            self.after_navigation(outcome);
        }
    }

    /// Jump to a one-based song number. Returns false for out-of-range numbers.
    pub fn jump_to_position(&mut self, position: usize) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if position == 0 || position > session.total() {
            return false;
        }
        let outcome = session.jump_to(position - 1);
        self.after_navigation(outcome);
        true
    }

    fn after_navigation(&mut self, outcome: NavigationOutcome) {
        if !outcome.moved {
            return;
        }
        if outcome.discarded > 0 {
            debug!("{} uncommitted choices were dropped", outcome.discarded);
        }

        self.thumbnails.clear();
        if let Some(session) = &self.session {
            self.settings.last_song_index = session.cursor();
            self.save_settings();
        }
    }

    pub fn set_label(&mut self, key: &SlotKey, label: Label) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(e) = session.set_label(key, label) {
            warn!("Rejected label event: {}", e);
            self.notifications.warning(e.to_string());
        }
    }

    /// Merge the current page into the store, then auto-save if enabled
    pub fn commit_page(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let report = session.commit();

        let mut message = format!("Saved current page: {} new", report.merged);
        if report.skipped_existing > 0 {
            message.push_str(&format!(", {} already recorded", report.skipped_existing));
        }
        self.notifications.success(message);

        if self.config.autosave_on_commit && !session.store().is_empty() {
            if let Some(paths) = &self.paths {
                let target = paths.export_file.clone();
                self.write_export_to(&target);
            }
        }
    }

    /// Export every saved annotation next to the dataset
    pub fn export_all(&mut self) {
        if let Some(target) = self.paths.as_ref().map(|p| p.export_file.clone()) {
            self.write_export_to(&target);
        }
    }

    /// Export to a location picked in a save dialog
    pub fn export_as(&mut self) {
        let Some(paths) = &self.paths else {
            return;
        };
        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(self.config.export_file_name.as_str());
        if let Some(dir) = paths.export_file.parent() {
            dialog = dialog.set_directory(dir);
        }

        if let Some(target) = dialog.save_file() {
            self.write_export_to(&target);
        }
    }

    fn write_export_to(&mut self, target: &Path) {
        let Some(session) = &self.session else {
            return;
        };

        match write_export(session.store(), target) {
            Ok(summary) => {
                self.notifications.success(format!(
                    "Exported {} annotations to {}",
                    summary.rows,
                    summary.path.display()
                ));
            }
            Err(e) if e.is_warning() => {
                warn!("Export skipped: {}", e);
                self.notifications
                    .warning("No annotations saved yet. Label images and save the page first.");
            }
            Err(e) => {
                error!("Export to {:?} failed: {}", target, e);
                self.notifications.error(format!("Export failed: {}", e));
            }
        }
    }
}

/// Dataset to open on start and the song index to resume at.
///
/// The saved index only applies to the saved dataset. Falling back to the
/// default dataset starts at its first song.
fn startup_target(settings: &Settings, config: &AppConfig) -> (PathBuf, usize) {
    match settings.last_dataset_path.as_ref().filter(|path| path.exists()) {
        Some(path) => (path.clone(), settings.last_song_index),
        None => (config.default_dataset_path.clone(), 0),
    }
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.notifications.prune(self.config.notification_duration);

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.remember_window_size(rect.width(), rect.height());
        }

        ui::render_top_panel(self, ctx);
        ui::render_bottom_panel(self, ctx);

        if self.session.is_some() && self.ui.show_records_panel {
            ui::render_records_panel(self, ctx);
        }

        ui::render_central_panel(self, ctx);
        ui::render_notifications(self, ctx);
        ui::handle_keyboard_shortcuts(self, ctx);

        // Keep expiring notifications moving without user input
        if !self.notifications.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NotificationKind;
    use std::fs;
    use tempfile::TempDir;

    const DATASET: &str = "song_id,match_img1_x\ns1,a.jpg\ns2,b.jpg\ns3,c.jpg\n";

    /// App with a loaded three-song dataset in `dir`, optionally exporting
    /// somewhere other than next to the dataset
    fn app_in(dir: &TempDir, export_file: Option<PathBuf>) -> AnnotatorApp {
        let dataset_path = dir.path().join("music_image_combined.csv");
        fs::write(&dataset_path, DATASET).unwrap();
        let image_dir = dir.path().join("image");
        fs::create_dir_all(&image_dir).unwrap();
        for image in ["a.jpg", "b.jpg", "c.jpg"] {
            fs::write(image_dir.join(image), b"img").unwrap();
        }

        let config = AppConfig::default();
        let mut paths = config.paths_for(&dataset_path);
        if let Some(export_file) = export_file {
            paths.export_file = export_file;
        }
        let session = AnnotatorApp::start_session(&config, &paths, 0).unwrap();

        AnnotatorApp {
            config,
            settings: Settings::default(),
            settings_path: Some(dir.path().join("settings.json")),
            session: Some(session),
            paths: Some(paths),
            load_error: None,
            thumbnails: ThumbnailCache::new(),
            ui: UIState::new(),
            notifications: Notifications::new(),
        }
    }

    fn last_kind(app: &AnnotatorApp) -> Option<NotificationKind> {
        app.notifications.items().last().map(|n| n.kind)
    }

    #[test]
    fn test_commit_autosaves_export() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir, None);
        let export_file = dir.path().join("final_annotations.csv");

        app.set_label(&SlotKey::new("s1", "match_img1_x"), Label::Positive);
        app.commit_page();

        assert!(export_file.exists());
        let saved = load_prior_annotations(&export_file).unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved.contains("s1", "a.jpg"));
        assert_eq!(last_kind(&app), Some(NotificationKind::Success));
    }

    #[test]
    fn test_autosave_failure_keeps_merged_record() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let mut app = app_in(&dir, Some(blocker.join("final_annotations.csv")));

        app.set_label(&SlotKey::new("s1", "match_img1_x"), Label::Negative);
        app.commit_page();

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.store().len(), 1);
        assert!(session.store().contains("s1", "a.jpg"));
        assert_eq!(last_kind(&app), Some(NotificationKind::Error));
    }

    #[test]
    fn test_commit_without_choices_skips_autosave() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir, None);

        app.commit_page();

        assert!(!dir.path().join("final_annotations.csv").exists());
        assert!(app.session.as_ref().unwrap().store().is_empty());
    }

    #[test]
    fn test_export_of_empty_store_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir, None);

        app.export_all();

        assert!(!dir.path().join("final_annotations.csv").exists());
        assert_eq!(last_kind(&app), Some(NotificationKind::Warning));
    }

    #[test]
    fn test_jump_to_first_and_last_persist_index() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir, None);
        let settings_path = dir.path().join("settings.json");

        app.jump_to_last();
        assert_eq!(app.session.as_ref().unwrap().cursor(), 2);
        assert_eq!(Settings::load_from(&settings_path).last_song_index, 2);

        app.jump_to_first();
        assert_eq!(app.session.as_ref().unwrap().cursor(), 0);
        assert_eq!(Settings::load_from(&settings_path).last_song_index, 0);
    }

    #[test]
    fn test_jump_to_position_rejects_out_of_range() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir, None);

        assert!(!app.jump_to_position(0));
        assert!(!app.jump_to_position(4));
        assert!(app.jump_to_position(2));
        assert_eq!(app.session.as_ref().unwrap().cursor(), 1);
    }

    #[test]
    fn test_resume_index_only_applies_to_saved_dataset() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::default();
        let saved = dir.path().join("music_image_combined.csv");
        let mut settings = Settings {
            last_dataset_path: Some(dir.path().join("moved_away.csv")),
            last_song_index: 7,
            ..Settings::default()
        };

        assert_eq!(
            startup_target(&settings, &config),
            (config.default_dataset_path.clone(), 0)
        );

        fs::write(&saved, DATASET).unwrap();
        settings.last_dataset_path = Some(saved.clone());
        assert_eq!(startup_target(&settings, &config), (saved, 7));
    }

    #[test]
    fn test_window_size_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir, None);

        app.remember_window_size(1024.0, 768.0);
        app.remember_window_size(0.0, 0.0);
        app.save_settings();

        let restored = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(restored.window_width, 1024.0);
        assert_eq!(restored.window_height, 768.0);
    }
}
