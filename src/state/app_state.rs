use eframe::egui::{self, ColorImage, TextureHandle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Decoded image for one slot, or the reason it could not be shown
pub enum Thumbnail {
    Ready(TextureHandle),
    Failed(String),
}

/// Thumbnails of the current page, keyed by image path.
///
/// Cleared on every page change so memory stays bounded by one page.
#[derive(Default)]
pub struct ThumbnailCache {
    entries: HashMap<PathBuf, Thumbnail>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached thumbnail for `path`, decoding it on first use
    pub fn get_or_load(&mut self, ctx: &egui::Context, path: &Path, max_edge: u32) -> &Thumbnail {
        self.entries
            .entry(path.to_path_buf())
            .or_insert_with(|| load_thumbnail(ctx, path, max_edge))
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("Dropping {} cached thumbnails", self.entries.len());
        }
        self.entries.clear();
    }
}

fn load_thumbnail(ctx: &egui::Context, path: &Path, max_edge: u32) -> Thumbnail {
    match image::open(path) {
        Ok(img) => {
            let img = if img.width() > max_edge || img.height() > max_edge {
                img.thumbnail(max_edge, max_edge)
            } else {
                img
            };
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());

            let texture = ctx.load_texture(
                path.to_string_lossy(),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            Thumbnail::Ready(texture)
        }
        Err(e) => {
            error!("{:?}: failed to decode image: {}", path, e);
            Thumbnail::Failed(format!("Failed to load image: {}", e))
        }
    }
}

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

/// Newest-last queue of transient messages shown in the corner of the window
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    const MAX_VISIBLE: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.items.push(Notification {
            kind,
            message: message.into(),
            created_at: Instant::now(),
        });
        if self.items.len() > Self::MAX_VISIBLE {
            let overflow = self.items.len() - Self::MAX_VISIBLE;
            self.items.drain(..overflow);
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    /// Drop notifications older than `ttl`. Errors stay until dismissed.
    pub fn prune(&mut self, ttl: Duration) {
        self.items.retain(|n| {
            n.kind == NotificationKind::Error || n.created_at.elapsed() < ttl
        });
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// UI-related state for dialogs, modes, and user input
pub struct UIState {
    /// Manual song number input field content
    pub manual_index_input: String,
    pub show_instructions: bool,
    pub show_records_panel: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            manual_index_input: String::from("1"),
            show_instructions: true,
            show_records_panel: true,
        }
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}
