mod app_state;
mod settings;

pub use app_state::{NotificationKind, Notifications, Thumbnail, ThumbnailCache, UIState};
pub use settings::Settings;
