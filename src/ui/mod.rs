pub mod image_grid;
pub mod keyboard;
pub mod panels;
pub mod toast;

// Re-export commonly used functions
pub use panels::{
    render_bottom_panel,
    render_central_panel,
    render_records_panel,
    render_top_panel,
};

pub use keyboard::handle_keyboard_shortcuts;
pub use toast::render_notifications;
