use crate::app::AnnotatorApp;
use eframe::egui;
use tracing::debug;

/// Handle keyboard shortcuts for navigation, commit and export.
/// Arrows step one song, Home/End jump to the first/last song.
pub fn handle_keyboard_shortcuts(app: &mut AnnotatorApp, ctx: &egui::Context) {
    if app.session.is_none() {
        return;
    }

    // Arrow keys belong to the position box while it is being edited
    if ctx.wants_keyboard_input() {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
        debug!("[KEYBOARD] Right arrow pressed");
        app.next_song();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
        debug!("[KEYBOARD] Left arrow pressed");
        app.prev_song();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Home)) {
        debug!("[KEYBOARD] Home pressed");
        app.jump_to_first();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::End)) {
        debug!("[KEYBOARD] End pressed");
        app.jump_to_last();
    }
    if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::S)) {
        debug!("[KEYBOARD] Commit shortcut pressed");
        app.commit_page();
    }
    if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::E)) {
        debug!("[KEYBOARD] Export shortcut pressed");
        app.export_all();
    }
}
