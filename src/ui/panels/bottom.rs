use crate::app::AnnotatorApp;
use crate::core::session::PageStatus;
use eframe::egui;
use egui_phosphor::regular as Icon;

/// Render the bottom panel with navigation, commit and export controls
pub fn render_bottom_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    let mut go_first = false;
    let mut go_prev = false;
    let mut go_next = false;
    let mut go_last = false;
    let mut commit = false;
    let mut export = false;
    let mut export_as = false;

    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.add_space(10.0);

            let Some(session) = app.session.as_ref() else {
                ui.label(egui::RichText::new("No dataset loaded").weak());
                return;
            };

            if ui
                .add_enabled(
                    !session.is_first(),
                    egui::Button::new(Icon::CARET_DOUBLE_LEFT),
                )
                .on_hover_text("First song (Home)")
                .clicked()
            {
                go_first = true;
            }

            if ui
                .add_enabled(
                    !session.is_first(),
                    egui::Button::new(format!("{} Previous", Icon::CARET_LEFT)),
                )
                .clicked()
            {
                go_prev = true;
            }

            if ui
                .add_enabled(
                    !session.is_last(),
                    egui::Button::new(format!("Next {}", Icon::CARET_RIGHT)),
                )
                .clicked()
            {
                go_next = true;
            }

            if ui
                .add_enabled(
                    !session.is_last(),
                    egui::Button::new(Icon::CARET_DOUBLE_RIGHT),
                )
                .on_hover_text("Last song (End)")
                .clicked()
            {
                go_last = true;
            }

            ui.add_space(20.0);

            let commit_btn = egui::Button::new(format!("{} Save current page", Icon::FLOPPY_DISK))
                .fill(egui::Color32::from_rgb(60, 130, 80));
            if ui.add(commit_btn).on_hover_text("Ctrl+S").clicked() {
                commit = true;
            }

            let export_btn = egui::Button::new(format!("{} Export", Icon::EXPORT))
                .fill(egui::Color32::from_rgb(70, 110, 180));
            if ui
                .add_enabled(!session.store().is_empty(), export_btn)
                .on_hover_text("Ctrl+E")
                .clicked()
            {
                export = true;
            }

            if ui
                .add_enabled(
                    !session.store().is_empty(),
                    egui::Button::new(format!("{} Export as...", Icon::DOWNLOAD_SIMPLE)),
                )
                .clicked()
            {
                export_as = true;
            }

            ui.add_space(20.0);

            let (icon, text, color) = match session.page().status {
                PageStatus::Viewing => (Icon::EYE, "Viewing".to_string(), egui::Color32::GRAY),
                PageStatus::Editing => (
                    Icon::PENCIL_SIMPLE,
                    format!("{} unsaved choices", session.uncommitted_choices()),
                    egui::Color32::from_rgb(230, 180, 60),
                ),
                PageStatus::Committed => (
                    Icon::CHECK_CIRCLE,
                    "Page saved".to_string(),
                    egui::Color32::from_rgb(100, 200, 120),
                ),
            };
            ui.label(egui::RichText::new(format!("{} {}", icon, text)).color(color));

            if let Some(paths) = &app.paths {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", Icon::FILE, paths.dataset.display()))
                            .weak(),
                    );
                });
            }
        });
        ui.add_space(10.0);
    });

    // Handle actions outside of the borrow
    if go_first {
        app.jump_to_first();
    }
    if go_prev {
        app.prev_song();
    }
    if go_next {
        app.next_song();
    }
    if go_last {
        app.jump_to_last();
    }
    if commit {
        app.commit_page();
    }
    if export {
        app.export_all();
    }
    if export_as {
        app.export_as();
    }
}
