use crate::app::AnnotatorApp;
use eframe::egui;
use egui_phosphor::regular as Icon;

use super::helpers::handle_manual_index_input;

/// Render the top panel with dataset controls and the song position box
pub fn render_top_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading(format!("{} Music Image Annotator", Icon::MUSIC_NOTES));

            ui.add_space(20.0);

            if ui
                .button(format!("{} Open Dataset", Icon::FOLDER_OPEN))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .pick_file()
                {
                    app.open_dataset(path);
                }
            }

            ui.add_space(20.0);

            let Some((position, total, saved)) = app
                .session
                .as_ref()
                .map(|s| (s.page().position(), s.total(), s.store().len()))
            else {
                return;
            };

            ui.label("Song");
            let current_display = position.to_string();

            let response = ui.add(
                egui::TextEdit::singleline(&mut app.ui.manual_index_input).desired_width(60.0),
            );

            // Handle manual input when user presses Enter FIRST before syncing
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                let input = app.ui.manual_index_input.clone();
                handle_manual_index_input(app, &input, &current_display);
            }
            // Sync the input text with the cursor when not focused
            else if !response.has_focus() && app.ui.manual_index_input != current_display {
                app.ui.manual_index_input = current_display;
            }

            ui.label(format!("of {}", total));

            ui.add_space(20.0);
            ui.label(format!("{} {} saved annotations", Icon::DATABASE, saved));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.toggle_value(
                    &mut app.ui.show_records_panel,
                    format!("{} Records", Icon::TABLE),
                );
                ui.toggle_value(
                    &mut app.ui.show_instructions,
                    format!("{} Instructions", Icon::INFO),
                );
            });
        });
    });
}
