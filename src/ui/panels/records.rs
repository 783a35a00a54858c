use crate::app::AnnotatorApp;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular as Icon;

use crate::core::annotation::Label;

const ROW_HEIGHT: f32 = 18.0;

/// Render the right side panel listing every saved annotation
pub fn render_records_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let records = session.store().records();
    let current_song = session.page().song_id.as_str();

    egui::SidePanel::right("records_panel")
        .default_width(app.config.side_panel_width)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading(format!("{} Saved Annotations", Icon::TABLE));
            ui.label(
                egui::RichText::new(format!("{} records", records.len()))
                    .small()
                    .weak(),
            );
            ui.add_space(6.0);
            ui.separator();

            if records.is_empty() {
                ui.add_space(10.0);
                ui.label(egui::RichText::new("Nothing saved yet").weak());
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(70.0))
                .column(Column::remainder().at_least(90.0).clip(true))
                .column(Column::auto().at_least(60.0))
                .column(Column::auto().at_least(40.0))
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Song");
                    });
                    header.col(|ui| {
                        ui.strong("Image");
                    });
                    header.col(|ui| {
                        ui.strong("Group");
                    });
                    header.col(|ui| {
                        ui.strong("Label");
                    });
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, records.len(), |mut row| {
                        let record = &records[row.index()];
                        row.set_selected(record.song_id == current_song);

                        row.col(|ui| {
                            ui.label(&record.song_id);
                        });
                        row.col(|ui| {
                            ui.label(&record.image_id);
                        });
                        row.col(|ui| {
                            ui.label(record.group.as_str());
                        });
                        row.col(|ui| {
                            ui.label(Label::from(record.verdict).display_name());
                        });
                    });
                });
        });
}
