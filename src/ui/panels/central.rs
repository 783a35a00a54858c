use std::collections::HashMap;
use std::path::Path;

use crate::app::AnnotatorApp;
use crate::core::annotation::{AnnotationStore, Label, Verdict};
use crate::core::session::{Page, SlotKey};
use crate::ui::image_grid;
use eframe::egui;
use egui_phosphor::regular as Icon;

const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 180, 60);

/// Render the central panel with the current song and its candidate images
pub fn render_central_panel(app: &mut AnnotatorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(session) = app.session.as_ref() else {
            render_empty_state(ui, app.load_error.as_deref());
            return;
        };

        // Render from a snapshot so label events can be applied afterwards
        let page = session.page().clone();
        let saved = saved_verdicts(&page, session.store());
        let saved_for_song = session.store().count_for_song(&page.song_id);
        let audio_root = session.media().audio_root().to_path_buf();
        let mut changes: Vec<(SlotKey, Label)> = Vec::new();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                render_song_header(ui, &page, saved_for_song, &audio_root);

                if app.ui.show_instructions {
                    ui.add_space(8.0);
                    render_instructions(ui);
                }

                for section in &page.sections {
                    ui.add_space(16.0);
                    ui.separator();
                    ui.heading(section.group.title());
                    ui.add_space(6.0);

                    if section.is_empty() {
                        ui.label(egui::RichText::new("No candidate images for this song").weak());
                        continue;
                    }

                    image_grid::render_section(
                        ui,
                        section,
                        &mut app.thumbnails,
                        &app.config,
                        &saved,
                        &mut changes,
                    );
                }
            });

        // Handle label events outside of the borrow
        for (key, label) in changes {
            app.set_label(&key, label);
        }
    });
}

fn saved_verdicts(page: &Page, store: &AnnotationStore) -> HashMap<SlotKey, Verdict> {
    page.slots()
        .filter_map(|slot| {
            store
                .get(&page.song_id, &slot.image_id)
                .map(|record| (slot.key.clone(), record.verdict))
        })
        .collect()
}

fn render_empty_state(ui: &mut egui::Ui, load_error: Option<&str>) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            match load_error {
                Some(error) => {
                    ui.label(
                        egui::RichText::new(format!("{} Could not load dataset", Icon::WARNING))
                            .size(24.0)
                            .color(egui::Color32::from_rgb(220, 90, 90))
                            .strong(),
                    );
                    ui.add_space(10.0);
                    ui.label(egui::RichText::new(error).color(egui::Color32::GRAY));
                }
                None => {
                    ui.heading("No dataset loaded. Click 'Open Dataset' to begin.");
                }
            }
        });
    });
}

fn render_song_header(ui: &mut egui::Ui, page: &Page, saved_for_song: usize, audio_root: &Path) {
    ui.horizontal(|ui| {
        ui.heading(format!("{}. {}", page.position(), page.song_id));
        ui.add_space(12.0);
        if saved_for_song > 0 {
            ui.label(
                egui::RichText::new(format!("{} {} saved for this song", Icon::CHECK, saved_for_song))
                    .color(egui::Color32::from_rgb(100, 200, 120)),
            );
        }
    });

    match &page.audio {
        Some(path) => {
            ui.label(format!("{} {}", Icon::SPEAKER_HIGH, path.display()));
        }
        None => {
            if let Some(warning) = page.warnings().first() {
                ui.label(
                    egui::RichText::new(format!("{} {}", Icon::WARNING, warning)).color(WARNING_COLOR),
                )
                .on_hover_text(format!("Searched under {}", audio_root.display()));
            }
        }
    }
}

fn render_instructions(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(egui::RichText::new(format!("{} How to label", Icon::INFO)).strong());
        ui.label("1. Listen to the song, then mark each image Yes or No. Leave Neutral to skip it.");
        ui.label("2. Press 'Save current page' (Ctrl+S) before moving on. Unsaved choices are dropped on navigation.");
        ui.label("3. Images already saved for a song keep their first answer. Saving them again changes nothing.");
        ui.label("4. Export (Ctrl+E) writes every saved annotation to the CSV next to the dataset.");
    });
}
