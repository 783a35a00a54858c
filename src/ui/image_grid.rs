use std::collections::HashMap;

use eframe::egui::{self, Color32, Vec2};
use egui_phosphor::regular as Icon;

use crate::config::AppConfig;
use crate::core::annotation::{Label, Verdict};
use crate::core::session::{ImageSlot, PageSection, SlotKey};
use crate::state::{Thumbnail, ThumbnailCache};

const CELL_SPACING: f32 = 8.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 90, 90);

/// Scale that fits an image inside `available_size` without upscaling
pub fn calculate_image_scale(img_size: Vec2, available_size: Vec2) -> f32 {
    if img_size.x <= 0.0 || img_size.y <= 0.0 {
        return 1.0;
    }
    (available_size.x / img_size.x)
        .min(available_size.y / img_size.y)
        .min(1.0)
}

/// Width of one grid cell when `per_row` cells share `available_width`
pub fn cell_width(available_width: f32, per_row: usize) -> f32 {
    let per_row = per_row.max(1) as f32;
    ((available_width - CELL_SPACING * (per_row - 1.0)) / per_row).max(40.0)
}

/// Render one group of images in rows, queueing label changes into `changes`.
///
/// `saved` holds verdicts already in the store for this page's slots; they
/// are shown as a hint next to the control and never change it.
pub fn render_section(
    ui: &mut egui::Ui,
    section: &PageSection,
    thumbnails: &mut ThumbnailCache,
    config: &AppConfig,
    saved: &HashMap<SlotKey, Verdict>,
    changes: &mut Vec<(SlotKey, Label)>,
) {
    let width = cell_width(ui.available_width(), config.images_per_row);

    for row in section.rows(config.images_per_row) {
        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = CELL_SPACING;
            for slot in row {
                ui.push_id(slot.key.widget_id(), |ui| {
                    ui.vertical(|ui| {
                        ui.set_width(width);
                        render_slot(ui, slot, width, thumbnails, config, saved.get(&slot.key), changes);
                    });
                });
            }
        });
        ui.add_space(CELL_SPACING);
    }
}

fn render_slot(
    ui: &mut egui::Ui,
    slot: &ImageSlot,
    width: f32,
    thumbnails: &mut ThumbnailCache,
    config: &AppConfig,
    saved: Option<&Verdict>,
    changes: &mut Vec<(SlotKey, Label)>,
) {
    if let Some(warning) = slot.warning() {
        ui.label(egui::RichText::new(format!("{} {}", Icon::WARNING, warning)).color(ERROR_COLOR));
        return;
    }

    match thumbnails.get_or_load(ui.ctx(), &slot.path, config.thumbnail_edge) {
        Thumbnail::Ready(texture) => {
            let img_size = texture.size_vec2();
            let scale = calculate_image_scale(img_size, egui::vec2(width, width));
            ui.add(egui::Image::new((texture.id(), img_size * scale)));
        }
        Thumbnail::Failed(message) => {
            ui.label(egui::RichText::new(format!("{} {}", Icon::WARNING, message)).color(ERROR_COLOR));
        }
    }

    ui.label(egui::RichText::new(&slot.image_id).small().weak());

    ui.horizontal_wrapped(|ui| {
        for label in Label::ALL {
            if ui.radio(slot.label == label, label.display_name()).clicked() && slot.label != label {
                changes.push((slot.key.clone(), label));
            }
        }
    });

    if let Some(verdict) = saved {
        ui.label(
            egui::RichText::new(format!(
                "{} saved: {}",
                Icon::CHECK,
                Label::from(*verdict).display_name()
            ))
            .small()
            .color(Color32::from_rgb(100, 200, 120)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_scale_never_upscales() {
        let scale = calculate_image_scale(egui::vec2(100.0, 50.0), egui::vec2(400.0, 400.0));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_image_scale_fits_longest_side() {
        let scale = calculate_image_scale(egui::vec2(800.0, 400.0), egui::vec2(200.0, 200.0));
        assert_eq!(scale, 0.25);

        let scale = calculate_image_scale(egui::vec2(300.0, 600.0), egui::vec2(200.0, 200.0));
        assert!((scale - 1.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cell_width_splits_row() {
        assert_eq!(cell_width(1032.0, 5), 200.0);
        assert_eq!(cell_width(100.0, 0), 100.0);
        assert_eq!(cell_width(10.0, 5), 40.0);
    }
}
