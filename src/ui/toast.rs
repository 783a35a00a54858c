use crate::app::AnnotatorApp;
use crate::state::NotificationKind;
use eframe::egui;
use egui_phosphor::regular as Icon;

fn style_for(kind: NotificationKind) -> (&'static str, egui::Color32) {
    match kind {
        NotificationKind::Success => (Icon::CHECK_CIRCLE, egui::Color32::from_rgb(100, 200, 120)),
        NotificationKind::Info => (Icon::INFO, egui::Color32::from_rgb(100, 149, 237)),
        NotificationKind::Warning => (Icon::WARNING, egui::Color32::from_rgb(230, 180, 60)),
        NotificationKind::Error => (Icon::X_CIRCLE, egui::Color32::from_rgb(220, 90, 90)),
    }
}

/// Render the stack of transient notifications in the bottom-left corner
pub fn render_notifications(app: &mut AnnotatorApp, ctx: &egui::Context) {
    if app.notifications.is_empty() {
        return;
    }

    let mut dismissed = None;

    egui::Window::new("notifications")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(20.0, -70.0))
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            ui.set_min_width(300.0);

            for (index, notification) in app.notifications.items().iter().enumerate() {
                let (icon, accent) = style_for(notification.kind);

                let frame = egui::Frame::none()
                    .fill(egui::Color32::from_rgb(45, 45, 48))
                    .stroke(egui::Stroke::new(1.0, accent))
                    .rounding(6.0)
                    .inner_margin(10.0);

                frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(icon).size(18.0).color(accent));
                        ui.label(
                            egui::RichText::new(&notification.message).color(egui::Color32::WHITE),
                        );
                        if ui.small_button(Icon::X).clicked() {
                            dismissed = Some(index);
                        }
                    });
                });
                ui.add_space(6.0);
            }
        });

    // Handle actions outside of the borrow
    if let Some(index) = dismissed {
        app.notifications.dismiss(index);
    }
}
