use crate::app::ImgEvalApp;

pub fn show(ctx: &egui::Context, app: &mut ImgEvalApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        if msg.starts_with("ERROR") {
                            ui.colored_label(egui::Color32::from_rgb(230, 110, 90), msg);
                        } else {
                            ui.label(msg);
                        }
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let session = &app.session;
            if let Some(id) = session.template_id() {
                ui.label(format!("Template: {id}"));
                ui.separator();
            }
            if !session.pairs().is_empty() {
                ui.label(format!(
                    "Pair {}/{}",
                    session.selected_index() + 1,
                    session.pairs().len()
                ));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", session.zoom() * 100.0));
            ui.separator();
            ui.label(format!("Threshold: {}", session.threshold()));
            ui.separator();
            ui.label(format!("Render: {}", session.policy()));
            ui.separator();
            ui.label(format!("User: {}", app.config.user_id));
            if app.ui_state.saving {
                ui.separator();
                ui.spinner();
                ui.label("Saving...");
            }
        });

        ui.add_space(2.0);
    });
}
