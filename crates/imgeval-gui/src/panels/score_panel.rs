use imgeval_core::panel::{slider_marks, PanelAction};

use crate::app::ImgEvalApp;
use crate::panels::to_point;

const PANEL_WIDTH: f32 = 260.0;

/// Floating scoring panel. Returns what the user asked for this frame.
pub fn show(ctx: &egui::Context, app: &mut ImgEvalApp) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    if !app.panel.is_visible() || app.session.selected_pair().is_none() {
        app.panel.end_drag();
        return actions;
    }
    // Focus loss or the pointer leaving the window also ends a drag.
    if ctx.input(|i| !i.focused || !i.pointer.has_pointer()) {
        app.panel.end_drag();
    }

    let pos = app.panel.position();
    egui::Area::new(egui::Id::new("score_panel"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(pos.x, pos.y))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(PANEL_WIDTH);
                drag_handle(ui, app);
                ui.separator();

                for axis in app.session.axes() {
                    let stored = app.session.score(&axis.id);
                    let mut value = stored.unwrap_or(0);

                    ui.horizontal(|ui| {
                        ui.strong(&axis.label);
                        if stored.is_none() {
                            ui.weak("(unset)");
                        }
                    });
                    let slider = ui.add(
                        egui::Slider::new(&mut value, axis.range())
                            .step_by(1.0)
                            .show_value(true),
                    );
                    if slider.changed() || (slider.clicked() && stored.is_none()) {
                        actions.push(PanelAction::ScoreChanged {
                            axis_id: axis.id.clone(),
                            value,
                        });
                    }

                    ui.horizontal(|ui| {
                        for mark in slider_marks(axis, stored) {
                            let text = egui::RichText::new(mark.glyph.symbol()).small();
                            let text = if mark.active { text.strong() } else { text.weak() };
                            ui.label(text)
                                .on_hover_text(format!("{:+}", mark.value));
                        }
                    });
                    ui.add_space(4.0);
                }

                ui.separator();
                let scored = app.session.scores().scored_pairs();
                ui.horizontal(|ui| {
                    ui.small(format!(
                        "{scored}/{} pairs scored",
                        app.session.pairs().len()
                    ));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(!app.ui_state.saving, egui::Button::new("Save"))
                            .clicked()
                        {
                            actions.push(PanelAction::Save);
                        }
                    });
                });
            });
        });

    actions
}

fn drag_handle(ui: &mut egui::Ui, app: &mut ImgEvalApp) {
    let handle = ui
        .horizontal(|ui| {
            let title = ui.add(
                egui::Label::new(egui::RichText::new("⠿ Scores").strong())
                    .sense(egui::Sense::drag()),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    app.panel.hide();
                }
            });
            title
        })
        .inner;

    let pointer = ui.input(|i| i.pointer.interact_pos());
    if handle.drag_started() {
        if let Some(p) = pointer {
            app.panel.begin_drag(to_point(p));
        }
    }
    if handle.dragged() {
        if let Some(p) = pointer {
            if app.panel.drag_to(to_point(p)) {
                ui.ctx().request_repaint();
            }
        }
    }
    if handle.drag_stopped() {
        app.panel.end_drag();
    }
    if handle.hovered() || app.panel.is_dragging() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
}
