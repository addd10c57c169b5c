use std::time::Instant;

use imgeval_core::diff;
use imgeval_core::loader::ImageSlot;
use imgeval_core::session::SlotState;
use imgeval_core::transform::ViewEvent;
use imgeval_core::viewport::{place, Pane, Size};

use crate::app::ImgEvalApp;
use crate::panels::{placeholder, to_point};

const PANE_GAP: f32 = 6.0;
const CAPTION_HEIGHT: f32 = 20.0;

pub fn show(ctx: &egui::Context, app: &mut ImgEvalApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if app.session.template_id().is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Pick a template to begin")
                        .size(18.0)
                        .color(egui::Color32::from_gray(100)),
                );
            });
            return;
        }
        if let Some(message) = app.session.detail_error() {
            let message = message.to_string();
            let mut retry = false;
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.colored_label(
                    egui::Color32::from_rgb(230, 110, 90),
                    format!("Failed to load template: {message}"),
                );
                ui.add_space(8.0);
                retry = ui.button("Retry").clicked();
            });
            if retry {
                if let Some(id) = app.session.template_id().map(str::to_string) {
                    app.open_template(&id);
                }
            }
            return;
        }
        if !app.session.is_detail_loaded() {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }
        if app.session.pairs().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("This template has no image pairs");
            });
            return;
        }

        controls_row(ui, app);
        ui.separator();
        panes(ui, app);
    });
}

fn controls_row(ui: &mut egui::Ui, app: &mut ImgEvalApp) {
    ui.horizontal(|ui| {
        let total = app.session.pairs().len();
        let selected = app.session.selected_index();
        let mut chosen = None;

        if ui
            .add_enabled(selected > 0, egui::Button::new("◀"))
            .clicked()
        {
            chosen = Some(selected - 1);
        }
        let current = app
            .session
            .selected_pair()
            .map(|p| p.a.clone())
            .unwrap_or_default();
        egui::ComboBox::from_id_salt("pair_select")
            .selected_text(format!("{}/{total}: {current}", selected + 1))
            .width(240.0)
            .show_ui(ui, |ui| {
                for (i, pair) in app.session.pairs().iter().enumerate() {
                    let text = format!("{}. {} | {}", i + 1, pair.a, pair.b);
                    if ui.selectable_label(i == selected, text).clicked() {
                        chosen = Some(i);
                    }
                }
            });
        if ui
            .add_enabled(selected + 1 < total, egui::Button::new("▶"))
            .clicked()
        {
            chosen = Some(selected + 1);
        }
        if let Some(index) = chosen {
            app.select_pair(index);
        }

        ui.separator();

        ui.label("Threshold");
        let threshold = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.threshold_input).desired_width(40.0),
        );
        if threshold.changed() {
            app.commit_threshold_input();
        }
        if threshold.lost_focus() {
            app.ui_state.threshold_input = app.session.threshold().to_string();
        }

        ui.separator();

        let flipped = app.session.transform().flipped();
        if ui
            .selectable_label(flipped, "⇄ Flip")
            .on_hover_text("Swap A and B between the left and right panes")
            .clicked()
        {
            app.session.apply_view_event(ViewEvent::ToggleFlip);
        }

        let levels = app.session.zoom_levels().as_slice().to_vec();
        let zoom_index = app.session.transform().zoom_index();
        let mut zoom_choice = None;
        egui::ComboBox::from_id_salt("zoom_select")
            .selected_text(format!("{:.0}%", app.session.zoom() * 100.0))
            .width(70.0)
            .show_ui(ui, |ui| {
                for (i, z) in levels.iter().enumerate() {
                    if ui
                        .selectable_label(i == zoom_index, format!("{:.0}%", z * 100.0))
                        .clicked()
                    {
                        zoom_choice = Some(i);
                    }
                }
            });
        if let Some(i) = zoom_choice {
            app.session.set_zoom_index(i);
        }

        ui.separator();

        if ui
            .selectable_label(app.panel.is_visible(), "Scores")
            .clicked()
        {
            app.panel.toggle();
        }
    });
}

fn panes(ui: &mut egui::Ui, app: &mut ImgEvalApp) {
    let area = ui.available_rect_before_wrap();
    let width = ((area.width() - 2.0 * PANE_GAP) / 3.0).max(1.0);
    let now = Instant::now();

    for pane in Pane::ALL {
        let left = area.left() + pane.index() as f32 * (width + PANE_GAP);
        let caption_rect = egui::Rect::from_min_size(
            egui::pos2(left, area.top()),
            egui::vec2(width, CAPTION_HEIGHT),
        );
        let rect = egui::Rect::from_min_max(
            egui::pos2(left, area.top() + CAPTION_HEIGHT),
            egui::pos2(left + width, area.bottom()),
        );
        draw_caption(ui, app, pane, caption_rect);
        draw_pane(ui, app, pane, rect, now);
    }

    ui.advance_cursor_after_rect(area);
}

fn draw_caption(ui: &egui::Ui, app: &ImgEvalApp, pane: Pane, rect: egui::Rect) {
    let flipped = app.session.transform().flipped();
    let text = match (pane, app.session.selected_pair()) {
        (Pane::Diff, _) => diff::caption(app.session.threshold(), app.viewport.legend.as_ref()),
        (Pane::Left | Pane::Right, Some(pair)) => {
            let filename = match pane.source(flipped) {
                ImageSlot::A => &pair.a,
                _ => &pair.b,
            };
            format!("{}: {filename}", pane.label(flipped))
        }
        (_, None) => pane.label(flipped).to_string(),
    };
    ui.painter().with_clip_rect(rect).text(
        rect.left_center(),
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(13.0),
        ui.visuals().text_color(),
    );
}

fn draw_pane(ui: &mut egui::Ui, app: &mut ImgEvalApp, pane: Pane, rect: egui::Rect, now: Instant) {
    let response = ui.interact(
        rect,
        ui.id().with(("pane", pane.index())),
        egui::Sense::click_and_drag(),
    );
    handle_input(ui, &response, app);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));

    let debouncer = &mut app.viewport.debouncers[pane.index()];
    debouncer.observe(Size::new(rect.width(), rect.height()), now);
    debouncer.poll(now);
    if let Some(remaining) = debouncer.remaining(now) {
        ui.ctx().request_repaint_after(remaining);
    }
    let container = debouncer
        .committed()
        .unwrap_or(Size::new(rect.width(), rect.height()));

    let slot = pane.source(app.session.transform().flipped());
    match app.viewport.texture(slot) {
        Some(texture) => {
            let size = texture.size_vec2();
            let placement = place(
                Size::new(size.x, size.y),
                app.session.zoom(),
                app.session.transform().pan(),
                container,
            );
            let img_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(placement.offset.x, placement.offset.y),
                egui::vec2(placement.size.width, placement.size.height),
            );
            painter.image(
                texture.id(),
                img_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            let text = match app.session.slot(slot) {
                SlotState::Loading => "Loading...".to_string(),
                SlotState::Failed(message) => format!("Failed to load: {message}"),
                SlotState::Ready(_) => "Waiting for the other images...".to_string(),
                SlotState::Empty => String::new(),
            };
            placeholder(ui, rect, &text);
        }
    }
}

/// Translate pointer input on a pane into transform events.
fn handle_input(ui: &egui::Ui, response: &egui::Response, app: &mut ImgEvalApp) {
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.session.apply_view_event(ViewEvent::PointerDown(to_point(pos)));
        }
    }
    if response.dragged() {
        if !response.contains_pointer() {
            app.session.apply_view_event(ViewEvent::PointerLeave);
        } else if let Some(pos) = response.interact_pointer_pos() {
            app.session.apply_view_event(ViewEvent::PointerMove(to_point(pos)));
        }
    }
    if response.drag_stopped() {
        app.session.apply_view_event(ViewEvent::PointerUp);
    }

    if response.hovered() {
        // egui reports scroll-up as positive; the transform expects wheel deltas.
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            app.session
                .apply_view_event(ViewEvent::Wheel { delta_y: -scroll });
        }
    }
}
