use chrono::Utc;
use imgeval_core::config::AppConfig;
use imgeval_core::transform::ViewEvent;

use crate::app::ImgEvalApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut ImgEvalApp) {
    let refresh_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::R);
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(
                        egui::Button::new("Refresh Templates")
                            .shortcut_text(ctx.format_shortcut(&refresh_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.refresh_catalog();
                }

                let can_save = app.session.template_id().is_some() && !app.ui_state.saving;
                if ui
                    .add_enabled(
                        can_save,
                        egui::Button::new("Save Scores")
                            .shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.save_scores();
                }

                if ui
                    .add_enabled(
                        app.session.template_id().is_some(),
                        egui::Button::new("Export Scores..."),
                    )
                    .clicked()
                {
                    ui.close();
                    export_scores(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Scoring Panel").clicked() {
                    ui.close();
                    app.panel.toggle();
                }
                if ui.button("Flip A/B").clicked() {
                    ui.close();
                    app.session.apply_view_event(ViewEvent::ToggleFlip);
                }
                if ui.button("Reset Zoom").clicked() {
                    ui.close();
                    let index = app.session.zoom_levels().default_index();
                    app.session.set_zoom_index(index);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Config").clicked() {
                    ui.close();
                    app.apply_config(AppConfig::default());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&refresh_shortcut)) {
            app.refresh_catalog();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) && !app.ui_state.saving {
            app.save_scores();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn export_scores(app: &mut ImgEvalApp) {
    let record = match app.session.save_payload(&app.config.user_id, Utc::now()) {
        Ok(record) => record,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };
    let result_tx = app.result_tx.clone();
    let file_name = format!("evaluation_{}.json", record.template_id);

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return;
        };
        let written = serde_json::to_string_pretty(&record)
            .map_err(|e| e.to_string())
            .and_then(|text| std::fs::write(&path, text).map_err(|e| e.to_string()));
        let message = match written {
            Ok(()) => WorkerResult::Log {
                message: format!("Exported scores to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Export failed: {e}"),
            },
        };
        let _ = result_tx.send(message);
    });
}

fn import_config(app: &mut ImgEvalApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let message = match AppConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Import config {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(message);
    });
}

fn export_config(app: &mut ImgEvalApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("imgeval.toml")
            .save_file()
        {
            if let Err(e) = config.save(&path) {
                let _ = result_tx.send(WorkerResult::Error {
                    message: format!("Export config {}: {e}", path.display()),
                });
            }
        }
    });
}
