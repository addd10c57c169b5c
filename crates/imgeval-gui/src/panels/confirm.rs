use crate::app::ImgEvalApp;

/// Ask whether previously saved scores should be loaded.
pub fn show(ctx: &egui::Context, app: &mut ImgEvalApp) {
    if !app.session.is_detail_loaded() {
        return;
    }
    let Some(pending) = app.session.pending_prior() else {
        return;
    };
    let saved = pending.len();

    let mut answer = None;
    egui::Window::new("Saved scores found")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "You saved scores for {saved} images of this template earlier."
            ));
            ui.label("Load them? Declining starts from an empty score sheet.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Load").clicked() {
                    answer = Some(true);
                }
                if ui.button("Start fresh").clicked() {
                    answer = Some(false);
                }
            });
        });

    match answer {
        Some(true) => {
            let hydrated = app.session.confirm_prior();
            app.ui_state
                .add_log(format!("Loaded saved scores for {hydrated} pairs"));
        }
        Some(false) => {
            app.session.decline_prior();
            app.ui_state.add_log("Saved scores discarded".into());
        }
        None => {}
    }
}
