use std::sync::{mpsc, Arc};

use chrono::Utc;
use imgeval_core::api::{Backend, HttpBackend};
use imgeval_core::config::AppConfig;
use imgeval_core::diff;
use imgeval_core::loader::{ImageSlot, LoadBatch};
use imgeval_core::panel::{PanelAction, ScorePanel};
use imgeval_core::session::Session;

use crate::convert::bitmap_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::workers;

pub struct ImgEvalApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub backend: Arc<dyn Backend>,
    pub config: AppConfig,
    pub session: Session,
    pub panel: ScorePanel,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
    ctx: egui::Context,
}

impl ImgEvalApp {
    pub fn new(ctx: &egui::Context, config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(Arc::clone(&backend), result_tx.clone(), ctx.clone());

        let session = Session::new(config.render_policy, config.threshold());
        let ui_state = UIState {
            threshold_input: session.threshold().to_string(),
            loading_catalog: true,
            ..UIState::default()
        };

        let app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            backend,
            viewport: ViewportState::new(config.resize_debounce()),
            config,
            session,
            panel: ScorePanel::new(),
            ui_state,
            show_about: false,
            ctx: ctx.clone(),
        };
        app.send_command(WorkerCommand::FetchZoomLevels);
        app.send_command(WorkerCommand::FetchCatalog);
        app
    }

    /// Drain all pending results from the workers.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::CatalogLoaded { catalog } => {
                    self.ui_state.loading_catalog = false;
                    self.ui_state.catalog_progress = None;
                    self.ui_state.catalog_error = if catalog.is_empty() {
                        Some("No templates found".into())
                    } else {
                        None
                    };
                    self.ui_state.page = 1;
                    self.ui_state.catalog = Some(catalog);
                }
                WorkerResult::CatalogFailed { message } => {
                    self.ui_state.loading_catalog = false;
                    self.ui_state.catalog_progress = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.ui_state.catalog_error = Some(message);
                }
                WorkerResult::CatalogProgress { done, total } => {
                    self.ui_state.catalog_progress = Some((done, total));
                }
                WorkerResult::Detail {
                    template_id,
                    detail,
                } => {
                    if let Some(batch) = self.session.apply_detail(&template_id, detail) {
                        self.start_loads(batch);
                    }
                }
                WorkerResult::DetailFailed {
                    template_id,
                    message,
                } => {
                    if self.session.detail_failed(&template_id, message.clone()) {
                        self.ui_state
                            .add_log(format!("ERROR: template {template_id}: {message}"));
                    }
                }
                WorkerResult::PriorScores {
                    template_id,
                    results,
                } => {
                    self.session.offer_prior(&template_id, results);
                }
                WorkerResult::ZoomLevels { levels } => {
                    if levels.is_none() {
                        self.ui_state
                            .add_log("Zoom levels unavailable, using defaults".into());
                    }
                    self.session.set_zoom_levels(levels);
                }
                WorkerResult::ImageLoaded(completion) => {
                    let slot = completion.slot;
                    if completion.epoch == self.session.epoch() {
                        if let Err(ref e) = completion.result {
                            self.ui_state.add_log(format!("ERROR: image {slot}: {e}"));
                        }
                    }
                    for slot in self.session.accept(completion) {
                        self.refresh_texture(slot);
                    }
                }
                WorkerResult::Saved { template_id, pairs } => {
                    self.ui_state.saving = false;
                    self.ui_state.add_log(format!(
                        "Saved scores for {pairs} images of template {template_id}"
                    ));
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.saving = false;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Upload (or drop) the texture for a slot the session says changed.
    fn refresh_texture(&mut self, slot: ImageSlot) {
        let Some(bitmap) = self.session.displayed_bitmap(slot) else {
            self.viewport.clear(slot);
            return;
        };
        let image = bitmap_to_color_image(bitmap);
        let texture = self.ctx.load_texture(
            format!("slot-{slot}"),
            image,
            egui::TextureOptions::NEAREST,
        );
        if slot == ImageSlot::Diff {
            self.viewport.legend = Some(diff::legend(bitmap));
        }
        self.viewport.textures[slot.index()] = Some(texture);
    }

    pub fn start_loads(&mut self, batch: LoadBatch) {
        for slot in batch.slots() {
            self.viewport.clear(slot);
        }
        workers::start_batch(Arc::clone(&self.backend), batch, &self.result_tx, &self.ctx);
    }

    pub fn open_template(&mut self, template_id: &str) {
        self.session.open_template(template_id);
        self.viewport.clear_all();
        self.ui_state.add_log(format!("Opening template {template_id}"));
        self.send_command(WorkerCommand::FetchDetail {
            template_id: template_id.to_string(),
        });
        self.send_command(WorkerCommand::FetchPrior {
            template_id: template_id.to_string(),
            user_id: self.config.user_id.clone(),
        });
    }

    pub fn select_pair(&mut self, index: usize) {
        match self.session.select(index) {
            Ok(Some(batch)) => self.start_loads(batch),
            Ok(None) => {}
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    /// Push the threshold text field into the session if it parses.
    pub fn commit_threshold_input(&mut self) {
        let Ok(value) = self.ui_state.threshold_input.trim().parse::<i64>() else {
            return;
        };
        if let Some(batch) = self.session.set_threshold(value) {
            self.start_loads(batch);
        }
    }

    pub fn refresh_catalog(&mut self) {
        if self.ui_state.loading_catalog {
            return;
        }
        self.ui_state.loading_catalog = true;
        self.ui_state.catalog_error = None;
        self.send_command(WorkerCommand::FetchCatalog);
    }

    pub fn save_scores(&mut self) {
        match self.session.save_payload(&self.config.user_id, Utc::now()) {
            Ok(record) => {
                self.ui_state.saving = true;
                self.send_command(WorkerCommand::Save { record });
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn handle_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::ScoreChanged { axis_id, value } => {
                if let Err(e) = self.session.set_score(&axis_id, value) {
                    self.ui_state.add_log(format!("ERROR: {e}"));
                }
            }
            PanelAction::Save => self.save_scores(),
        }
    }

    /// Adopt an imported config: new backend, user and render policy.
    pub fn apply_config(&mut self, config: AppConfig) {
        match HttpBackend::from_config(&config) {
            Ok(backend) => {
                let backend: Arc<dyn Backend> = Arc::new(backend);
                self.backend = Arc::clone(&backend);
                self.send_command(WorkerCommand::UseBackend { backend });
            }
            Err(e) => {
                self.ui_state
                    .add_log(format!("ERROR: config not applied, bad API URL: {e}"));
                return;
            }
        }
        self.session.set_policy(config.render_policy);
        self.viewport = ViewportState::new(config.resize_debounce());
        for slot in ImageSlot::ALL {
            self.refresh_texture(slot);
        }

        if config.default_threshold != self.config.default_threshold {
            self.ui_state.threshold_input = config.default_threshold.to_string();
            if let Some(batch) = self
                .session
                .set_threshold(i64::from(config.default_threshold))
            {
                self.start_loads(batch);
            }
        }
        if config.user_id != self.config.user_id {
            if let Some(template_id) = self.session.reset_prior().map(str::to_string) {
                self.send_command(WorkerCommand::FetchPrior {
                    template_id,
                    user_id: config.user_id.clone(),
                });
            }
        }
        self.ui_state
            .add_log(format!("Config applied (API {})", config.api_url));
        self.config = config;
        self.refresh_catalog();
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for ImgEvalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::browser::show(ctx, self);
        panels::compare::show(ctx, self);

        for action in panels::score_panel::show(ctx, self) {
            self.handle_panel_action(action);
        }
        panels::confirm::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Image Evaluation")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Image Evaluation");
                        ui.label("Side-by-side A/B image comparison and scoring");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
