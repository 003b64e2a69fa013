use std::sync::mpsc;
use std::sync::Arc;

use dentview_core::canvas::RasterCanvas;
use dentview_core::config::RenderConfig;
use dentview_core::detection::Detection;
use dentview_core::font::resolve_font;
use dentview_core::render::{AnnotatedViewport, PassOutcome};
use dentview_core::source::{ImageRef, SourceImage};
use image::RgbaImage;

use crate::convert::{bundled_label_font, surface_to_color_image};
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{BusyTask, UIState, ViewportState};
use crate::workers;

pub struct DentviewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: RenderConfig,
    pub renderer: AnnotatedViewport<RasterCanvas>,
    pub show_about: bool,
}

impl DentviewApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone());
        let config = RenderConfig::default();

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            renderer: build_renderer(&config),
            config,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { ticket, image } => {
                    let outcome = self
                        .renderer
                        .complete_load(ticket, Ok::<_, String>(image));
                    self.ui_state.finish_load(&outcome);
                    self.handle_outcome(ctx, outcome);
                }
                WorkerResult::ImageLoadFailed { ticket, message } => {
                    let outcome = self
                        .renderer
                        .complete_load(ticket, Err::<SourceImage<RgbaImage>, _>(&message));
                    if outcome == PassOutcome::LoadFailed {
                        self.ui_state.add_log(format!("ERROR: {message}"));
                    }
                    self.ui_state.finish_load(&outcome);
                    self.handle_outcome(ctx, outcome);
                }
                WorkerResult::ImagePicked { path } => {
                    self.ui_state.add_log(format!("Opened: {}", path.display()));
                    self.ui_state.image_id = None;
                    self.ui_state.report = None;
                    self.ui_state.detections_path = None;
                    self.ui_state.detections = Arc::from(Vec::new());

                    let sidecar = path.with_extension("json");
                    if sidecar.is_file() {
                        self.send_command(WorkerCommand::LoadDetections { path: sidecar });
                    }
                    self.ui_state.image_ref = Some(ImageRef::Path(path));
                    self.apply_inputs(ctx);
                }
                WorkerResult::DetectionsLoaded { path, detections } => {
                    self.ui_state.add_log(format!(
                        "{} detections from {}",
                        detections.len(),
                        path.display()
                    ));
                    self.ui_state.detections_path = Some(path);
                    self.set_detections(ctx, detections);
                }
                WorkerResult::AnalysisComplete { analysis } => {
                    self.ui_state.finish(BusyTask::Analyzing);
                    self.ui_state.add_log(format!(
                        "Analysis {}: {} detections",
                        analysis.image_id,
                        analysis.detections.len()
                    ));
                    self.ui_state.image_id = Some(analysis.image_id);
                    self.ui_state.report = None;
                    self.ui_state.detections_path = None;
                    self.ui_state.image_ref = Some(analysis.image_ref);
                    self.set_detections(ctx, analysis.detections);
                }
                WorkerResult::ReportReady { report } => {
                    self.ui_state.finish(BusyTask::Reporting);
                    self.ui_state.add_log("Report received".into());
                    self.ui_state.report = Some(report);
                }
                WorkerResult::ConfigImported { config } => {
                    self.ui_state.add_log("Render config imported".into());
                    self.replace_config(ctx, *config);
                }
                WorkerResult::CompositeSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.busy = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn set_detections(&mut self, ctx: &egui::Context, detections: Arc<[Detection]>) {
        self.ui_state.detections = detections;
        self.apply_inputs(ctx);
    }

    /// Feed the current inputs to the renderer.
    pub fn apply_inputs(&mut self, ctx: &egui::Context) {
        let outcome = self.renderer.set_inputs(
            self.ui_state.image_ref.clone(),
            self.ui_state.detections.clone(),
        );
        self.handle_outcome(ctx, outcome);
    }

    fn handle_outcome(&mut self, ctx: &egui::Context, outcome: PassOutcome) {
        match outcome {
            PassOutcome::LoadRequested(ticket) => {
                self.ui_state.busy = Some(BusyTask::LoadingImage);
                self.send_command(WorkerCommand::LoadImage { ticket });
            }
            PassOutcome::Rendered(summary) => {
                tracing::debug!(
                    scale = summary.transform.scale,
                    overlays = summary.overlays,
                    "pass rendered"
                );
                self.upload_surface(ctx);
            }
            PassOutcome::Skipped(reason) => {
                tracing::debug!(?reason, "pass skipped");
            }
            PassOutcome::Stale => tracing::debug!("stale image load discarded"),
            PassOutcome::LoadFailed | PassOutcome::Unchanged | PassOutcome::AwaitingLoad => {}
        }
    }

    fn upload_surface(&mut self, ctx: &egui::Context) {
        let image = surface_to_color_image(self.renderer.canvas().surface());
        let texture = ctx.load_texture("viewport", image, egui::TextureOptions::LINEAR);
        self.viewport.texture = Some(texture);
        self.viewport.uploaded_pass = self.renderer.passes();
    }

    /// Swap in a new config. The fresh renderer has no cached image, so the
    /// current inputs are loaded and drawn again.
    pub fn replace_config(&mut self, ctx: &egui::Context, config: RenderConfig) {
        let config = match config.viewport.validated() {
            Ok(_) => config,
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                return;
            }
        };
        self.renderer = build_renderer(&config);
        self.config = config;
        self.viewport.texture = None;
        self.apply_inputs(ctx);
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

fn build_renderer(config: &RenderConfig) -> AnnotatedViewport<RasterCanvas> {
    let font = resolve_font(&config.style.font).or_else(|| {
        tracing::info!("no system label font found, using the bundled UI font");
        bundled_label_font()
    });
    let canvas = RasterCanvas::with_font(config.viewport, font, config.style.font.size);
    AnnotatedViewport::from_config(canvas, config)
}

impl eframe::App for DentviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Dentview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Dentview");
                        ui.label("Annotated Dental Radiographs");
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
