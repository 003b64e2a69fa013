use dentview_core::config::RenderConfig;
use dentview_core::io::save_composite;

use crate::app::DentviewApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::state::BusyTask;

pub fn show(ctx: &egui::Context, app: &mut DentviewApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Radiograph...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_radiograph(app);
                }

                if ui.button("Open Detections...").clicked() {
                    ui.close();
                    open_detections(app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui.add(egui::Button::new("Save Composite...").shortcut_text(ctx.format_shortcut(&save_shortcut))).clicked() {
                    ui.close();
                    save_composite_as(app);
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

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Analysis", |ui| {
                if ui.add_enabled(can_analyze(app), egui::Button::new("Analyze")).clicked() {
                    ui.close();
                    start_analysis(app);
                }
                if ui.add_enabled(can_report(app), egui::Button::new("Generate Report")).clicked() {
                    ui.close();
                    start_report(app);
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
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_radiograph(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_composite_as(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_radiograph(app: &mut DentviewApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tif", "tiff"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = result_tx.send(WorkerResult::ImagePicked { path });
        }
    });
}

pub(crate) fn open_detections(app: &mut DentviewApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Detections JSON", &["json"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadDetections { path });
        }
    });
}

pub(crate) fn save_composite_as(app: &mut DentviewApp) {
    if app.viewport.texture.is_none() {
        app.ui_state.add_log("Nothing rendered yet".into());
        return;
    }
    let surface = app.renderer.canvas().surface().clone();
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("annotated.png")
            .save_file()
        {
            let result = match save_composite(&surface, &path) {
                Ok(()) => WorkerResult::CompositeSaved { path },
                Err(e) => WorkerResult::Error {
                    message: format!("Failed to save {}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
        }
    });
}

fn import_config(app: &mut DentviewApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result: Result<RenderConfig, String> = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        let _ = match result {
            Ok(config) => result_tx.send(WorkerResult::ConfigImported {
                config: Box::new(config),
            }),
            Err(e) => result_tx.send(WorkerResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            }),
        };
    });
}

fn export_config(app: &mut DentviewApp) {
    let config = app.config.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("dentview.toml")
            .save_file()
        {
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, content);
            }
        }
    });
}

pub(crate) fn can_analyze(app: &DentviewApp) -> bool {
    !app.ui_state.is_busy() && app.ui_state.local_image_path().is_some()
}

pub(crate) fn can_report(app: &DentviewApp) -> bool {
    !app.ui_state.is_busy() && app.ui_state.image_id.is_some()
}

pub(crate) fn start_analysis(app: &mut DentviewApp) {
    let Some(path) = app.ui_state.local_image_path() else {
        return;
    };
    app.ui_state.busy = Some(BusyTask::Analyzing);
    app.send_command(WorkerCommand::Analyze {
        path,
        service: app.config.service.clone(),
    });
}

pub(crate) fn start_report(app: &mut DentviewApp) {
    let Some(image_id) = app.ui_state.image_id.clone() else {
        return;
    };
    app.ui_state.busy = Some(BusyTask::Reporting);
    app.send_command(WorkerCommand::GenerateReport {
        image_id,
        detections: app.ui_state.detections.clone(),
        service: app.config.service.clone(),
    });
}
