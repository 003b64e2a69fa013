use dentview_core::config::EmptyDetectionsPolicy;
use dentview_core::detection::summarize_labels;

use super::menu_bar::{can_analyze, can_report, open_detections, open_radiograph, start_analysis, start_report};
use super::section_header;
use crate::app::DentviewApp;

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut DentviewApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                radiograph_section(ui, app);
                ui.separator();
                findings_section(ui, app);
                ui.separator();
                inference_section(ui, app);
                ui.separator();
                display_section(ui, ctx, app);
                if app.ui_state.report.is_some() {
                    ui.separator();
                    report_section(ui, app);
                }
            });
        });
}

fn radiograph_section(ui: &mut egui::Ui, app: &mut DentviewApp) {
    let state = app.renderer.state().to_string();
    section_header(ui, "Radiograph", Some(&state));
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
        open_radiograph(app);
    }

    if let Some(ref image_ref) = app.ui_state.image_ref {
        let name = image_ref
            .as_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| image_ref.to_string());
        ui.label(name);
    }
    if let Some(t) = app.renderer.transform() {
        ui.small(format!(
            "Scale {:.3}, offset {:.0}, {:.0}",
            t.scale, t.offset_x, t.offset_y
        ));
    }
}

fn findings_section(ui: &mut egui::Ui, app: &mut DentviewApp) {
    let count = app.ui_state.detections.len();
    section_header(ui, "Findings", Some(&count.to_string()));
    ui.add_space(4.0);

    if ui.button("Open Detections...").clicked() {
        open_detections(app);
    }
    if let Some(ref path) = app.ui_state.detections_path {
        ui.small(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }

    if count == 0 {
        ui.weak("No detections");
        return;
    }

    egui::Grid::new("findings_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (label, n) in summarize_labels(&app.ui_state.detections) {
                ui.label(label);
                ui.label(n.to_string());
                ui.end_row();
            }
        });

    ui.collapsing("All detections", |ui| {
        for d in app.ui_state.detections.iter() {
            ui.small(d.label_text());
        }
    });
}

fn inference_section(ui: &mut egui::Ui, app: &mut DentviewApp) {
    section_header(ui, "Inference", app.ui_state.image_id.as_deref());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Server");
        ui.text_edit_singleline(&mut app.config.service.base_url);
    });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_analyze(app), egui::Button::new("Analyze"))
            .clicked()
        {
            start_analysis(app);
        }
        if ui
            .add_enabled(can_report(app), egui::Button::new("Generate Report"))
            .clicked()
        {
            start_report(app);
        }
    });
}

fn display_section(ui: &mut egui::Ui, ctx: &egui::Context, app: &mut DentviewApp) {
    section_header(ui, "Display", None);
    ui.add_space(4.0);

    let mut policy = app.config.empty_detections;
    egui::ComboBox::from_label("Without findings")
        .selected_text(policy.to_string())
        .show_ui(ui, |ui| {
            for option in [EmptyDetectionsPolicy::ImageOnly, EmptyDetectionsPolicy::Skip] {
                ui.selectable_value(&mut policy, option, option.to_string());
            }
        });
    if policy != app.config.empty_detections {
        let mut config = app.config.clone();
        config.empty_detections = policy;
        app.replace_config(ctx, config);
    }
}

fn report_section(ui: &mut egui::Ui, app: &mut DentviewApp) {
    section_header(ui, "Report", None);
    ui.add_space(4.0);
    if let Some(ref report) = app.ui_state.report {
        ui.label(report);
        if ui.button("Copy").clicked() {
            ui.ctx().copy_text(report.clone());
        }
    }
}
