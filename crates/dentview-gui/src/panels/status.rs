use crate::app::DentviewApp;

pub fn show(ctx: &egui::Context, app: &mut DentviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(task) = app.ui_state.busy {
            ui.add(
                egui::ProgressBar::new(0.0)
                    .text(format!("{task}..."))
                    .animate(true),
            );
        } else {
            // Invisible placeholder, same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

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
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!(
                "{}x{}",
                app.config.viewport.width, app.config.viewport.height
            ));
            ui.separator();
            ui.label(format!("Pass #{}", app.viewport.uploaded_pass));
            if let Some((x, y)) = app.ui_state.hover_image_pos {
                ui.separator();
                ui.label(format!("Image: {x:.0}, {y:.0}"));
            }
        });

        ui.add_space(2.0);
    });
}
