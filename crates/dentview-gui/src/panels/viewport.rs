use crate::app::DentviewApp;

/// The composite is shown at its logical size, centered, never zoomed:
/// overlay geometry was computed for exactly this size.
pub fn show(ctx: &egui::Context, app: &mut DentviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let size = app.config.viewport;
        let view_rect =
            egui::Rect::from_center_size(rect.center(), egui::vec2(size.width, size.height));
        ui.painter().rect_stroke(
            view_rect.expand(1.0),
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(70)),
            egui::StrokeKind::Outside,
        );

        let response = ui.allocate_rect(view_rect, egui::Sense::hover());
        app.ui_state.hover_image_pos = response.hover_pos().and_then(|pos| {
            let t = app.renderer.transform()?;
            let local = pos - view_rect.min;
            Some(t.to_image(local.x, local.y))
        });

        if let Some(ref texture) = app.viewport.texture {
            ui.painter().image(
                texture.id(),
                view_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else {
            show_placeholder(ui, view_rect, app.ui_state.is_busy());
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect, busy: bool) {
    let text = if busy {
        "Loading..."
    } else {
        "Open a radiograph (Ctrl+O)"
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(140),
    );
}
