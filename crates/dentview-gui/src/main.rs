mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod workers;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([760.0, 520.0])
            .with_title("Dentview"),
        ..Default::default()
    };

    eframe::run_native(
        "Dentview",
        options,
        Box::new(|cc| Ok(Box::new(app::DentviewApp::new(&cc.egui_ctx)))),
    )
}
