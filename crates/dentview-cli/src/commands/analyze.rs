use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use dentview_core::io::save_composite;
use dentview_core::service::InferenceClient;
use dentview_core::source::SourceImage;
use indicatif::{ProgressBar, ProgressStyle};

use super::{composite, label_font, GlobalOpts};
use crate::summary::{print_render_summary, print_report};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Radiograph to upload (DICOM or a common image format)
    pub file: PathBuf,

    /// Inference backend base URL, overrides the config
    #[arg(long)]
    pub server: Option<String>,

    /// Output PNG path
    #[arg(short, long, default_value = "annotated.png")]
    pub output: PathBuf,

    /// Also request a written report and save it here
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Save the received detections as JSON
    #[arg(long)]
    pub save_detections: Option<PathBuf>,
}

pub fn run(args: &AnalyzeArgs, opts: &GlobalOpts) -> Result<()> {
    let mut config = opts.load_config()?;
    if let Some(ref server) = args.server {
        config.service.base_url = server.clone();
    }
    let client = InferenceClient::new(&config.service);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner.set_message(format!("Analyzing via {}", client.base_url()));
    let analysis = client
        .analyze(&args.file)
        .with_context(|| format!("Analysis of {} failed", args.file.display()))?;

    spinner.set_message("Fetching converted image");
    let image = client
        .fetch_image(&analysis.image_id)
        .context("Failed to fetch the converted image")?;

    let report = if args.report.is_some() {
        spinner.set_message("Generating report");
        Some(
            client
                .generate_report(&analysis.image_id, &analysis.detections)
                .context("Report generation failed")?,
        )
    } else {
        None
    };
    spinner.finish_and_clear();

    let result = composite(
        &config,
        label_font(&config),
        analysis.image_ref.clone(),
        SourceImage::from_rgba(image)?,
        analysis.detections.clone(),
    )?;
    save_composite(&result.surface, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(ref path) = args.save_detections {
        let json = serde_json::to_string_pretty(&*analysis.detections)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    print_render_summary(
        &analysis.image_ref.to_string(),
        &args.output,
        result.summary.as_ref(),
        &analysis.detections,
    );

    if let (Some(path), Some(report)) = (&args.report, &report) {
        std::fs::write(path, report)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        print_report(report);
    }

    Ok(())
}
