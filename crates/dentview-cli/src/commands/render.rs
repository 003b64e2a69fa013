use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dentview_core::io::save_composite;

use super::{composite_file, detections_for, label_font, GlobalOpts};
use crate::summary::print_render_summary;

#[derive(Args)]
pub struct RenderArgs {
    /// Input image
    pub file: PathBuf,

    /// Detections JSON; defaults to the image's `.json` sidecar
    #[arg(long)]
    pub detections: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "annotated.png")]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs, opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let detections = detections_for(&args.file, args.detections.as_deref())?;

    let result = composite_file(&config, label_font(&config), &args.file, detections.clone())?;
    save_composite(&result.surface, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    print_render_summary(
        &args.file.display().to_string(),
        &args.output,
        result.summary.as_ref(),
        &detections,
    );
    Ok(())
}
