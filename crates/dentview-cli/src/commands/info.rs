use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dentview_core::geometry::Transform;
use dentview_core::io::probe_dimensions;

use super::{detections_for, GlobalOpts};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Detections JSON; defaults to the image's `.json` sidecar
    #[arg(long)]
    pub detections: Option<PathBuf>,
}

pub fn run(args: &InfoArgs, opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let size = probe_dimensions(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let transform = Transform::fit(size, config.viewport);
    let shown = transform.image_rect(size);

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", size.width, size.height);
    println!(
        "Viewport:    {}x{}",
        config.viewport.width, config.viewport.height
    );
    println!("Scale:       {:.4}", transform.scale);
    println!(
        "Offset:      {:.1}, {:.1}",
        transform.offset_x, transform.offset_y
    );
    println!("Displayed:   {:.1}x{:.1}", shown.width, shown.height);

    let detections = detections_for(&args.file, args.detections.as_deref())?;
    if !detections.is_empty() {
        println!("Detections:  {}", detections.len());
        for d in detections.iter() {
            let r = transform.map_detection(d);
            println!(
                "  {:<24} ({:.1}, {:.1}) {:.1}x{:.1}",
                d.label_text(),
                r.x,
                r.y,
                r.width,
                r.height
            );
        }
    }

    Ok(())
}
