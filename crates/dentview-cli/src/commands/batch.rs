use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use anyhow::{Context, Result};
use clap::Args;
use dentview_core::config::RenderConfig;
use dentview_core::detection::load_detections;
use dentview_core::io::save_composite;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::{composite_file, label_font, sidecar_path, GlobalOpts};
use crate::summary::print_batch_summary;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

#[derive(Args)]
pub struct BatchArgs {
    /// Directory of images, each with a `<stem>.json` detections sidecar
    pub dir: PathBuf,

    /// Output directory for the composites
    #[arg(short, long, default_value = "annotated")]
    pub output: PathBuf,
}

enum ItemResult {
    Rendered,
    Skipped,
}

pub fn run(args: &BatchArgs, opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let images = find_images(&args.dir)?;
    if images.is_empty() {
        println!("No images with detections found in {}", args.dir.display());
        return Ok(());
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let font = label_font(&config);

    println!("Rendering {} images...", images.len());
    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Rendering");

    let results: Vec<(PathBuf, Result<ItemResult>)> = images
        .par_iter()
        .map(|image| {
            let result = render_one(&config, font.clone(), image, &args.output);
            pb.inc(1);
            (image.clone(), result)
        })
        .collect();
    pb.finish_with_message("Done");

    let mut rendered = 0;
    let mut skipped = 0;
    let mut failures = Vec::new();
    for (image, result) in results {
        match result {
            Ok(ItemResult::Rendered) => rendered += 1,
            Ok(ItemResult::Skipped) => skipped += 1,
            Err(e) => {
                tracing::warn!(image = %image.display(), "render failed: {e:#}");
                failures.push((display_name(&image), format!("{e:#}")));
            }
        }
    }

    print_batch_summary(rendered, skipped, &failures);
    Ok(())
}

fn render_one(
    config: &RenderConfig,
    font: Option<FontArc>,
    image: &Path,
    out_dir: &Path,
) -> Result<ItemResult> {
    let detections = load_detections(&sidecar_path(image))?;
    let composite = composite_file(config, font, image, detections)?;
    if composite.summary.is_none() {
        return Ok(ItemResult::Skipped);
    }
    save_composite(&composite.surface, &output_path(out_dir, image))?;
    Ok(ItemResult::Rendered)
}

/// Images directly inside `dir` that have a detections sidecar, sorted.
fn find_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if !is_image {
            continue;
        }
        if sidecar_path(&path).is_file() {
            images.push(path);
        } else {
            tracing::debug!(image = %path.display(), "no sidecar, ignoring");
        }
    }
    images.sort();
    Ok(images)
}

fn output_path(out_dir: &Path, image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    out_dir.join(format!("{stem}_annotated.png"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
