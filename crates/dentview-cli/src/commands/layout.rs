use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dentview_core::canvas::{DrawCommand, RecordingCanvas};
use dentview_core::io::probe_dimensions;
use dentview_core::render::{AnnotatedViewport, PassOutcome};
use dentview_core::source::{ImageRef, SourceImage};

use super::{detections_for, GlobalOpts};

#[derive(Args)]
pub struct LayoutArgs {
    /// Input image (only its header is read)
    pub file: PathBuf,

    /// Detections JSON; defaults to the image's `.json` sidecar
    #[arg(long)]
    pub detections: Option<PathBuf>,

    /// Print the commands as JSON
    #[arg(long)]
    pub json: bool,
}

/// Replay a pass on a recording canvas. Text widths are estimated.
pub fn run(args: &LayoutArgs, opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let size = probe_dimensions(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let detections = detections_for(&args.file, args.detections.as_deref())?;

    let canvas = RecordingCanvas::new(config.viewport, config.style.font.size);
    let mut viewport = AnnotatedViewport::from_config(canvas, &config);
    let outcome = viewport.render_with(
        Some(ImageRef::from(args.file.as_path())),
        detections,
        |_| SourceImage::new((), size.width, size.height),
    );
    if let PassOutcome::Skipped(reason) = outcome {
        println!("Pass skipped: {reason:?}");
        return Ok(());
    }

    let commands = viewport.canvas().commands();
    if args.json {
        println!("{}", serde_json::to_string_pretty(commands)?);
        return Ok(());
    }

    for (i, cmd) in commands.iter().enumerate() {
        match cmd {
            DrawCommand::Clear => println!("{i:>3}  clear"),
            DrawCommand::Image { dest } => println!(
                "{i:>3}  image   ({:.1}, {:.1}) {:.1}x{:.1}",
                dest.x, dest.y, dest.width, dest.height
            ),
            DrawCommand::StrokeRect {
                rect,
                color,
                line_width,
            } => println!(
                "{i:>3}  stroke  ({:.1}, {:.1}) {:.1}x{:.1} {color} w={line_width}",
                rect.x, rect.y, rect.width, rect.height
            ),
            DrawCommand::FillRect { rect, color } => println!(
                "{i:>3}  fill    ({:.1}, {:.1}) {:.1}x{:.1} {color}",
                rect.x, rect.y, rect.width, rect.height
            ),
            DrawCommand::Text {
                text,
                x,
                baseline,
                color,
            } => println!("{i:>3}  text    ({x:.1}, {baseline:.1}) {color} {text:?}"),
        }
    }
    Ok(())
}
