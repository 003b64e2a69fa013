pub mod analyze;
pub mod batch;
pub mod config;
pub mod info;
pub mod layout;
pub mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::FontArc;
use anyhow::{bail, Context, Result};
use dentview_core::canvas::RasterCanvas;
use dentview_core::config::RenderConfig;
use dentview_core::detection::{load_detections, Detection};
use dentview_core::font::resolve_font;
use dentview_core::io::load_source_image;
use dentview_core::render::{AnnotatedViewport, PassOutcome, PassSummary};
use dentview_core::source::{ImageRef, SourceImage};
use image::RgbaImage;

/// Options accepted before any subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub font: Option<PathBuf>,
}

impl GlobalOpts {
    /// Read the TOML config (or defaults) and apply command-line overrides.
    pub fn load_config(&self) -> Result<RenderConfig> {
        let mut config: RenderConfig = if let Some(ref path) = self.config {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid render config")?
        } else {
            RenderConfig::default()
        };

        if let Some(ref font) = self.font {
            config.style.font.path = Some(font.clone());
        }
        config.viewport = config.viewport.validated()?;
        Ok(config)
    }
}

/// Label font for raster output, resolved once per invocation.
pub fn label_font(config: &RenderConfig) -> Option<FontArc> {
    resolve_font(&config.style.font)
}

/// A finished composite, or `None` in the summary when the pass was skipped.
pub struct Composite {
    pub surface: RgbaImage,
    pub summary: Option<PassSummary>,
}

/// Run one pass over an already decoded image on a fresh raster surface.
pub fn composite(
    config: &RenderConfig,
    font: Option<FontArc>,
    image_ref: ImageRef,
    image: SourceImage<RgbaImage>,
    detections: Arc<[Detection]>,
) -> Result<Composite> {
    let canvas = RasterCanvas::with_font(config.viewport, font, config.style.font.size);
    let mut viewport = AnnotatedViewport::from_config(canvas, config);

    let outcome = viewport.render_with(Some(image_ref), detections, |_| Ok(image));
    let summary = match outcome {
        PassOutcome::Rendered(summary) => Some(summary),
        PassOutcome::Skipped(reason) => {
            tracing::info!(?reason, "pass skipped");
            None
        }
        other => bail!("Render pass did not complete: {other:?}"),
    };

    Ok(Composite {
        surface: viewport.into_canvas().into_surface(),
        summary,
    })
}

/// Decode a local image and composite it with its detections.
pub fn composite_file(
    config: &RenderConfig,
    font: Option<FontArc>,
    image_path: &Path,
    detections: Arc<[Detection]>,
) -> Result<Composite> {
    let image_ref = ImageRef::from(image_path);
    let image = load_source_image(&image_ref)
        .with_context(|| format!("Failed to load image {}", image_path.display()))?;
    composite(config, font, image_ref, image, detections)
}

/// `<dir>/<stem>.json` next to an image.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}

/// Detections from an explicit file, else from the image's sidecar, else none.
pub fn detections_for(image_path: &Path, explicit: Option<&Path>) -> Result<Arc<[Detection]>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let sidecar = sidecar_path(image_path);
            if !sidecar.exists() {
                tracing::info!(image = %image_path.display(), "no detections file; drawing image only");
                return Ok(Arc::from(Vec::new()));
            }
            sidecar
        }
    };
    load_detections(&path).with_context(|| format!("Failed to read detections {}", path.display()))
}
