use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{DentviewError, Result};
use crate::geometry::ImageSize;
use crate::source::{ImageRef, SourceImage};

/// Decode the image behind `image_ref` to RGBA8.
///
/// URLs require the `service` feature.
pub fn load_source(image_ref: &ImageRef) -> Result<RgbaImage> {
    match image_ref {
        ImageRef::Path(path) => load_rgba(path),
        ImageRef::Url(url) => load_url(url),
    }
}

/// Decode and wrap as a `SourceImage` for the raster renderer.
pub fn load_source_image(image_ref: &ImageRef) -> Result<SourceImage<RgbaImage>> {
    SourceImage::from_rgba(load_source(image_ref)?)
}

/// Decode a local image file to RGBA8.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "decoded image"
    );
    Ok(img.to_rgba8())
}

/// Decode an in-memory encoded image to RGBA8.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(feature = "service")]
fn load_url(url: &str) -> Result<RgbaImage> {
    let bytes = crate::service::fetch_bytes(url, None)?;
    decode_bytes(&bytes)
}

#[cfg(not(feature = "service"))]
fn load_url(url: &str) -> Result<RgbaImage> {
    Err(DentviewError::UnsupportedSource(format!(
        "{url} (built without the `service` feature)"
    )))
}

/// Intrinsic size from the file header, without decoding pixels.
pub fn probe_dimensions(path: &Path) -> Result<ImageSize> {
    let (w, h) = image::image_dimensions(path)?;
    ImageSize::new(w, h)
}

/// Save a composite surface as PNG.
pub fn save_composite(surface: &RgbaImage, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.eq_ignore_ascii_case("png") => {
            return Err(DentviewError::UnsupportedSource(format!(
                "composites are written as PNG, got .{ext}"
            )));
        }
        _ => {}
    }
    surface.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
