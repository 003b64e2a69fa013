pub mod raster;
pub mod recording;

pub use raster::RasterCanvas;
pub use recording::{DrawCommand, RecordingCanvas};

use crate::color::Color;
use crate::consts::FALLBACK_ADVANCE_EM;
use crate::geometry::{DisplayRect, ViewportSize};

/// Drawing surface a render pass paints into.
///
/// Coordinates are viewport units with the origin at the top-left corner.
/// Every operation is infallible: a backend that cannot honour a request
/// (degenerate rectangle, missing font) skips it.
pub trait Canvas {
    /// Decoded image type this backend can draw.
    type Image;

    fn size(&self) -> ViewportSize;

    /// Reset the whole surface to transparent.
    fn clear(&mut self);

    /// Draw `image` resampled to fill `dest`.
    fn draw_image(&mut self, image: &Self::Image, dest: DisplayRect);

    /// Outline `rect` with a stroke centered on its edges.
    fn stroke_rect(&mut self, rect: DisplayRect, color: Color, line_width: f32);

    fn fill_rect(&mut self, rect: DisplayRect, color: Color);

    /// Advance width of `text` in the active font.
    fn measure_text(&self, text: &str) -> f32;

    /// Draw `text` with its left end at `x` and its baseline at `baseline`.
    fn fill_text(&mut self, text: &str, x: f32, baseline: f32, color: Color);
}

/// Width estimate used when no font metrics are available.
pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * FALLBACK_ADVANCE_EM
}
