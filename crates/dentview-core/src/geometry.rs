use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::detection::Detection;
use crate::error::{DentviewError, Result};

/// Fixed drawing area in logical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(DentviewError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Reject sizes that bypassed `new`, e.g. values read from a config file.
    pub fn validated(self) -> Result<Self> {
        Self::new(self.width, self.height)
    }

    /// Pixel dimensions of a raster surface covering the viewport.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Intrinsic (native) pixel dimensions of a source image. Both are > 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DentviewError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Axis-aligned rectangle in viewport space, anchored at its top-left corner.
///
/// Width and height may be zero or negative for degenerate input boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// No positive area (includes NaN extents).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Same rectangle with negative extents flipped so width/height are >= 0.
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self { x, y, width, height }
    }
}

/// Uniform letterbox mapping from image pixel space into the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Transform {
    /// Fit `image` inside `viewport` without cropping and center it.
    pub fn fit(image: ImageSize, viewport: ViewportSize) -> Self {
        let iw = image.width as f32;
        let ih = image.height as f32;
        let scale = (viewport.width / iw).min(viewport.height / ih);
        Self {
            scale,
            offset_x: (viewport.width - iw * scale) / 2.0,
            offset_y: (viewport.height - ih * scale) / 2.0,
        }
    }

    /// Where the whole image lands in the viewport.
    pub fn image_rect(&self, image: ImageSize) -> DisplayRect {
        DisplayRect {
            x: self.offset_x,
            y: self.offset_y,
            width: image.width as f32 * self.scale,
            height: image.height as f32 * self.scale,
        }
    }

    /// Convert a center-anchored box in image space to a top-left anchored
    /// viewport rectangle.
    pub fn map_box(&self, center_x: f32, center_y: f32, width: f32, height: f32) -> DisplayRect {
        DisplayRect {
            x: self.offset_x + (center_x - width / 2.0) * self.scale,
            y: self.offset_y + (center_y - height / 2.0) * self.scale,
            width: width * self.scale,
            height: height * self.scale,
        }
    }

    pub fn map_detection(&self, detection: &Detection) -> DisplayRect {
        self.map_box(
            detection.center_x,
            detection.center_y,
            detection.width,
            detection.height,
        )
    }

    /// Map a viewport point back into image pixel space.
    pub fn to_image(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}
