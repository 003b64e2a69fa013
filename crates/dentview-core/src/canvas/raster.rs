use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use imageproc::rect::Rect;

use super::{estimate_text_width, Canvas};
use crate::color::Color;
use crate::config::FontSpec;
use crate::font::resolve_font;
use crate::geometry::{DisplayRect, ViewportSize};

/// CPU canvas backed by an RGBA8 surface, one pixel per viewport unit.
pub struct RasterCanvas {
    viewport: ViewportSize,
    surface: RgbaImage,
    font: Option<FontArc>,
    font_size: f32,
    warned_missing_font: bool,
}

impl RasterCanvas {
    /// Create a canvas and resolve the label font from `font`.
    pub fn new(viewport: ViewportSize, font: &FontSpec) -> Self {
        Self::with_font(viewport, resolve_font(font), font.size)
    }

    /// Create a canvas with an already loaded font (or none).
    pub fn with_font(viewport: ViewportSize, font: Option<FontArc>, font_size: f32) -> Self {
        let (w, h) = viewport.pixel_dimensions();
        Self {
            viewport,
            surface: RgbaImage::new(w, h),
            font,
            font_size,
            warned_missing_font: false,
        }
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn into_surface(self) -> RgbaImage {
        self.surface
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.font_size)
    }

    /// Integer pixel rectangle covered by `rect`, clipped to the surface.
    fn pixel_rect(&self, rect: DisplayRect) -> Option<Rect> {
        if !rect.is_finite() {
            return None;
        }
        let r = rect.normalized();
        let (w, h) = (self.surface.width() as f32, self.surface.height() as f32);
        // Clamp before the integer cast so huge boxes cannot overflow i32.
        let x0 = r.x.clamp(-1.0, w + 1.0).round() as i32;
        let y0 = r.y.clamp(-1.0, h + 1.0).round() as i32;
        let x1 = r.right().clamp(-1.0, w + 1.0).round() as i32;
        let y1 = r.bottom().clamp(-1.0, h + 1.0).round() as i32;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let bounds = Rect::at(0, 0).of_size(self.surface.width(), self.surface.height());
        Rect::at(x0, y0)
            .of_size((x1 - x0) as u32, (y1 - y0) as u32)
            .intersect(bounds)
    }
}

impl Canvas for RasterCanvas {
    type Image = RgbaImage;

    fn size(&self) -> ViewportSize {
        self.viewport
    }

    fn clear(&mut self) {
        for px in self.surface.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: DisplayRect) {
        if !dest.is_finite() || dest.is_empty() {
            return;
        }
        let w = dest.width.round() as u32;
        let h = dest.height.round() as u32;
        if w == 0 || h == 0 {
            return;
        }
        let x = dest.x.round() as i64;
        let y = dest.y.round() as i64;
        if image.dimensions() == (w, h) {
            imageops::overlay(&mut self.surface, image, x, y);
        } else {
            let resized = imageops::resize(image, w, h, FilterType::Triangle);
            imageops::overlay(&mut self.surface, &resized, x, y);
        }
    }

    fn stroke_rect(&mut self, rect: DisplayRect, color: Color, line_width: f32) {
        if !rect.is_finite() || rect.is_empty() || line_width <= 0.0 {
            tracing::trace!(?rect, "skipping stroke of empty rectangle");
            return;
        }
        let half = line_width / 2.0;
        let outer_x = rect.x - half;
        let outer_w = rect.width + line_width;
        let inner_h = (rect.height - line_width).max(0.0);
        // Top, bottom, left, right bands; the sides fit between the bands.
        self.fill_rect(DisplayRect::new(outer_x, rect.y - half, outer_w, line_width), color);
        self.fill_rect(
            DisplayRect::new(outer_x, rect.bottom() - half, outer_w, line_width),
            color,
        );
        self.fill_rect(
            DisplayRect::new(outer_x, rect.y + half, line_width, inner_h),
            color,
        );
        self.fill_rect(
            DisplayRect::new(rect.right() - half, rect.y + half, line_width, inner_h),
            color,
        );
    }

    fn fill_rect(&mut self, rect: DisplayRect, color: Color) {
        let Some(r) = self.pixel_rect(rect) else {
            return;
        };
        let paint: Rgba<u8> = color.into();
        for y in r.top()..=r.bottom() {
            for x in r.left()..=r.right() {
                self.surface.get_pixel_mut(x as u32, y as u32).blend(&paint);
            }
        }
    }

    fn measure_text(&self, text: &str) -> f32 {
        let Some(font) = &self.font else {
            return estimate_text_width(text, self.font_size);
        };
        let scaled = font.as_scaled(self.scale());
        let mut width = 0.0;
        let mut prev = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    fn fill_text(&mut self, text: &str, x: f32, baseline: f32, color: Color) {
        let Some(font) = &self.font else {
            if !self.warned_missing_font {
                tracing::warn!("no label font available; labels are drawn without text");
                self.warned_missing_font = true;
            }
            return;
        };
        if !(x.is_finite() && baseline.is_finite()) {
            return;
        }
        let scale = self.scale();
        let scaled = font.as_scaled(scale);
        let top = baseline - scaled.ascent();
        let bottom = baseline - scaled.descent();
        let (w, h) = (self.surface.width() as f32, self.surface.height() as f32);
        let text_width = self.measure_text(text);
        if x > w || top > h || x + text_width < 0.0 || bottom < 0.0 {
            return;
        }
        draw_text_mut(
            &mut self.surface,
            color.into(),
            x.round() as i32,
            top.round() as i32,
            scale,
            font,
            text,
        );
    }
}
