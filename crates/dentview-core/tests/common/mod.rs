#![allow(dead_code)]

use std::sync::Arc;

use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};

use dentview_core::canvas::{RasterCanvas, RecordingCanvas};
use dentview_core::config::{EmptyDetectionsPolicy, OverlayStyle};
use dentview_core::consts::DEFAULT_FONT_SIZE;
use dentview_core::detection::Detection;
use dentview_core::geometry::ViewportSize;
use dentview_core::render::AnnotatedViewport;
use dentview_core::source::{ImageRef, SourceImage};

pub fn det(label: &str, confidence: f64, x: f32, y: f32, w: f32, h: f32) -> Detection {
    Detection::new(label, confidence, x, y, w, h)
}

pub fn dets(list: Vec<Detection>) -> Arc<[Detection]> {
    list.into()
}

pub fn viewport_400() -> ViewportSize {
    ViewportSize::new(400.0, 400.0).unwrap()
}

pub fn image_ref(name: &str) -> Option<ImageRef> {
    Some(ImageRef::Path(name.into()))
}

/// Viewport that records draw commands instead of rasterising.
pub fn recording_viewport(policy: EmptyDetectionsPolicy) -> AnnotatedViewport<RecordingCanvas> {
    let canvas = RecordingCanvas::new(viewport_400(), DEFAULT_FONT_SIZE);
    AnnotatedViewport::new(canvas, OverlayStyle::default(), policy)
}

/// Placeholder decoded image for the recording canvas.
pub fn placeholder(width: u32, height: u32) -> SourceImage<()> {
    SourceImage::new((), width, height).expect("non-zero dimensions")
}

/// Raster canvas with no font, so text never depends on the host system.
pub fn raster_canvas(width: f32, height: f32) -> RasterCanvas {
    RasterCanvas::with_font(
        ViewportSize::new(width, height).unwrap(),
        None,
        DEFAULT_FONT_SIZE,
    )
}

pub fn solid_rgba(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// egui's first proportional font, independent of installed system fonts.
pub fn bundled_font() -> FontArc {
    let defs = egui::FontDefinitions::default();
    let name = &defs.families[&egui::FontFamily::Proportional][0];
    FontArc::try_from_vec(defs.font_data[name].font.to_vec()).expect("bundled font parses")
}

/// Raster canvas that draws label text with the bundled font.
pub fn raster_canvas_with_font(width: f32, height: f32) -> RasterCanvas {
    RasterCanvas::with_font(
        ViewportSize::new(width, height).unwrap(),
        Some(bundled_font()),
        DEFAULT_FONT_SIZE,
    )
}
