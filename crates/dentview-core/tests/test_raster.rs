use std::sync::Arc;

use dentview_core::canvas::{estimate_text_width, Canvas, RasterCanvas};
use dentview_core::color::Color;
use dentview_core::config::{EmptyDetectionsPolicy, OverlayStyle};
use dentview_core::detection::Detection;
use dentview_core::geometry::DisplayRect;
use dentview_core::render::{AnnotatedViewport, PassOutcome};
use dentview_core::source::SourceImage;

mod common;
use common::{det, image_ref, raster_canvas, raster_canvas_with_font, solid_rgba};

const RED: [u8; 4] = [255, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn test_new_surface_matches_viewport_and_is_transparent() {
    let canvas = raster_canvas(400.0, 300.0);
    assert_eq!(canvas.surface().dimensions(), (400, 300));
    assert!(canvas.surface().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn test_draw_image_letterboxes() {
    let mut canvas = raster_canvas(400.0, 400.0);
    let image = solid_rgba(100, 50, RED);
    // 100x50 -> scale 4, drawn at (0, 100) size 400x200.
    canvas.draw_image(&image, DisplayRect::new(0.0, 100.0, 400.0, 200.0));

    let inside = canvas.surface().get_pixel(200, 200).0;
    assert!(inside[0] >= 250 && inside[1] <= 5 && inside[3] >= 250, "got {inside:?}");
    assert_eq!(canvas.surface().get_pixel(200, 50).0[3], 0);
    assert_eq!(canvas.surface().get_pixel(200, 350).0[3], 0);
}

#[test]
fn test_clear_resets_surface() {
    let mut canvas = raster_canvas(50.0, 50.0);
    canvas.fill_rect(DisplayRect::new(0.0, 0.0, 50.0, 50.0), Color::WHITE);
    canvas.clear();
    assert!(canvas.surface().pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn test_stroke_rect_outlines_centered_on_edges() {
    let mut canvas = raster_canvas(400.0, 400.0);
    canvas.stroke_rect(DisplayRect::new(100.0, 100.0, 80.0, 40.0), Color::GREEN, 2.0);

    let green = [0, 255, 0, 255];
    let s = canvas.surface();
    // Top band covers rows 99 and 100, bottom band rows 139 and 140.
    assert_eq!(s.get_pixel(140, 99).0, green);
    assert_eq!(s.get_pixel(140, 100).0, green);
    assert_eq!(s.get_pixel(140, 140).0, green);
    // Left band columns 99 and 100, right band columns 179 and 180.
    assert_eq!(s.get_pixel(99, 120).0, green);
    assert_eq!(s.get_pixel(180, 120).0, green);
    // Interior and exterior untouched.
    assert_eq!(s.get_pixel(140, 120).0[3], 0);
    assert_eq!(s.get_pixel(140, 97).0[3], 0);
    assert_eq!(s.get_pixel(182, 120).0[3], 0);
}

#[test]
fn test_zero_area_stroke_leaves_surface_untouched() {
    let mut canvas = raster_canvas(100.0, 100.0);
    canvas.stroke_rect(DisplayRect::new(50.0, 50.0, 0.0, 0.0), Color::GREEN, 2.0);
    canvas.stroke_rect(DisplayRect::new(50.0, 50.0, 10.0, 0.0), Color::GREEN, 2.0);
    canvas.stroke_rect(DisplayRect::new(f32::NAN, 50.0, 10.0, 10.0), Color::GREEN, 2.0);
    assert!(canvas.surface().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn test_fill_rect_blends_translucent_color() {
    let mut canvas = raster_canvas(20.0, 20.0);
    canvas.fill_rect(DisplayRect::new(0.0, 0.0, 20.0, 20.0), Color::WHITE);
    canvas.fill_rect(
        DisplayRect::new(0.0, 0.0, 20.0, 20.0),
        Color::GREEN.with_opacity(0.7),
    );
    let p = canvas.surface().get_pixel(10, 10).0;
    assert_eq!(p[1], 255);
    assert!((70..=85).contains(&p[0]), "red channel {}", p[0]);
    assert_eq!(p[3], 255);
}

#[test]
fn test_fill_rect_clips_and_normalizes() {
    let mut canvas = raster_canvas(20.0, 20.0);
    // Extends past the left/top edge with a negative size.
    canvas.fill_rect(DisplayRect::new(5.0, 5.0, -10.0, -10.0), Color::WHITE);
    let s = canvas.surface();
    assert_eq!(s.get_pixel(0, 0).0, WHITE);
    assert_eq!(s.get_pixel(4, 4).0, WHITE);
    assert_eq!(s.get_pixel(5, 5).0[3], 0);
}

#[test]
fn test_text_without_font_is_measured_and_skipped() {
    let mut canvas = raster_canvas(100.0, 100.0);
    assert!(!canvas.has_font());
    assert_eq!(canvas.measure_text("abc"), estimate_text_width("abc", 16.0));
    canvas.fill_text("abc", 10.0, 50.0, Color::BLACK);
    assert!(canvas.surface().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn test_viewport_composite_on_raster_surface() {
    let mut vp = AnnotatedViewport::new(
        raster_canvas(400.0, 400.0),
        OverlayStyle::default(),
        EmptyDetectionsPolicy::ImageOnly,
    );
    let detections: Arc<[Detection]> =
        vec![det("cavity", 0.873, 500.0, 400.0, 200.0, 100.0)].into();

    let outcome = vp.render_with(image_ref("scan.png"), detections, |_| {
        SourceImage::from_rgba(solid_rgba(1000, 800, WHITE))
    });
    assert!(matches!(outcome, PassOutcome::Rendered(_)));

    let s = vp.canvas().surface();
    // Letterbox bands above and below the 400x320 image stay transparent.
    assert_eq!(s.get_pixel(200, 20).0[3], 0);
    assert_eq!(s.get_pixel(200, 380).0[3], 0);
    // Box (160, 180, 80, 40): top edge is green, interior still white.
    assert_eq!(s.get_pixel(200, 179).0, [0, 255, 0, 255]);
    let interior = s.get_pixel(170, 190).0;
    assert!(interior.iter().all(|&c| c >= 250), "got {interior:?}");
}

#[test]
fn test_zero_area_detection_renders_image_without_box() {
    let mut vp = AnnotatedViewport::new(
        raster_canvas(400.0, 400.0),
        OverlayStyle::default(),
        EmptyDetectionsPolicy::ImageOnly,
    );
    let detections: Arc<[Detection]> = vec![det("ghost", 0.5, 200.0, 200.0, 0.0, 0.0)].into();
    let outcome = vp.render_with(image_ref("scan.png"), detections, |_| {
        SourceImage::from_rgba(solid_rgba(400, 400, WHITE))
    });
    match outcome {
        PassOutcome::Rendered(summary) => assert_eq!(summary.degenerate, 1),
        other => panic!("expected render, got {other:?}"),
    }
    assert_eq!(vp.canvas().surface().get_pixel(200, 200).0, WHITE);
}

// ---------------------------------------------------------------------------
// Malformed but well-typed geometry
// ---------------------------------------------------------------------------

const GREEN: [u8; 4] = [0, 255, 0, 255];

fn render_white_scan(
    canvas: RasterCanvas,
    detections: Vec<Detection>,
) -> AnnotatedViewport<RasterCanvas> {
    let mut vp = AnnotatedViewport::new(
        canvas,
        OverlayStyle::default(),
        EmptyDetectionsPolicy::ImageOnly,
    );
    let outcome = vp.render_with(image_ref("scan.png"), detections.into(), |_| {
        SourceImage::from_rgba(solid_rgba(1000, 800, WHITE))
    });
    assert!(matches!(outcome, PassOutcome::Rendered(_)), "got {outcome:?}");
    vp
}

#[test]
fn test_fill_rect_far_larger_than_surface_covers_it() {
    let mut canvas = raster_canvas(20.0, 20.0);
    canvas.fill_rect(DisplayRect::new(-2e10, -2e10, 4e10, 4e10), Color::WHITE);
    assert!(canvas.surface().pixels().all(|p| p.0 == WHITE));
}

#[test]
fn test_fill_rect_entirely_off_surface_is_ignored() {
    let mut canvas = raster_canvas(20.0, 20.0);
    canvas.fill_rect(DisplayRect::new(1e12, 1e12, 10.0, 10.0), Color::WHITE);
    canvas.fill_rect(DisplayRect::new(-1e12, 5.0, 10.0, 10.0), Color::WHITE);
    canvas.fill_rect(DisplayRect::new(f32::MAX, 0.0, f32::MAX, 5.0), Color::WHITE);
    assert!(canvas.surface().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn test_huge_detection_strokes_across_viewport() {
    // Box spans x from -5e9 to 5e9 in image space; y 350..450 maps to 180..220.
    let vp = render_white_scan(
        raster_canvas_with_font(400.0, 400.0),
        vec![det("cavity", 0.9, 500.0, 400.0, 1e10, 100.0)],
    );
    let s = vp.canvas().surface();
    assert_eq!(s.get_pixel(0, 179).0, GREEN);
    assert_eq!(s.get_pixel(399, 220).0, GREEN);
    assert_eq!(s.get_pixel(200, 200).0, WHITE);
}

#[test]
fn test_non_finite_and_negative_detections_render_image_only() {
    let vp = render_white_scan(
        raster_canvas_with_font(400.0, 400.0),
        vec![
            det("nan", 0.5, f32::NAN, 400.0, 100.0, 100.0),
            det("inf", 0.5, 500.0, 400.0, f32::INFINITY, 100.0),
            det("neg", 0.5, 500.0, 400.0, -200.0, -100.0),
            det("far", 0.5, 1e30, -1e30, 50.0, 50.0),
            det("max", f64::MAX, 500.0, 400.0, f32::MAX, f32::MAX),
        ],
    );
    assert_eq!(vp.canvas().surface().get_pixel(200, 200).0[3], 255);
}

#[test]
fn test_fill_text_far_off_surface_is_skipped() {
    let mut canvas = raster_canvas_with_font(100.0, 100.0);
    assert!(canvas.has_font());
    canvas.fill_text("cavity (90.0%)", 1e12, 50.0, Color::BLACK);
    canvas.fill_text("cavity (90.0%)", -1e12, 50.0, Color::BLACK);
    canvas.fill_text("cavity (90.0%)", 10.0, -1e12, Color::BLACK);
    canvas.fill_text("cavity (90.0%)", 10.0, 1e12, Color::BLACK);
    assert!(canvas.surface().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn test_fill_text_on_surface_draws_glyphs() {
    let mut canvas = raster_canvas_with_font(200.0, 50.0);
    canvas.fill_text("cavity", 10.0, 30.0, Color::BLACK);
    assert!(canvas.surface().pixels().any(|p| p.0[3] > 0));
}

#[test]
fn test_stroke_thinner_than_line_does_not_double_blend_sides() {
    let mut canvas = raster_canvas(200.0, 200.0);
    let paint = Color::GREEN.with_opacity(0.5);
    // Height 2 with a 10px line: top band rows 95..105, bottom band 97..107.
    canvas.stroke_rect(DisplayRect::new(100.0, 100.0, 80.0, 2.0), paint, 10.0);
    let s = canvas.surface();
    // Left band column vs a column only covered by the top/bottom bands.
    assert_eq!(s.get_pixel(100, 98).0, s.get_pixel(140, 98).0);
    assert_eq!(s.get_pixel(100, 96).0, s.get_pixel(140, 96).0);
}
