use ab_glyph::FontArc;
use image::RgbaImage;

/// Upload-ready copy of a straight-alpha RGBA surface.
pub fn surface_to_color_image(surface: &RgbaImage) -> egui::ColorImage {
    let size = [surface.width() as usize, surface.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, surface.as_raw())
}

/// First proportional font egui ships with, for label text when no system
/// font resolves.
pub fn bundled_label_font() -> Option<FontArc> {
    let defs = egui::FontDefinitions::default();
    let name = defs.families.get(&egui::FontFamily::Proportional)?.first()?;
    let data = defs.font_data.get(name)?;
    FontArc::try_from_vec(data.font.to_vec()).ok()
}
