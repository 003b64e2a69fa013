use dentview_core::color::Color;
use dentview_core::config::{EmptyDetectionsPolicy, OverlayStyle, RenderConfig, ServiceConfig};
use dentview_core::error::DentviewError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_style_matches_overlay_look() {
    let style = OverlayStyle::default();
    assert_eq!(style.box_color, Color::GREEN);
    assert_eq!(style.box_line_width, 2.0);
    assert_eq!(style.label_background, Color::rgba(0, 255, 0, 179));
    assert_eq!(style.label_text_color, Color::BLACK);
    assert_eq!(style.label_margin, 8.0);
    assert_eq!(style.label_padding, 4.0);
    assert_eq!(style.label_rise, 18.0);
    assert_eq!(style.label_box_height, 22.0);
    assert_eq!(style.font.size, 16.0);
    assert_eq!(style.font.families, vec!["Segoe UI", "Arial"]);
    assert!(style.font.path.is_none());
}

#[test]
fn test_default_policy_is_image_only() {
    assert_eq!(EmptyDetectionsPolicy::default(), EmptyDetectionsPolicy::ImageOnly);
    assert_eq!(format!("{}", EmptyDetectionsPolicy::ImageOnly), "Image only");
    assert_eq!(format!("{}", EmptyDetectionsPolicy::Skip), "Skip");
}

#[test]
fn test_default_service() {
    let service = ServiceConfig::default();
    assert_eq!(service.base_url, "http://localhost:8000");
    assert_eq!(service.timeout_secs, Some(120));
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_empty_toml_is_default_config() {
    let config: RenderConfig = toml::from_str("").unwrap();
    assert_eq!(config, RenderConfig::default());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let text = r##"
empty_detections = "skip"

[viewport]
width = 640.0
height = 480.0

[style]
box_color = "#ff0000"
label_background = "rgba(255, 0, 0, 0.5)"

[style.font]
size = 20.0
"##;
    let config: RenderConfig = toml::from_str(text).unwrap();
    assert_eq!(config.empty_detections, EmptyDetectionsPolicy::Skip);
    assert_eq!(config.viewport.width, 640.0);
    assert_eq!(config.style.box_color, Color::rgb(255, 0, 0));
    assert_eq!(config.style.label_background, Color::rgba(255, 0, 0, 128));
    assert_eq!(config.style.font.size, 20.0);
    assert_eq!(config.style.font.families, vec!["Segoe UI", "Arial"]);
    assert_eq!(config.style.label_margin, 8.0);
    assert_eq!(config.service, ServiceConfig::default());
}

#[test]
fn test_config_survives_toml_round_trip() {
    let config = RenderConfig::default();
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("empty_detections = \"image-only\""), "{text}");
    let back: RenderConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_bad_color_in_config_is_rejected() {
    let result: Result<RenderConfig, _> = toml::from_str("[style]\nbox_color = \"green\"\n");
    assert!(result.is_err());
}

#[test]
fn test_config_viewport_needs_validation() {
    let config: RenderConfig =
        toml::from_str("[viewport]\nwidth = 0.0\nheight = 400.0\n").unwrap();
    assert!(matches!(
        config.viewport.validated(),
        Err(DentviewError::InvalidViewport { .. })
    ));
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

#[test]
fn test_color_formats() {
    assert_eq!("#00ff00".parse::<Color>().unwrap(), Color::GREEN);
    assert_eq!("#00FF00".parse::<Color>().unwrap(), Color::GREEN);
    assert_eq!("#00ff00b3".parse::<Color>().unwrap(), Color::rgba(0, 255, 0, 179));
    assert_eq!("rgb(0, 0, 0)".parse::<Color>().unwrap(), Color::BLACK);
    assert_eq!(
        "rgba(0, 255, 0, 0.7)".parse::<Color>().unwrap(),
        Color::GREEN.with_opacity(0.7)
    );
}

#[test]
fn test_color_rejects_garbage() {
    for bad in ["", "#12345", "#gggggg", "rgb(1, 2)", "rgba(0, 0, 0, 2)", "rgb(300, 0, 0)", "green"] {
        assert!(
            matches!(bad.parse::<Color>(), Err(DentviewError::InvalidColor(_))),
            "{bad:?} parsed"
        );
    }
}

#[test]
fn test_color_display() {
    assert_eq!(Color::GREEN.to_string(), "#00ff00");
    assert_eq!(Color::GREEN.with_opacity(0.7).to_string(), "#00ff00b3");
}
