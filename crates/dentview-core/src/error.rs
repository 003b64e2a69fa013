use thiserror::Error;

#[derive(Error, Debug)]
pub enum DentviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),

    #[error("Inference service reported an error: {0}")]
    Inference(String),

    #[error("Service request failed: {0}")]
    Service(String),

    #[error("Font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, DentviewError>;
