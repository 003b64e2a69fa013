use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geometry::ImageSize;

/// Fetchable handle to a source image. Equality is image identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageRef {
    Path(PathBuf),
    Url(String),
}

impl ImageRef {
    /// Treat `http://` and `https://` strings as URLs, anything else as a path.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            Self::Url(_) => None,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => write!(f, "{u}"),
        }
    }
}

impl From<PathBuf> for ImageRef {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for ImageRef {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

/// A decoded source image with its intrinsic size.
#[derive(Clone, Debug)]
pub struct SourceImage<I> {
    handle: I,
    size: ImageSize,
}

impl<I> SourceImage<I> {
    pub fn new(handle: I, width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            handle,
            size: ImageSize::new(width, height)?,
        })
    }

    pub fn handle(&self) -> &I {
        &self.handle
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }
}

impl SourceImage<image::RgbaImage> {
    pub fn from_rgba(image: image::RgbaImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        Self::new(image, w, h)
    }
}
