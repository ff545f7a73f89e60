//! # Sniff Module
//!
//! Detects the real image type from file content, ignoring the name.
//!
//! A file called `holiday.jpg` that actually holds PNG data is treated as
//! PNG; a text file called `holiday.jpg` is unsupported.

use serde::{Deserialize, Serialize};

/// Image container types the cleaner knows how to re-encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// Matching format for the `image` crate
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Gif => image::ImageFormat::Gif,
        }
    }

    /// MIME type of the container
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Jpeg => write!(f, "JPEG"),
            ImageKind::Png => write!(f, "PNG"),
            ImageKind::Gif => write!(f, "GIF"),
        }
    }
}

/// Detect the image kind from magic bytes.
///
/// Returns `None` for anything that is not JPEG, PNG or GIF.
pub fn sniff(bytes: &[u8]) -> Option<ImageKind> {
    if infer::image::is_jpeg(bytes) {
        Some(ImageKind::Jpeg)
    } else if infer::image::is_png(bytes) {
        Some(ImageKind::Png)
    } else if infer::image::is_gif(bytes) {
        Some(ImageKind::Gif)
    } else {
        None
    }
}
