//! Per-format encode settings.
//!
//! Every supported [`ImageKind`] has exactly one policy record. All
//! quality, compression and alpha decisions live here so they can be
//! checked without touching the filesystem.

use crate::core::sniff::ImageKind;
use image::codecs::png::CompressionType;
use serde::{Deserialize, Serialize};

/// Highest JPEG quality on the 1-100 scale
pub const MAX_JPEG_QUALITY: u8 = 100;

/// JPEG re-encode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JpegPolicy {
    /// Encoder quality, 1-100
    pub quality: u8,
}

impl Default for JpegPolicy {
    fn default() -> Self {
        Self {
            quality: MAX_JPEG_QUALITY,
        }
    }
}

/// zlib effort used for PNG output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PngCompression {
    /// Slowest, smallest output. Level 0 on the inverted 0-9 scale.
    Best,
    /// Encoder default
    Default,
    /// Fastest, largest output
    Fast,
}

impl PngCompression {
    pub(crate) fn compression_type(self) -> CompressionType {
        match self {
            PngCompression::Best => CompressionType::Best,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Fast => CompressionType::Fast,
        }
    }
}

/// PNG re-encode settings
///
/// `alpha_blending` and `save_alpha` are independent. Blending controls
/// whether translucent pixels are mixed onto an opaque background;
/// saving controls whether the alpha channel is written to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PngPolicy {
    pub compression: PngCompression,
    pub alpha_blending: bool,
    pub save_alpha: bool,
}

impl Default for PngPolicy {
    fn default() -> Self {
        Self {
            compression: PngCompression::Best,
            alpha_blending: false,
            save_alpha: true,
        }
    }
}

/// GIF re-encode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifPolicy {
    /// NeuQuant sampling factor, 1 (best) to 30 (fastest).
    /// Only used when the frame has more than 256 colours.
    pub quantizer_speed: i32,
}

impl Default for GifPolicy {
    fn default() -> Self {
        Self { quantizer_speed: 1 }
    }
}

/// Encode settings for one image, tagged by format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePolicy {
    Jpeg(JpegPolicy),
    Png(PngPolicy),
    Gif(GifPolicy),
}

impl EncodePolicy {
    /// The format this policy writes
    pub fn kind(&self) -> ImageKind {
        match self {
            EncodePolicy::Jpeg(_) => ImageKind::Jpeg,
            EncodePolicy::Png(_) => ImageKind::Png,
            EncodePolicy::Gif(_) => ImageKind::Gif,
        }
    }
}

/// The full policy table used by a sanitizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatPolicies {
    pub jpeg: JpegPolicy,
    pub png: PngPolicy,
    pub gif: GifPolicy,
}

impl FormatPolicies {
    /// Pick the policy for a sniffed image kind
    pub fn policy_for(&self, kind: ImageKind) -> EncodePolicy {
        match kind {
            ImageKind::Jpeg => EncodePolicy::Jpeg(self.jpeg),
            ImageKind::Png => EncodePolicy::Png(self.png),
            ImageKind::Gif => EncodePolicy::Gif(self.gif),
        }
    }
}
