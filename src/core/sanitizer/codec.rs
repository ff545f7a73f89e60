//! Decode to pixels and encode a fresh container.
//!
//! Nothing from the source container survives: the encoders only ever
//! see the pixel buffer, so EXIF, IPTC, XMP and ancillary PNG chunks are
//! never written.

use super::policy::{EncodePolicy, GifPolicy, JpegPolicy, PngPolicy};
use crate::core::sniff::ImageKind;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{FilterType, PngEncoder};
use image::{
    ColorType, DynamicImage, ExtendedColorType, ImageReader, ImageResult, Limits, Rgba,
    RgbaImage,
};
use std::io::Cursor;

/// A decoded pixel buffer.
///
/// Owned by the per-file routine that decoded it and released when it
/// goes out of scope.
pub struct DecodedImage {
    image: DynamicImage,
    kind: ImageKind,
}

impl DecodedImage {
    /// Decode `bytes` as `kind` under the given allocation limits.
    ///
    /// GIF input yields the first frame only.
    pub fn decode(bytes: &[u8], kind: ImageKind, limits: Limits) -> ImageResult<Self> {
        let mut reader = ImageReader::with_format(Cursor::new(bytes), kind.image_format());
        reader.limits(limits);
        let image = reader.decode()?;
        Ok(Self { image, kind })
    }

    /// Source format
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the decoded pixels carry an alpha channel
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Encode into a new in-memory file using `policy`
    pub fn encode(&self, policy: &EncodePolicy) -> ImageResult<Vec<u8>> {
        let mut buffer = Vec::new();
        match policy {
            EncodePolicy::Jpeg(jpeg) => encode_jpeg(&self.image, jpeg, &mut buffer)?,
            EncodePolicy::Png(png) => encode_png(&self.image, png, &mut buffer)?,
            EncodePolicy::Gif(gif) => encode_gif(&self.image, gif, &mut buffer)?,
        }
        Ok(buffer)
    }
}

fn encode_jpeg(image: &DynamicImage, policy: &JpegPolicy, out: &mut Vec<u8>) -> ImageResult<()> {
    let quality = policy.quality.clamp(1, 100);
    let encoder = JpegEncoder::new_with_quality(out, quality);

    // JPEG has no alpha; everything that isn't grayscale goes out as RGB.
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image.write_with_encoder(encoder),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder),
    }
}

fn encode_png(image: &DynamicImage, policy: &PngPolicy, out: &mut Vec<u8>) -> ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(
        out,
        policy.compression.compression_type(),
        FilterType::Adaptive,
    );

    if policy.save_alpha || !image.color().has_alpha() {
        return image.write_with_encoder(encoder);
    }

    let flattened = if policy.alpha_blending {
        blend_onto_white(&image.to_rgba8())
    } else {
        image.to_rgb8()
    };
    DynamicImage::ImageRgb8(flattened).write_with_encoder(encoder)
}

fn encode_gif(image: &DynamicImage, policy: &GifPolicy, out: &mut Vec<u8>) -> ImageResult<()> {
    let rgba = image.to_rgba8();
    // The trailer is written when the encoder is dropped at the end of
    // this function, before the caller reads `out`.
    let mut encoder = GifEncoder::new_with_speed(out, policy.quantizer_speed.clamp(1, 30));
    encoder.encode(
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        ExtendedColorType::Rgba8,
    )
}

fn blend_onto_white(rgba: &RgbaImage) -> image::RgbImage {
    image::RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = u16::from(a);
        let mix = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        image::Rgb([mix(r), mix(g), mix(b)])
    })
}
