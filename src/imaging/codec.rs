//! Decode and JPEG re-encode.
//!
//! Only the encoding changes: output dimensions always equal input dimensions.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::error::{ProxyError, ProxyResult};
use crate::imaging::format::SourceFormat;

/// JPEG quality, always within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Build a quality, clamping out-of-range values the way the JPEG encoder would.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Parse a `quality` query value. Anything but an integer is rejected.
    pub fn parse(raw: &str) -> ProxyResult<Self> {
        raw.parse::<i64>()
            .map(Self::clamped)
            .map_err(|_| ProxyError::InvalidQuality)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Decode `bytes` as the declared format. GIFs yield their first frame.
pub fn decode(bytes: &[u8], format: SourceFormat) -> ProxyResult<DynamicImage> {
    image::load_from_memory_with_format(bytes, format.into()).map_err(ProxyError::Decode)
}

/// Encode an image as baseline JPEG.
///
/// JPEG has no alpha channel, so anything other than 8-bit grey or RGB is
/// flattened to 8-bit RGB first.
pub fn encode_jpeg(img: &DynamicImage, quality: Quality) -> ProxyResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.get());

    let written = match img {
        DynamicImage::ImageLuma8(gray) => encoder.write_image(
            gray.as_raw(),
            gray.width(),
            gray.height(),
            ExtendedColorType::L8,
        ),
        DynamicImage::ImageRgb8(rgb) => encoder.write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        ),
        other => {
            let rgb = other.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        }
    };
    written.map_err(ProxyError::Encode)?;

    Ok(buffer)
}

/// Decode then re-encode as JPEG.
pub fn reencode(bytes: &[u8], format: SourceFormat, quality: Quality) -> ProxyResult<Vec<u8>> {
    let img = decode(bytes, format)?;
    encode_jpeg(&img, quality)
}
