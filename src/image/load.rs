//! Image loading utilities.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, ImageResult};

use crate::error::{Error, Result};

use super::SupportedFormat;

/// Load an image from disk, ready for fitting.
///
/// The image is:
/// 1. Read from the specified path
/// 2. Decoded by sniffing its magic bytes, with the extension as fallback
/// 3. Converted to 8-bit RGB unless it already is 8-bit RGB or RGBA and was
///    not palette-encoded
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read and [`Error::Decode`]
/// if its contents are not a decodable image.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let img = decode_image(&bytes, SupportedFormat::from_path(path)).map_err(|source| {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(normalize_color(img, is_palette_encoded(&bytes)))
}

/// Whether the encoded image stores palette indices rather than color values.
///
/// GIF is always palette-based. PNG is checked through the color type byte of
/// its leading `IHDR` chunk. Other formats report `false`; their decoders
/// already expand palettes to plain RGB.
#[must_use]
pub fn is_palette_encoded(bytes: &[u8]) -> bool {
    const PNG_INDEXED: u8 = 3;

    match image::guess_format(bytes) {
        Ok(ImageFormat::Gif) => true,
        Ok(ImageFormat::Png) => {
            bytes.get(12..16) == Some(b"IHDR".as_slice()) && bytes.get(25) == Some(&PNG_INDEXED)
        }
        _ => false,
    }
}

/// Decode an in-memory image.
///
/// The codec is picked from the leading magic bytes. `hint` is only used when
/// the bytes carry no recognizable signature.
///
/// # Errors
///
/// Returns the codec error if the data cannot be decoded.
pub fn decode_image(bytes: &[u8], hint: Option<SupportedFormat>) -> ImageResult<DynamicImage> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;

    if reader.format().is_none() {
        if let Some(format) = hint {
            reader.set_format(format.image_format());
        }
    }

    reader.decode()
}

/// Bring an image into 8-bit RGB or RGBA.
///
/// Palette sources always become RGB, dropping any palette transparency.
/// Otherwise 8-bit RGB and RGBA pass through untouched, wider RGBA keeps its
/// alpha, and every other layout (grayscale, grayscale with alpha, wide RGB)
/// becomes RGB.
#[must_use]
pub fn normalize_color(img: DynamicImage, palette: bool) -> DynamicImage {
    if palette {
        return match img {
            DynamicImage::ImageRgb8(_) => img,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };
    }

    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba8(img.to_rgba8())
        }
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}
