//! Image saving utilities.

use std::ffi::OsString;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageResult};

use crate::error::{Error, Result};

use super::OUTPUT_SUFFIX;

/// Derive the output path for an input image.
///
/// Same directory, same stem, [`OUTPUT_SUFFIX`] appended and a `.png`
/// extension: `photos/cat.JPG` becomes `photos/cat_nuevo.png`.
#[must_use]
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(OUTPUT_SUFFIX);
    name.push(".png");

    input.with_file_name(name)
}

/// Encode an image as PNG bytes.
///
/// # Errors
///
/// Returns the codec error if the image cannot be serialized.
pub fn encode_png(img: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut output = Cursor::new(Vec::new());
    img.write_to(&mut output, ImageFormat::Png)?;
    Ok(output.into_inner())
}

/// Save an image as PNG at the given path, replacing any existing file.
///
/// The image is encoded fully in memory before the file is touched, so an
/// encoding failure never leaves a truncated output behind.
///
/// # Errors
///
/// Returns [`Error::Encode`] if encoding fails and [`Error::Write`] if the
/// file cannot be written.
pub fn save_png<P: AsRef<Path>>(img: &DynamicImage, path: P) -> Result<()> {
    let path = path.as_ref();

    let bytes = encode_png(img).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
