//! Fill-and-crop fitting onto the square canvas.

use image::{imageops::FilterType, DynamicImage, GenericImageView};

use crate::error::{Error, Result};

use super::CANVAS_SIZE;

/// Geometry of a fit: crop a `side` x `side` square at `offset`, then resample it onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    /// Top-left corner of the crop window in source coordinates.
    pub offset: (u32, u32),
    /// Side of the square crop window. Equals the shorter source side.
    pub side: u32,
}

/// Compute the fill-and-crop geometry for a `width` x `height` source.
///
/// Scaling by `max(CANVAS / width, CANVAS / height)` and cropping the center
/// is the same as cropping the centered square of the shorter side first and
/// resampling that square onto the canvas. The crop happens in source
/// coordinates, so the resample never exceeds the canvas. On an odd overflow
/// the offset is rounded down: the extra pixel is trimmed from the
/// bottom/right edge.
///
/// Returns `None` for a zero-sized source.
#[must_use]
pub fn fit_dimensions(width: u32, height: u32) -> Option<FitPlan> {
    if width == 0 || height == 0 {
        return None;
    }

    let side = width.min(height);
    let offset = ((width - side) / 2, (height - side) / 2);

    Some(FitPlan { offset, side })
}

/// Fit an image onto the square canvas.
///
/// Center-crops to a square and resamples it with Lanczos3, so the result is
/// exactly `CANVAS_SIZE` x `CANVAS_SIZE` with no padding. The pixel layout of
/// the input (RGB or RGBA) is kept.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDimensions`] if the image has a zero-sized side.
pub fn fit_image(img: &DynamicImage) -> Result<DynamicImage> {
    let (width, height) = img.dimensions();

    let plan = fit_dimensions(width, height).ok_or_else(|| Error::UnsupportedDimensions {
        width,
        height,
        reason: "image has no pixels".to_string(),
    })?;

    let square = img.crop_imm(plan.offset.0, plan.offset.1, plan.side, plan.side);

    if plan.side == CANVAS_SIZE {
        return Ok(square);
    }

    Ok(square.resize_exact(CANVAS_SIZE, CANVAS_SIZE, FilterType::Lanczos3))
}
