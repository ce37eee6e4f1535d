//! Sub-raster extraction for committing a crop.
//!
//! Crop regions come from pointer drags in surface space and are `f64`. Before
//! pixels are copied the region is validated and snapped to whole pixels. A
//! region that is degenerate or reaches outside the raster is rejected rather
//! than clamped: committing a crop the user did not see is worse than refusing.

use thiserror::Error;

use crate::crop::CropRegion;
use crate::decode::{Raster, CHANNELS};

/// Slack allowed on the bounds check, to absorb ratio arithmetic.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Errors from committing a crop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CropError {
    /// The region is empty, negative, or not inside the surface.
    #[error("Invalid crop region: {0}")]
    InvalidRegion(String),
}

/// A crop region snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Validate `region` against a `width` x `height` surface and snap it to
/// pixels.
///
/// # Errors
///
/// `CropError::InvalidRegion` if the region has a non-positive (or non-finite)
/// extent, lies even partially outside the surface, or rounds to zero pixels.
pub fn resolve_region(
    region: &CropRegion,
    width: u32,
    height: u32,
) -> Result<PixelRect, CropError> {
    if region.is_degenerate() || !region.width.is_finite() || !region.height.is_finite() {
        return Err(CropError::InvalidRegion(format!(
            "size {}x{} must be positive",
            region.width, region.height
        )));
    }

    let right = region.x + region.width;
    let bottom = region.y + region.height;
    if region.x < -BOUNDS_EPSILON
        || region.y < -BOUNDS_EPSILON
        || right > width as f64 + BOUNDS_EPSILON
        || bottom > height as f64 + BOUNDS_EPSILON
    {
        return Err(CropError::InvalidRegion(format!(
            "({}, {}) {}x{} is outside the {}x{} surface",
            region.x, region.y, region.width, region.height, width, height
        )));
    }

    let left = (region.x.round().max(0.0) as u32).min(width);
    let top = (region.y.round().max(0.0) as u32).min(height);
    let right = (right.round().max(0.0) as u32).min(width);
    let bottom = (bottom.round().max(0.0) as u32).min(height);

    if right <= left || bottom <= top {
        return Err(CropError::InvalidRegion(format!(
            "size {}x{} rounds to zero pixels",
            region.width, region.height
        )));
    }

    Ok(PixelRect {
        left,
        top,
        width: right - left,
        height: bottom - top,
    })
}

/// Copy the pixels under `rect` into a new raster.
///
/// `rect` must lie inside `image`; [`resolve_region`] guarantees that.
pub fn extract_region(image: &Raster, rect: PixelRect) -> Raster {
    debug_assert!(rect.left + rect.width <= image.width);
    debug_assert!(rect.top + rect.height <= image.height);

    // Fast path: full crop returns a clone
    if rect.left == 0 && rect.top == 0 && rect.width == image.width && rect.height == image.height
    {
        return image.clone();
    }

    let row_bytes = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * rect.height as usize);

    // Copy pixel data row by row for efficiency
    for y in rect.top..rect.top + rect.height {
        let start = image.offset(rect.left, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Raster::new(rect.width, rect.height, output)
}

/// Validate, snap and extract in one step.
pub fn apply_crop(image: &Raster, region: &CropRegion) -> Result<Raster, CropError> {
    let rect = resolve_region(region, image.width, image.height)?;
    Ok(extract_region(image, rect))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
