//! Raster transforms: sub-region extraction and scaling.
//!
//! # Coordinate System
//!
//! - Crop regions are in surface pixels (`f64`), origin top-left
//! - Regions are snapped to whole pixels before any pixel is copied

mod crop;
mod scale;

pub use crop::{apply_crop, extract_region, resolve_region, CropError, PixelRect};
pub use scale::scale_to;
