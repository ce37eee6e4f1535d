//! Image decoding for uploads.
//!
//! Accepts any encoded format the `image` crate is built with, applies EXIF
//! orientation, and produces an RGBA [`Raster`]. Decoding is synchronous; the
//! browser side owns the asynchronous file read and hands over complete bytes.

mod reader;
mod types;

pub use reader::decode_image;
pub use types::{DecodeError, Orientation, Raster, CHANNELS};
