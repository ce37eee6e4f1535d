//! Shared test utilities: synthetic rasters and encoded fixtures.

use std::io::Cursor;

use crate::decode::Raster;

/// A raster whose RGB channels encode `(y * width + x) % 256`.
pub fn position_raster(width: u32, height: u32) -> Raster {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = ((y * width + x) % 256) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    Raster::new(width, height, pixels)
}

/// A raster with distinct R/G/B/A ramps, to catch channel mix-ups.
pub fn gradient_raster(width: u32, height: u32) -> Raster {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) * 17 % 256) as u8,
                255 - ((x * 3 + y) % 64) as u8,
            ]);
        }
    }
    Raster::new(width, height, pixels)
}

/// A single-colour raster.
pub fn solid_raster(width: u32, height: u32, rgba: [u8; 4]) -> Raster {
    Raster::new(width, height, rgba.repeat((width * height) as usize))
}

/// Encode a raster as PNG, the way an upload would arrive.
pub fn png_bytes(raster: &Raster) -> Vec<u8> {
    let img = raster.to_rgba_image().expect("raster buffer matches dimensions");
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("PNG encoding of a test raster");
    buffer.into_inner()
}
