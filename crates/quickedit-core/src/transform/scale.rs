//! Raster scaling for drawing into a surface of a different size.

use crate::decode::Raster;

/// Scale a raster to exact dimensions with a bilinear filter.
///
/// Returns a clone when the size already matches, and an empty raster for a
/// zero target size.
pub fn scale_to(image: &Raster, width: u32, height: u32) -> Raster {
    if width == 0 || height == 0 {
        return Raster::new(width, height, Vec::new());
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return image.clone();
    }

    match image.as_rgba_image() {
        Some(view) => Raster::from_rgba_image(image::imageops::resize(
            &view,
            width,
            height,
            image::imageops::FilterType::Triangle,
        )),
        None => Raster::blank(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::position_raster;

    #[test]
    fn test_same_size_is_identity() {
        let img = position_raster(7, 5);
        assert_eq!(scale_to(&img, 7, 5), img);
    }

    #[test]
    fn test_scale_dimensions() {
        let img = position_raster(20, 10);
        let half = scale_to(&img, 10, 5);
        assert_eq!(half.dimensions(), (10, 5));
        assert_eq!(half.pixels.len(), 10 * 5 * 4);

        let stretched = scale_to(&img, 40, 40);
        assert_eq!(stretched.dimensions(), (40, 40));
    }

    #[test]
    fn test_uniform_color_survives_scaling() {
        let img = Raster::new(4, 4, [10u8, 20, 30, 255].repeat(16));
        let scaled = scale_to(&img, 9, 3);
        assert!(scaled
            .pixels
            .chunks(4)
            .all(|p| p[0].abs_diff(10) <= 1 && p[1].abs_diff(20) <= 1 && p[2].abs_diff(30) <= 1));
    }

    #[test]
    fn test_zero_target() {
        assert!(scale_to(&position_raster(4, 4), 0, 3).is_empty());
    }
}
