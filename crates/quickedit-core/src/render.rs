//! Compositing the editor state into a surface.
//!
//! [`render`] is a pure function of its inputs: the working raster, the
//! surface size, the adjustments and the crop overlay. It:
//! 1. clears the destination
//! 2. draws the working raster scaled to the surface size
//! 3. strokes the crop rectangle, if a drag is in progress
//! 4. applies the adjustment filter chain to everything drawn
//!
//! The filter is compositing state, as on a canvas with `ctx.filter` set, so
//! the crop outline is filtered along with the image.

use serde::{Deserialize, Serialize};

use crate::adjustments::{apply_filter_chain, AdjustmentState};
use crate::crop::CropRegion;
use crate::decode::{Raster, CHANNELS};
use crate::transform::scale_to;

/// Stroke style for the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayStyle {
    /// Stroke width in pixels, centred on the rectangle edge.
    pub line_width: u32,
    /// Dash and gap length in pixels; 0 draws a solid line.
    pub dash: u32,
    /// RGBA stroke colour.
    pub color: [u8; 4],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            dash: 6,
            color: [255, 0, 0, 255],
        }
    }
}

/// A rendered destination raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data.
    pub pixels: Vec<u8>,
    /// The CSS filter string this surface was rendered with.
    pub filter: String,
}

impl Surface {
    /// A cleared (transparent) surface.
    pub fn cleared(width: u32, height: u32, filter: String) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * CHANNELS],
            filter,
        }
    }

    /// Copy the pixels out as a raster.
    pub fn to_raster(&self) -> Raster {
        Raster::new(self.width, self.height, self.pixels.clone())
    }
}

/// Render the editor state into a `width` x `height` surface.
///
/// With no image the surface is left cleared. The crop rectangle is stroked
/// only when `is_cropping` is set, using the region's raw (possibly negative)
/// extents, and goes through the filter chain like the image under it.
pub fn render(
    image: Option<&Raster>,
    (width, height): (u32, u32),
    adjustments: &AdjustmentState,
    crop: &CropRegion,
    is_cropping: bool,
    style: &OverlayStyle,
) -> Surface {
    let filter = adjustments.filter_string();

    let Some(image) = image else {
        return Surface::cleared(width, height, filter);
    };

    let mut surface = Surface {
        width,
        height,
        pixels: scale_to(image, width, height).pixels,
        filter,
    };

    if is_cropping {
        stroke_dashed_rect(&mut surface, crop, style);
    }
    apply_filter_chain(&mut surface.pixels, width, height, adjustments);
    surface
}

/// Stroke the outline of `region` following the canvas `rect()` path:
/// `(x, y) → (x+w, y) → (x+w, y+h) → (x, y+h) → (x, y)`.
///
/// The dash phase runs continuously along that path. Negative extents simply
/// walk the path in the other direction.
fn stroke_dashed_rect(surface: &mut Surface, region: &CropRegion, style: &OverlayStyle) {
    let CropRegion {
        x,
        y,
        width: w,
        height: h,
    } = *region;
    if ![x, y, w, h].iter().all(|v| v.is_finite()) || style.line_width == 0 {
        return;
    }

    let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)];
    let pad = style.line_width as f64;
    let dash = style.dash as f64;
    let mut travelled = 0.0;

    for seg in corners.windows(2) {
        let ((ax, ay), (bx, by)) = (seg[0], seg[1]);
        let (dx, dy) = (bx - ax, by - ay);
        // Edges are axis-aligned, so one of dx/dy is zero.
        let len = dx.abs() + dy.abs();
        if len == 0.0 {
            continue;
        }
        let (ux, uy) = (dx / len, dy / len);

        let (mut t0, mut t1) = (0.0, len);
        clip_axis(ax, ux, -pad, surface.width as f64 + pad, &mut t0, &mut t1);
        clip_axis(ay, uy, -pad, surface.height as f64 + pad, &mut t0, &mut t1);

        let mut t = t0.floor().max(0.0);
        while t <= t1 {
            let on = dash == 0.0 || ((travelled + t) / dash).floor() as u64 % 2 == 0;
            if on {
                stamp(surface, ax + ux * t, ay + uy * t, style);
            }
            t += 1.0;
        }
        travelled += len;
    }
}

/// Narrow `[t0, t1]` to the part of `a + u*t` that lies within `[lo, hi]`.
fn clip_axis(a: f64, u: f64, lo: f64, hi: f64, t0: &mut f64, t1: &mut f64) {
    if u == 0.0 {
        if a < lo || a > hi {
            *t1 = -1.0;
        }
        return;
    }
    let (ta, tb) = ((lo - a) / u, (hi - a) / u);
    *t0 = t0.max(ta.min(tb));
    *t1 = t1.min(ta.max(tb));
}

/// Paint a `line_width` square centred on `(cx, cy)`.
fn stamp(surface: &mut Surface, cx: f64, cy: f64, style: &OverlayStyle) {
    let half = style.line_width as f64 / 2.0;
    let x0 = (cx - half).floor() as i64;
    let y0 = (cy - half).floor() as i64;
    let size = style.line_width as i64;

    for py in y0.max(0)..(y0 + size).min(surface.height as i64) {
        for px in x0.max(0)..(x0 + size).min(surface.width as i64) {
            let idx = (py as usize * surface.width as usize + px as usize) * CHANNELS;
            blend_over(&mut surface.pixels[idx..idx + CHANNELS], style.color);
        }
    }
}

/// Source-over blend of a straight-alpha colour onto a pixel.
#[inline]
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let sa = src[3] as u32;
    if sa == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    let inv = 255 - sa;
    for i in 0..3 {
        dst[i] = ((src[i] as u32 * sa + dst[i] as u32 * inv + 127) / 255) as u8;
    }
    dst[3] = (sa + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
}
