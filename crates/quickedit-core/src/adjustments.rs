//! Adjustment state and the filter chain it describes.
//!
//! Adjustments are non-destructive: they live next to the working raster and
//! are applied on every render. The chain is expressed two ways:
//! - as a CSS `filter` string, so a browser canvas can mirror it exactly
//! - as per-pixel math following the CSS Filter Effects definitions
//!
//! ## Filter Order
//! 1. Brightness
//! 2. Contrast
//! 3. Preset (grayscale, sepia, invert, ...)
//!
//! The math is presentational only; no colour management is attempted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower bound of the brightness and contrast offsets.
pub const OFFSET_MIN: i32 = -100;
/// Upper bound of the brightness and contrast offsets.
pub const OFFSET_MAX: i32 = 100;

/// Standard deviation of the blur preset, matching its `blur(2px)` CSS form.
const BLUR_SIGMA: f32 = 2.0;

/// Raised when a filter preset name is not part of the closed preset set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown filter preset: {value:?}")]
pub struct InvalidPresetError {
    /// The rejected input.
    pub value: String,
}

/// Named filter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPreset {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Saturate,
    HueRotate,
    Blur,
}

impl FilterPreset {
    /// Every preset, in the order a picker should list them.
    pub const ALL: [FilterPreset; 7] = [
        FilterPreset::None,
        FilterPreset::Grayscale,
        FilterPreset::Sepia,
        FilterPreset::Invert,
        FilterPreset::Saturate,
        FilterPreset::HueRotate,
        FilterPreset::Blur,
    ];

    /// Stable identifier used by the UI.
    pub fn name(self) -> &'static str {
        match self {
            FilterPreset::None => "none",
            FilterPreset::Grayscale => "grayscale",
            FilterPreset::Sepia => "sepia",
            FilterPreset::Invert => "invert",
            FilterPreset::Saturate => "saturate",
            FilterPreset::HueRotate => "hue-rotate",
            FilterPreset::Blur => "blur",
        }
    }

    /// CSS filter function equivalent. Empty for [`FilterPreset::None`].
    pub fn css(self) -> &'static str {
        match self {
            FilterPreset::None => "",
            FilterPreset::Grayscale => "grayscale(100%)",
            FilterPreset::Sepia => "sepia(100%)",
            FilterPreset::Invert => "invert(100%)",
            FilterPreset::Saturate => "saturate(200%)",
            FilterPreset::HueRotate => "hue-rotate(90deg)",
            FilterPreset::Blur => "blur(2px)",
        }
    }

    /// Colour matrix for the preset, if it is a pure per-pixel colour transform.
    fn matrix(self) -> Option<[[f32; 3]; 3]> {
        match self {
            FilterPreset::Grayscale => Some([
                [0.2126, 0.7152, 0.0722],
                [0.2126, 0.7152, 0.0722],
                [0.2126, 0.7152, 0.0722],
            ]),
            FilterPreset::Sepia => Some([
                [0.393, 0.769, 0.189],
                [0.349, 0.686, 0.168],
                [0.272, 0.534, 0.131],
            ]),
            FilterPreset::Saturate => Some(saturate_matrix(2.0)),
            FilterPreset::HueRotate => Some(hue_rotate_matrix(90.0)),
            FilterPreset::None | FilterPreset::Invert | FilterPreset::Blur => None,
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterPreset {
    type Err = InvalidPresetError;

    /// Accepts either the preset name or its CSS equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilterPreset::ALL
            .into_iter()
            .find(|p| {
                p.name().eq_ignore_ascii_case(trimmed)
                    || (!p.css().is_empty() && p.css().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| InvalidPresetError {
                value: s.to_string(),
            })
    }
}

/// Brightness/contrast offsets and the selected preset.
///
/// Offsets are clamped to `[-100, 100]` by every setter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentState {
    brightness_offset: i32,
    contrast_offset: i32,
    filter_preset: FilterPreset,
}

impl AdjustmentState {
    /// Create a new AdjustmentState with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brightness(&self) -> i32 {
        self.brightness_offset
    }

    pub fn contrast(&self) -> i32 {
        self.contrast_offset
    }

    pub fn filter(&self) -> FilterPreset {
        self.filter_preset
    }

    /// Set the brightness offset, clamping to `[-100, 100]`.
    pub fn set_brightness(&mut self, value: i32) {
        self.brightness_offset = value.clamp(OFFSET_MIN, OFFSET_MAX);
    }

    /// Set the contrast offset, clamping to `[-100, 100]`.
    pub fn set_contrast(&mut self, value: i32) {
        self.contrast_offset = value.clamp(OFFSET_MIN, OFFSET_MAX);
    }

    pub fn set_filter(&mut self, preset: FilterPreset) {
        self.filter_preset = preset;
    }

    /// Set the preset from its name or CSS form. Unknown input leaves the
    /// current preset in place.
    pub fn set_filter_by_name(&mut self, name: &str) -> Result<(), InvalidPresetError> {
        self.filter_preset = name.parse()?;
        Ok(())
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The CSS filter string for this state.
    ///
    /// Always `brightness(B%) contrast(C%) PRESET` with `B = 100 + brightness`
    /// and `C = 100 + contrast`; the trailing preset part is empty for `none`.
    pub fn filter_string(&self) -> String {
        format!(
            "brightness({}%) contrast({}%) {}",
            100 + self.brightness_offset,
            100 + self.contrast_offset,
            self.filter_preset.css()
        )
    }
}

/// Apply the full filter chain to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width`, `height` - Raster dimensions (needed by the blur preset)
/// * `state` - The adjustment values to apply
pub fn apply_filter_chain(pixels: &mut [u8], width: u32, height: u32, state: &AdjustmentState) {
    // Early exit if no adjustments
    if state.is_default() {
        return;
    }

    let brightness = (100 + state.brightness_offset) as f32 / 100.0;
    let contrast = (100 + state.contrast_offset) as f32 / 100.0;
    let matrix = state.filter_preset.matrix();
    let invert = state.filter_preset == FilterPreset::Invert;

    for chunk in pixels.chunks_exact_mut(4) {
        let mut rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];

        for c in rgb.iter_mut() {
            *c = apply_contrast(apply_brightness(*c, brightness), contrast);
        }
        if let Some(m) = &matrix {
            rgb = apply_matrix(m, rgb);
        }
        if invert {
            for c in rgb.iter_mut() {
                *c = 1.0 - *c;
            }
        }

        for (dst, c) in chunk[..3].iter_mut().zip(rgb) {
            *dst = to_byte(c);
        }
    }

    if state.filter_preset == FilterPreset::Blur {
        apply_blur(pixels, width, height, BLUR_SIGMA);
    }
}

/// CSS `brightness()`: linear multiply, clamped after each step.
#[inline]
fn apply_brightness(c: f32, amount: f32) -> f32 {
    (c * amount).clamp(0.0, 1.0)
}

/// CSS `contrast()`: `(c - 0.5) * amount + 0.5`.
#[inline]
fn apply_contrast(c: f32, amount: f32) -> f32 {
    ((c - 0.5) * amount + 0.5).clamp(0.0, 1.0)
}

#[inline]
fn apply_matrix(m: &[[f32; 3]; 3], [r, g, b]: [f32; 3]) -> [f32; 3] {
    [
        (m[0][0] * r + m[0][1] * g + m[0][2] * b).clamp(0.0, 1.0),
        (m[1][0] * r + m[1][1] * g + m[1][2] * b).clamp(0.0, 1.0),
        (m[2][0] * r + m[2][1] * g + m[2][2] * b).clamp(0.0, 1.0),
    ]
}

#[inline]
fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// Gaussian blur over the whole RGBA buffer.
fn apply_blur(pixels: &mut [u8], width: u32, height: u32, sigma: f32) {
    let Some(view) = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(width, height, &*pixels)
    else {
        return;
    };
    let blurred = image::imageops::blur(&view, sigma);
    pixels.copy_from_slice(blurred.as_raw());
}


// ============================================================================
// Property-Based Tests
// ============================================================================
