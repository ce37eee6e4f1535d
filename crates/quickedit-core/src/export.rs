//! Serializing a rendered surface for download.

use serde::{Deserialize, Serialize};

use crate::encode::{encode_jpeg, encode_png, EncodeError};
use crate::render::Surface;

/// Download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy, composited over black.
    Jpeg { quality: u8 },
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// An encoded image ready to hand to a download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode `surface` in `format`.
///
/// `filename` gets its extension swapped to match the format, so the default
/// `edited-image.png` becomes `edited-image.jpg` for a JPEG export.
pub fn export_surface(
    surface: &Surface,
    format: ExportFormat,
    filename: &str,
) -> Result<ExportedImage, EncodeError> {
    let bytes = match format {
        ExportFormat::Png => encode_png(&surface.pixels, surface.width, surface.height)?,
        ExportFormat::Jpeg { quality } => {
            encode_jpeg(&surface.pixels, surface.width, surface.height, quality)?
        }
    };

    Ok(ExportedImage {
        filename: with_extension(filename, format.extension()),
        mime_type: format.mime_type(),
        bytes,
    })
}

fn with_extension(filename: &str, ext: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };
    format!("{}.{}", stem, ext)
}
