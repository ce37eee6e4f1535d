//! Editor configuration.
//!
//! Every field has a default matching the stock editor, so an empty (or
//! partial) configuration object from the page is valid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop::CropRegion;
use crate::render::OverlayStyle;

/// Rejected configuration values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("baseCropWidth must be a positive number, got {0}")]
    BaseCropWidth(f64),

    #[error("overlay lineWidth must be at least 1")]
    OverlayLineWidth,

    #[error("exportFilename must not be empty")]
    ExportFilename,

    #[error("jpegQuality must be between 1 and 100, got {0}")]
    JpegQuality(u8),
}

/// Tunables for an [`crate::EditorSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Width a fixed aspect ratio snaps the crop region to.
    pub base_crop_width: f64,
    /// Crop region before the user has touched it.
    pub initial_crop: CropRegion,
    /// How the crop rectangle is stroked while dragging.
    pub overlay: OverlayStyle,
    /// Suggested filename for downloads.
    pub export_filename: String,
    /// Quality used for JPEG exports (1-100).
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_crop_width: 600.0,
            initial_crop: CropRegion::new(50.0, 50.0, 300.0, 300.0),
            overlay: OverlayStyle::default(),
            export_filename: "edited-image.png".to_string(),
            jpeg_quality: 90,
        }
    }
}

impl EditorConfig {
    /// Check the values that would otherwise break the editor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_crop_width.is_finite() && self.base_crop_width > 0.0) {
            return Err(ConfigError::BaseCropWidth(self.base_crop_width));
        }
        if self.overlay.line_width == 0 {
            return Err(ConfigError::OverlayLineWidth);
        }
        if self.export_filename.trim().is_empty() {
            return Err(ConfigError::ExportFilename);
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::JpegQuality(self.jpeg_quality));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_crop_width, 600.0);
        assert_eq!(config.export_filename, "edited-image.png");
    }

    #[test]
    fn test_rejects_bad_base_width() {
        let mut config = EditorConfig::default();
        config.base_crop_width = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::BaseCropWidth(0.0)));

        config.base_crop_width = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_line_width() {
        let mut config = EditorConfig::default();
        config.overlay.line_width = 0;
        assert_eq!(config.validate(), Err(ConfigError::OverlayLineWidth));
    }

    #[test]
    fn test_rejects_blank_filename() {
        let mut config = EditorConfig::default();
        config.export_filename = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::ExportFilename));
    }

    #[test]
    fn test_rejects_out_of_range_quality() {
        let mut config = EditorConfig::default();
        config.jpeg_quality = 0;
        assert_eq!(config.validate(), Err(ConfigError::JpegQuality(0)));

        config.jpeg_quality = 101;
        assert_eq!(config.validate(), Err(ConfigError::JpegQuality(101)));
    }
}
