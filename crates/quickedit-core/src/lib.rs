//! QuickEdit Core - raster editing library
//!
//! This crate provides the core of the QuickEdit in-browser image editor:
//! decoding uploads, non-destructive brightness/contrast/preset adjustments,
//! an interactive crop state machine with optional aspect lock, rendering,
//! and PNG/JPEG export.
//!
//! # Module Structure
//!
//! - `decode` - Upload decoding into RGBA [`Raster`]s
//! - `encode` - PNG and JPEG encoders
//! - `adjustments` - Adjustment state and the CSS-equivalent filter chain
//! - `crop` - Crop region, aspect lock and the drag state machine
//! - `transform` - Sub-raster extraction and scaling
//! - `render` - Compositing state into a [`Surface`]
//! - `store` - Original/working raster pair
//! - `export` - Surface serialization for download
//! - `session` - The [`EditorSession`] aggregate driving all of the above
//!
//! # Usage
//!
//! ```ignore
//! use quickedit_core::{AspectLock, EditorSession};
//!
//! let mut session = EditorSession::new();
//! session.load(&upload_bytes)?;
//! session.set_brightness(20);
//! session.select_aspect_ratio("4:3".parse()?);
//! session.pointer_down(10.0, 10.0);
//! session.pointer_move(110.0, 60.0);
//! session.pointer_up();
//! session.commit_crop()?;
//! let png = session.export_png()?;
//! ```

pub mod adjustments;
pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod export;
pub mod render;
pub mod session;
pub mod store;
pub mod transform;

mod error;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use adjustments::{AdjustmentState, FilterPreset, InvalidPresetError};
pub use config::{ConfigError, EditorConfig};
pub use crop::{AspectLock, AspectRatio, AspectRatioError, CropController, CropRegion, CropState};
pub use decode::{DecodeError, Raster};
pub use encode::EncodeError;
pub use error::EditorError;
pub use export::{ExportFormat, ExportedImage};
pub use render::{OverlayStyle, Surface};
pub use session::EditorSession;
pub use store::ImageStore;
pub use transform::CropError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_raster, png_bytes};

    /// Full edit flow through the public API.
    #[test]
    fn test_edit_flow() {
        let original = gradient_raster(120, 90);
        let mut session = EditorSession::new();
        session.load(&png_bytes(&original)).unwrap();

        session.set_brightness(10);
        session.set_contrast(-10);
        session.set_filter_by_name("grayscale(100%)").unwrap();

        session.select_aspect_ratio("3:2".parse().unwrap());
        assert!(session.pointer_down(10.0, 10.0));
        session.pointer_move(70.0, 20.0);
        session.pointer_up();
        assert_eq!(session.crop_region(), CropRegion::new(10.0, 10.0, 60.0, 40.0));

        session.commit_crop().unwrap();
        assert_eq!(session.surface_size(), (60, 40));

        let exported = session.export_png().unwrap();
        let decoded = decode::decode_image(&exported.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (60, 40));
        // Grayscale output has equal channels
        assert!(decoded.pixels.chunks(4).all(|p| p[0] == p[1] && p[1] == p[2]));

        session.revert();
        assert_eq!(session.store().current(), Some(&original));
    }
}
