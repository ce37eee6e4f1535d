//! Editor-level error type.

use thiserror::Error;

use crate::adjustments::InvalidPresetError;
use crate::config::ConfigError;
use crate::crop::AspectRatioError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::transform::CropError;

/// Any failure of an [`crate::EditorSession`] command.
///
/// All of these are recoverable: the session is unchanged after a failed
/// command.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The upload could not be decoded; the previous image stays active.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A filter preset outside the closed set was requested.
    #[error(transparent)]
    InvalidPreset(#[from] InvalidPresetError),

    /// An aspect ratio string could not be parsed.
    #[error(transparent)]
    AspectRatio(#[from] AspectRatioError),

    /// The crop region was degenerate or out of bounds.
    #[error(transparent)]
    Crop(#[from] CropError),

    /// Encoding the export failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The command needs an image and none is loaded.
    #[error("No image loaded")]
    NoImage,
}
