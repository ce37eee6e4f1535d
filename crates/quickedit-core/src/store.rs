//! The original/working raster pair.

use log::{info, warn};

use crate::decode::{decode_image, DecodeError, Raster};

/// Holds the decoded upload and the working copy derived from it.
///
/// `original` is written once per upload. `current` starts as a copy of it and
/// is replaced wholesale by crops and reverts. Both are owned values, so a
/// change to one never shows through the other.
///
/// Every mutation bumps [`ImageStore::revision`], which renderers use to tell
/// whether a cached surface is stale.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    original: Option<Raster>,
    current: Option<Raster>,
    revision: u64,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and make the result both the original and the working
    /// image. On failure the store is left exactly as it was.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let raster = decode_image(bytes)?;
        info!(
            "store: loaded {}x{} image ({} bytes)",
            raster.width,
            raster.height,
            bytes.len()
        );
        self.load_raster(raster);
        Ok(())
    }

    /// Install an already-decoded raster as both original and working image.
    pub fn load_raster(&mut self, raster: Raster) {
        self.current = Some(raster.clone());
        self.original = Some(raster);
        self.revision += 1;
    }

    /// Replace the working image, leaving the original alone. Ignored (with
    /// a warning) when nothing is loaded.
    pub fn replace_current(&mut self, raster: Raster) {
        if self.original.is_none() {
            warn!("store: replace_current ignored, no image loaded");
            return;
        }
        self.current = Some(raster);
        self.revision += 1;
    }

    /// Reset the working image to a copy of the original. Returns `false`
    /// (and does nothing) when nothing is loaded.
    pub fn revert(&mut self) -> bool {
        let Some(original) = &self.original else {
            return false;
        };
        self.current = Some(original.clone());
        self.revision += 1;
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&Raster> {
        self.original.as_ref()
    }

    pub fn current(&self) -> Option<&Raster> {
        self.current.as_ref()
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
