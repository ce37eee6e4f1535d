//! The editor session: one per page load.
//!
//! `EditorSession` owns the image store, the adjustments and the crop
//! controller, and exposes the commands the UI layer translates its events
//! into. Commands run to completion one at a time; a failed command leaves the
//! session unchanged.
//!
//! The rendered surface is cached and keyed on everything it depends on, so a
//! read after any mutation re-renders and repeated reads do not.

use log::{debug, info, warn};

use crate::adjustments::{AdjustmentState, FilterPreset};
use crate::config::EditorConfig;
use crate::crop::{AspectLock, CropController, CropRegion, CropState};
use crate::error::EditorError;
use crate::export::{export_surface, ExportFormat, ExportedImage};
use crate::render::{render, Surface};
use crate::store::ImageStore;
use crate::transform::{extract_region, resolve_region};

/// Inputs a cached surface was rendered from.
#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    revision: u64,
    size: (u32, u32),
    adjustments: AdjustmentState,
    region: CropRegion,
    is_cropping: bool,
}

/// The aggregate editor state.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    store: ImageStore,
    adjustments: AdjustmentState,
    crop: CropController,
    surface_size: (u32, u32),
    cache: Option<(RenderKey, Surface)>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        let crop = CropController::new(config.base_crop_width, config.initial_crop);
        Self {
            config,
            store: ImageStore::new(),
            adjustments: AdjustmentState::new(),
            crop,
            surface_size: (0, 0),
            cache: None,
        }
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Decode and install an upload. Replaces both original and working image,
    /// sizes the surface to it and abandons any drag in progress.
    ///
    /// On a decode failure the previous image (if any) stays active.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        if let Err(err) = self.store.load(bytes) {
            warn!("session: upload rejected: {}", err);
            return Err(err.into());
        }
        self.after_load();
        Ok(())
    }

    /// Install an already-decoded raster, as [`EditorSession::load`] does.
    pub fn load_raster(&mut self, raster: crate::Raster) {
        self.store.load_raster(raster);
        self.after_load();
    }

    fn after_load(&mut self) {
        self.crop.abandon_drag();
        if let Some(current) = self.store.current() {
            self.surface_size = current.dimensions();
        }
    }

    /// Restore the working image from the original and size the surface back
    /// to it. No-op without an image.
    pub fn revert(&mut self) -> bool {
        if !self.store.revert() {
            debug!("session: revert ignored, no image loaded");
            return false;
        }
        if let Some(original) = self.store.original() {
            self.surface_size = original.dimensions();
        }
        info!(
            "session: reverted to original {}x{}",
            self.surface_size.0, self.surface_size.1
        );
        true
    }

    // ------------------------------------------------------------------
    // Adjustments
    // ------------------------------------------------------------------

    pub fn set_brightness(&mut self, value: i32) {
        self.adjustments.set_brightness(value);
    }

    pub fn set_contrast(&mut self, value: i32) {
        self.adjustments.set_contrast(value);
    }

    pub fn set_filter(&mut self, preset: FilterPreset) {
        self.adjustments.set_filter(preset);
    }

    /// Set the filter preset from a UI value. Unknown values are logged and
    /// leave the current preset in place.
    pub fn set_filter_by_name(&mut self, name: &str) -> Result<(), EditorError> {
        self.adjustments.set_filter_by_name(name).map_err(|err| {
            warn!("session: {}", err);
            EditorError::from(err)
        })
    }

    // ------------------------------------------------------------------
    // Crop
    // ------------------------------------------------------------------

    pub fn select_aspect_ratio(&mut self, lock: AspectLock) {
        self.crop.select_aspect_ratio(lock);
    }

    /// Select an aspect mode from a UI value such as `"4:3"` or `"freeform"`.
    pub fn select_aspect_ratio_by_name(&mut self, value: &str) -> Result<(), EditorError> {
        let lock = value.parse::<AspectLock>().map_err(|err| {
            warn!("session: {}", err);
            EditorError::from(err)
        })?;
        self.crop.select_aspect_ratio(lock);
        Ok(())
    }

    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.crop.pointer_down(x, y, self.store.is_loaded())
    }

    /// Returns whether the crop region changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.crop.pointer_move(x, y)
    }

    /// Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        self.crop.pointer_up()
    }

    /// Pointer left the surface; ends a drag like [`EditorSession::pointer_up`].
    pub fn pointer_leave(&mut self) -> bool {
        self.crop.pointer_leave()
    }

    /// Crop the working image to the current region.
    ///
    /// The region is checked against the surface; a degenerate or
    /// out-of-bounds region fails with [`crate::CropError::InvalidRegion`]
    /// and changes nothing. On success the surface takes the crop's size and
    /// the controller is re-armed with an empty region.
    pub fn commit_crop(&mut self) -> Result<(), EditorError> {
        let Some(current) = self.store.current() else {
            warn!("session: crop ignored, no image loaded");
            return Err(EditorError::NoImage);
        };

        let region = self.crop.region();
        let (width, height) = self.surface_size;
        let rect = resolve_region(&region, width, height).map_err(|err| {
            warn!("session: {}", err);
            EditorError::from(err)
        })?;

        let cropped = extract_region(current, rect);
        info!(
            "session: cropped to {}x{} at ({}, {})",
            rect.width, rect.height, rect.left, rect.top
        );

        self.surface_size = cropped.dimensions();
        self.store.replace_current(cropped);
        self.crop.reset_after_commit();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// The surface for the current state, re-rendered only when stale.
    pub fn surface(&mut self) -> &Surface {
        let key = RenderKey {
            revision: self.store.revision(),
            size: self.surface_size,
            adjustments: self.adjustments,
            region: self.crop.region(),
            is_cropping: self.crop.is_cropping(),
        };

        if !matches!(&self.cache, Some((cached, _)) if *cached == key) {
            self.cache = None;
        }

        let (_, surface) = self.cache.get_or_insert_with(|| {
            debug!(
                "session: rendering {}x{} with filter {:?}",
                key.size.0,
                key.size.1,
                key.adjustments.filter_string()
            );
            let surface = render(
                self.store.current(),
                key.size,
                &key.adjustments,
                &key.region,
                key.is_cropping,
                &self.config.overlay,
            );
            (key, surface)
        });
        surface
    }

    /// Encode the rendered image for download, without the crop overlay.
    pub fn export(&self, format: ExportFormat) -> Result<ExportedImage, EditorError> {
        let Some(current) = self.store.current() else {
            return Err(EditorError::NoImage);
        };

        let surface = render(
            Some(current),
            self.surface_size,
            &self.adjustments,
            &self.crop.region(),
            false,
            &self.config.overlay,
        );
        let exported = export_surface(&surface, format, &self.config.export_filename)?;
        info!(
            "session: exported {} ({} bytes)",
            exported.filename,
            exported.bytes.len()
        );
        Ok(exported)
    }

    /// PNG export with the configured filename.
    pub fn export_png(&self) -> Result<ExportedImage, EditorError> {
        self.export(ExportFormat::Png)
    }

    /// JPEG export at the configured quality.
    pub fn export_jpeg(&self) -> Result<ExportedImage, EditorError> {
        self.export(ExportFormat::Jpeg {
            quality: self.config.jpeg_quality,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn adjustments(&self) -> &AdjustmentState {
        &self.adjustments
    }

    pub fn is_image_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn is_cropping(&self) -> bool {
        self.crop.is_cropping()
    }

    pub fn crop_state(&self) -> CropState {
        self.crop.state()
    }

    pub fn crop_region(&self) -> CropRegion {
        self.crop.region()
    }

    pub fn aspect_lock(&self) -> Option<AspectLock> {
        self.crop.lock()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }
}
