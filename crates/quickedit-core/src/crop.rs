//! Interactive crop selection.
//!
//! The [`CropController`] turns pointer events into a [`CropRegion`] in
//! surface space, optionally constrained to a locked aspect ratio.
//!
//! # States
//!
//! ```text
//!  Idle ──select_aspect_ratio──▶ Armed ──pointer_down──▶ Dragging
//!                                  ▲                         │
//!                                  └──pointer_up / leave─────┘
//! ```
//!
//! `Idle` means no aspect mode has been chosen yet; dragging is refused until
//! one has (freeform counts as a choice).
//!
//! # Coordinate System
//!
//! - Coordinates are surface pixels, origin top-left
//! - While dragging, width/height carry the sign of the drag direction, so the
//!   region may extend into any quadrant from the press point
//! - The region is never renormalized here; consumers normalize when they
//!   need positive extents

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an aspect ratio string is not of the form `num:den`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AspectRatioError {
    #[error("Aspect ratio must look like \"num:den\", got {0:?}")]
    Malformed(String),

    #[error("Aspect ratio terms must be non-zero, got {num}:{den}")]
    ZeroTerm { num: u32, den: u32 },
}

/// A fixed width:height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub num: u32,
    pub den: u32,
}

impl AspectRatio {
    pub fn new(num: u32, den: u32) -> Result<Self, AspectRatioError> {
        if num == 0 || den == 0 {
            return Err(AspectRatioError::ZeroTerm { num, den });
        }
        Ok(Self { num, den })
    }

    /// Width divided by height.
    pub fn value(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AspectRatioError::Malformed(s.to_string());
        let (num, den) = s.trim().split_once(':').ok_or_else(malformed)?;
        let num = num.trim().parse().map_err(|_| malformed())?;
        let den = den.trim().parse().map_err(|_| malformed())?;
        Self::new(num, den)
    }
}

/// The aspect mode chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectLock {
    /// No constraint; the region follows the pointer on both axes.
    Freeform,
    /// The region keeps the given ratio.
    Fixed(AspectRatio),
}

impl FromStr for AspectLock {
    type Err = AspectRatioError;

    /// `"freeform"`, `"free"` or an empty string select freeform; anything
    /// else must parse as an [`AspectRatio`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "free" | "freeform" => Ok(AspectLock::Freeform),
            other => other.parse().map(AspectLock::Fixed),
        }
    }
}

/// A crop rectangle in surface space.
///
/// Width and height may be negative while (and after) a drag that moved up or
/// left of the press point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle with non-negative extents.
    pub fn normalized(&self) -> CropRegion {
        CropRegion {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Whether the region encloses no area, or has negative extents.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropState {
    /// No aspect mode chosen yet; dragging is disabled.
    #[default]
    Idle,
    /// Ready to start a drag.
    Armed,
    /// Pointer is down and the region follows it.
    Dragging,
}

/// State machine for rubber-band crop selection.
#[derive(Debug, Clone)]
pub struct CropController {
    state: CropState,
    lock: Option<AspectLock>,
    region: CropRegion,
    start: (f64, f64),
    base_width: f64,
}

impl CropController {
    /// Create a controller in `Idle` with the given starting region.
    ///
    /// `base_width` is the width a fixed ratio snaps the region to when it is
    /// selected.
    pub fn new(base_width: f64, initial: CropRegion) -> Self {
        Self {
            state: CropState::Idle,
            lock: None,
            region: initial,
            start: (0.0, 0.0),
            base_width,
        }
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    /// The selected aspect mode, `None` until one has been chosen.
    pub fn lock(&self) -> Option<AspectLock> {
        self.lock
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// Whether a drag is in progress (and the overlay should be drawn).
    pub fn is_cropping(&self) -> bool {
        self.state == CropState::Dragging
    }

    /// Choose an aspect mode.
    ///
    /// A fixed ratio snaps the region to `base_width` wide and the matching
    /// height, keeping its origin. Freeform leaves the region as is. Either
    /// way the controller ends up `Armed`; a drag in progress is ended.
    pub fn select_aspect_ratio(&mut self, lock: AspectLock) {
        if let AspectLock::Fixed(ratio) = lock {
            self.region.width = self.base_width;
            self.region.height = (self.base_width / ratio.num as f64) * ratio.den as f64;
        }
        self.lock = Some(lock);
        self.state = CropState::Armed;
        debug!(
            "crop: aspect mode {:?}, region {}x{}",
            lock, self.region.width, self.region.height
        );
    }

    /// Start a drag at `(px, py)`.
    ///
    /// Refused (returns `false`, nothing changes) unless an image is loaded and
    /// an aspect mode has been chosen.
    pub fn pointer_down(&mut self, px: f64, py: f64, image_loaded: bool) -> bool {
        if !image_loaded || self.lock.is_none() {
            warn!(
                "crop: pointer down ignored (image loaded: {}, aspect chosen: {})",
                image_loaded,
                self.lock.is_some()
            );
            return false;
        }

        self.start = (px, py);
        self.region = CropRegion::new(px, py, 0.0, 0.0);
        self.state = CropState::Dragging;
        debug!("crop: drag started at ({}, {})", px, py);
        true
    }

    /// Track the pointer. Only acts while dragging; returns whether the
    /// region changed.
    ///
    /// With a fixed ratio the axis with the larger drag magnitude drives the
    /// size and the other axis is derived from it, keeping the driving sign.
    /// Ties go to the vertical axis.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> bool {
        if self.state != CropState::Dragging {
            return false;
        }

        let dw = px - self.start.0;
        let dh = py - self.start.1;

        let (width, height) = match self.lock {
            Some(AspectLock::Fixed(ratio)) => {
                let ratio = ratio.value();
                if dw.abs() > dh.abs() {
                    (dw, dw / ratio)
                } else {
                    (dh * ratio, dh)
                }
            }
            _ => (dw, dh),
        };

        self.region.width = width;
        self.region.height = height;
        true
    }

    /// End the drag. The region keeps whatever extents it had, including
    /// negative ones. Returns whether a drag was in progress.
    pub fn pointer_up(&mut self) -> bool {
        if self.state != CropState::Dragging {
            return false;
        }
        self.state = CropState::Armed;
        debug!(
            "crop: drag ended with region ({}, {}) {}x{}",
            self.region.x, self.region.y, self.region.width, self.region.height
        );
        true
    }

    /// Pointer left the surface: same as releasing it.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    /// Return to the ready state after a crop was applied: zero-size region,
    /// same aspect mode.
    pub fn reset_after_commit(&mut self) {
        self.region = CropRegion::default();
        self.state = self.resting_state();
    }

    /// Drop an in-progress drag and its region, e.g. when a new image replaces
    /// the one being cropped. Does nothing when not dragging.
    pub fn abandon_drag(&mut self) {
        if self.state == CropState::Dragging {
            self.region = CropRegion::default();
            self.state = self.resting_state();
            debug!("crop: in-flight drag abandoned");
        }
    }

    fn resting_state(&self) -> CropState {
        if self.lock.is_some() {
            CropState::Armed
        } else {
            CropState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CropController {
        CropController::new(600.0, CropRegion::new(50.0, 50.0, 300.0, 300.0))
    }

    fn fixed(s: &str) -> AspectLock {
        AspectLock::Fixed(s.parse().unwrap())
    }

    #[test]
    fn test_parse_aspect_ratio() {
        assert_eq!("4:3".parse(), Ok(AspectRatio { num: 4, den: 3 }));
        assert_eq!(" 16 : 9 ".parse(), Ok(AspectRatio { num: 16, den: 9 }));
        assert!(matches!(
            "4x3".parse::<AspectRatio>(),
            Err(AspectRatioError::Malformed(_))
        ));
        assert!(matches!(
            "0:3".parse::<AspectRatio>(),
            Err(AspectRatioError::ZeroTerm { .. })
        ));
        assert_eq!(AspectRatio::new(3, 2).unwrap().to_string(), "3:2");
    }

    #[test]
    fn test_parse_aspect_lock() {
        assert_eq!("freeform".parse(), Ok(AspectLock::Freeform));
        assert_eq!("".parse(), Ok(AspectLock::Freeform));
        assert_eq!("3:2".parse(), Ok(fixed("3:2")));
        assert!("wide".parse::<AspectLock>().is_err());
    }

    #[test]
    fn test_starts_idle() {
        let c = controller();
        assert_eq!(c.state(), CropState::Idle);
        assert_eq!(c.lock(), None);
        assert!(!c.is_cropping());
    }

    #[test]
    fn test_select_fixed_ratios_snap_size() {
        let mut c = controller();

        c.select_aspect_ratio(fixed("4:3"));
        assert_eq!((c.region().width, c.region().height), (600.0, 450.0));

        c.select_aspect_ratio(fixed("3:2"));
        assert_eq!((c.region().width, c.region().height), (600.0, 400.0));

        c.select_aspect_ratio(fixed("6:9"));
        assert_eq!((c.region().width, c.region().height), (600.0, 900.0));

        assert_eq!(c.state(), CropState::Armed);
    }

    #[test]
    fn test_select_ratio_keeps_origin() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        assert_eq!((c.region().x, c.region().y), (50.0, 50.0));
    }

    #[test]
    fn test_select_freeform_keeps_region() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        assert_eq!(c.region(), CropRegion::new(50.0, 50.0, 300.0, 300.0));
        assert_eq!(c.state(), CropState::Armed);
    }

    #[test]
    fn test_pointer_down_requires_image() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        assert!(!c.pointer_down(10.0, 10.0, false));
        assert_eq!(c.state(), CropState::Armed);
    }

    #[test]
    fn test_pointer_down_requires_aspect_choice() {
        let mut c = controller();
        assert!(!c.pointer_down(10.0, 10.0, true));
        assert_eq!(c.state(), CropState::Idle);
        assert_eq!(c.region(), CropRegion::new(50.0, 50.0, 300.0, 300.0));
    }

    #[test]
    fn test_pointer_down_starts_zero_region() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        assert!(c.pointer_down(12.0, 34.0, true));

        assert!(c.is_cropping());
        assert_eq!(c.region(), CropRegion::new(12.0, 34.0, 0.0, 0.0));
    }

    #[test]
    fn test_drag_width_dominant() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        c.pointer_down(0.0, 0.0, true);
        c.pointer_move(100.0, 50.0);

        assert_eq!((c.region().width, c.region().height), (100.0, 75.0));
    }

    #[test]
    fn test_drag_height_dominant() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        c.pointer_down(0.0, 0.0, true);
        c.pointer_move(10.0, 60.0);

        assert_eq!((c.region().width, c.region().height), (80.0, 60.0));
    }

    #[test]
    fn test_drag_tie_uses_height() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("3:2"));
        c.pointer_down(0.0, 0.0, true);
        c.pointer_move(30.0, 30.0);

        assert_eq!((c.region().width, c.region().height), (45.0, 30.0));
    }

    #[test]
    fn test_drag_up_left_keeps_sign() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        c.pointer_down(200.0, 200.0, true);
        c.pointer_move(100.0, 180.0);

        let r = c.region();
        assert_eq!((r.x, r.y), (200.0, 200.0));
        assert_eq!((r.width, r.height), (-100.0, -75.0));
    }

    #[test]
    fn test_drag_freeform_tracks_raw_delta() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        c.pointer_down(10.0, 10.0, true);
        c.pointer_move(5.0, 90.0);

        assert_eq!((c.region().width, c.region().height), (-5.0, 80.0));
    }

    #[test]
    fn test_move_ignored_when_not_dragging() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        assert!(!c.pointer_move(100.0, 100.0));
        assert_eq!((c.region().width, c.region().height), (600.0, 450.0));
    }

    #[test]
    fn test_pointer_up_keeps_negative_extents() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        c.pointer_down(50.0, 50.0, true);
        c.pointer_move(20.0, 10.0);
        assert!(c.pointer_up());

        assert_eq!(c.state(), CropState::Armed);
        assert_eq!((c.region().width, c.region().height), (-30.0, -40.0));
        assert!(!c.pointer_up());
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        c.pointer_down(0.0, 0.0, true);
        assert!(c.pointer_leave());
        assert!(!c.is_cropping());
    }

    #[test]
    fn test_select_during_drag_ends_drag() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        c.pointer_down(0.0, 0.0, true);
        c.select_aspect_ratio(fixed("3:2"));
        assert_eq!(c.state(), CropState::Armed);
    }

    #[test]
    fn test_reset_after_commit() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        c.reset_after_commit();

        assert_eq!(c.state(), CropState::Armed);
        assert_eq!(c.region(), CropRegion::default());
        assert_eq!(c.lock(), Some(fixed("4:3")));
    }

    #[test]
    fn test_reset_after_commit_without_choice_stays_idle() {
        let mut c = controller();
        c.reset_after_commit();
        assert_eq!(c.state(), CropState::Idle);
    }

    #[test]
    fn test_abandon_drag() {
        let mut c = controller();
        c.select_aspect_ratio(AspectLock::Freeform);
        c.pointer_down(10.0, 10.0, true);
        c.pointer_move(40.0, 40.0);
        c.abandon_drag();

        assert!(!c.is_cropping());
        assert_eq!(c.region(), CropRegion::default());
    }

    #[test]
    fn test_abandon_without_drag_keeps_region() {
        let mut c = controller();
        c.select_aspect_ratio(fixed("4:3"));
        c.abandon_drag();
        assert_eq!(c.region().width, 600.0);
    }

    #[test]
    fn test_normalized_region() {
        let r = CropRegion::new(100.0, 80.0, -40.0, -30.0).normalized();
        assert_eq!(r, CropRegion::new(60.0, 50.0, 40.0, 30.0));
    }

    #[test]
    fn test_degenerate_region() {
        assert!(CropRegion::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(CropRegion::new(0.0, 0.0, -5.0, 10.0).is_degenerate());
        assert!(CropRegion::new(0.0, 0.0, f64::NAN, 10.0).is_degenerate());
        assert!(!CropRegion::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ratio_strategy() -> impl Strategy<Value = AspectRatio> {
        (1u32..=32, 1u32..=32).prop_map(|(num, den)| AspectRatio { num, den })
    }

    proptest! {
        /// Property: under a fixed lock the region keeps the ratio for any drag.
        #[test]
        fn prop_locked_drag_keeps_ratio(
            ratio in ratio_strategy(),
            (sx, sy) in (0.0f64..2000.0, 0.0f64..2000.0),
            (px, py) in (-2000.0f64..4000.0, -2000.0f64..4000.0),
        ) {
            let mut c = CropController::new(600.0, CropRegion::default());
            c.select_aspect_ratio(AspectLock::Fixed(ratio));
            c.pointer_down(sx, sy, true);
            c.pointer_move(px, py);
            c.pointer_up();

            let r = c.region();
            prop_assume!(r.height != 0.0);
            let got = r.width / r.height;
            prop_assert!((got - ratio.value()).abs() < 1e-9 * ratio.value().max(1.0));
        }

        /// Property: the driving axis always equals the raw delta on that axis.
        #[test]
        fn prop_driving_axis_is_raw(
            ratio in ratio_strategy(),
            (px, py) in (-500.0f64..500.0, -500.0f64..500.0),
        ) {
            let mut c = CropController::new(600.0, CropRegion::default());
            c.select_aspect_ratio(AspectLock::Fixed(ratio));
            c.pointer_down(0.0, 0.0, true);
            c.pointer_move(px, py);

            let r = c.region();
            if px.abs() > py.abs() {
                prop_assert_eq!(r.width, px);
            } else {
                prop_assert_eq!(r.height, py);
            }
        }

        /// Property: the drag origin never moves.
        #[test]
        fn prop_origin_fixed_during_drag(
            (sx, sy) in (0.0f64..1000.0, 0.0f64..1000.0),
            moves in prop::collection::vec((-1000.0f64..2000.0, -1000.0f64..2000.0), 1..10),
        ) {
            let mut c = CropController::new(600.0, CropRegion::default());
            c.select_aspect_ratio(AspectLock::Freeform);
            c.pointer_down(sx, sy, true);
            for (px, py) in moves {
                c.pointer_move(px, py);
                prop_assert_eq!((c.region().x, c.region().y), (sx, sy));
            }
        }
    }
}
