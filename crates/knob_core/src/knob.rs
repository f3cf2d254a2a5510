//! Per-knob interaction state machine.
//!
//! `KnobState` owns the authoritative value of one knob and turns pointer
//! angles into value changes. The frontend feeds it raw angles; everything
//! mode-specific (wrapping, clamping, snapping) happens here.

use crate::angle::{
    FULL_TURN_DEG, angular_delta, pointer_angle, value_delta, value_to_display_angle, winsorize,
    wrap,
};
use crate::config::KnobConfig;
use crate::error::KnobConfigError;
use crate::mode::Mode;
use crate::positions::PositionSet;

/// Construction parameters for a [`KnobState`].
///
/// Defaults mirror an unconfigured dial: `0..=360`, root at north, analog.
#[derive(Clone, Debug)]
pub struct KnobOptions {
    pub min: f64,
    pub max: f64,
    pub from: f64,
    pub to: Option<f64>,
    pub lap: Option<f64>,
    pub infinite: bool,
    pub positions: Option<Vec<f64>>,
    pub sticky: bool,
    /// Initial value; defaults to `min` when absent.
    pub value: Option<f64>,
}

impl Default for KnobOptions {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 360.0,
            from: 0.0,
            to: None,
            lap: None,
            infinite: false,
            positions: None,
            sticky: false,
            value: None,
        }
    }
}

/// Opaque handle tying a settle animation to the drag that started it.
///
/// Tokens go stale whenever a new drag begins or the value is set
/// externally, so a completion callback from a superseded animation is
/// ignored instead of clobbering fresher state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapToken(u64);

/// A settle animation the frontend should run after a digital release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapRequest {
    /// Dial rotation to animate towards, relative to the root angle.
    pub target_angle: f64,
    pub token: SnapToken,
}

/// Outcome of releasing a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEnd {
    /// No drag was in progress.
    Idle,
    /// The knob came to rest immediately.
    Settled,
    /// The frontend should animate to the snapped position and then call
    /// [`KnobState::finish_snap`] with the token.
    Snap(SnapRequest),
}

/// Coarse interaction phase, mostly for introspection and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    /// Released, waiting for the settle animation to finish.
    SnapPending,
}

#[derive(Clone, Debug)]
struct DragSession {
    /// Pointer angle at the previous sample, for delta computation.
    prev_angle: f64,
}

/// Authoritative state of a single knob.
#[derive(Clone, Debug)]
pub struct KnobState {
    config: KnobConfig,
    positions: Option<PositionSet>,
    sticky: bool,
    /// The externally visible value, always inside `[min, max]` (and inside
    /// one lap for encoders).
    value: f64,
    /// Unclamped accumulator the drag integrates into. For encoders this
    /// keeps the revolution count that `value` drops.
    internal: f64,
    /// Dial rotation in degrees relative to the root angle. May exceed 360
    /// for multi-turn ranges.
    display_angle: f64,
    drag: Option<DragSession>,
    /// Bumped whenever a pending snap must be abandoned; the live token is
    /// the current revision.
    snap_rev: u64,
    snap_pending: bool,
    /// Bumped on every observable value change.
    value_rev: u64,
}

impl KnobState {
    pub fn new(options: KnobOptions) -> Result<Self, KnobConfigError> {
        let mut config = KnobConfig::new();
        config.set_bounds(options.min, options.max)?;
        config.set_from(options.from)?;
        config.set_to(options.to)?;
        config.set_lap(options.lap);
        config.set_infinite(options.infinite);

        let positions = match &options.positions {
            Some(raw) => Some(PositionSet::new(raw, config.min(), config.max())?),
            None => None,
        };

        let mut value = options.value.unwrap_or(config.min());
        if value < config.min() || value > config.max() {
            return Err(KnobConfigError::ValueOutOfBounds {
                value,
                min: config.min(),
                max: config.max(),
            });
        }
        if let Some(set) = &positions {
            value = set.nearest(value);
        }

        let mut state = Self {
            config,
            positions,
            sticky: options.sticky,
            value,
            internal: value,
            display_angle: 0.0,
            drag: None,
            snap_rev: 0,
            snap_pending: false,
            value_rev: 0,
        };
        state.sync_display_angle();
        Ok(state)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    #[inline]
    pub fn positions(&self) -> Option<&PositionSet> {
        self.positions.as_ref()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        Mode::classify(&self.config, self.positions.as_ref(), self.sticky)
    }

    /// Dial rotation relative to the root angle.
    #[inline]
    pub fn display_angle(&self) -> f64 {
        self.display_angle
    }

    /// The root (`from`) angle the dial rotation is relative to.
    #[inline]
    pub fn root_angle(&self) -> f64 {
        self.config.from()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        if self.drag.is_some() {
            Phase::Dragging
        } else if self.snap_pending {
            Phase::SnapPending
        } else {
            Phase::Idle
        }
    }

    #[inline]
    pub fn value_revision(&self) -> u64 {
        self.value_rev
    }

    /// Start a drag at the given pointer position.
    ///
    /// Interrupting a settle animation takes over from wherever the dial
    /// currently is; the pending snap is abandoned.
    pub fn begin_drag(&mut self, center: (f64, f64), cursor: (f64, f64)) {
        if self.drag.is_some() {
            return;
        }
        self.cancel_pending_snap();
        self.drag = Some(DragSession {
            prev_angle: pointer_angle(center, cursor),
        });
    }

    /// Feed a pointer sample into an active drag.
    ///
    /// Returns the value after the move, or `None` when no drag is active.
    pub fn drag_move(&mut self, center: (f64, f64), cursor: (f64, f64)) -> Option<f64> {
        let lap = self.config.effective_lap();
        let curr = pointer_angle(center, cursor);
        let session = self.drag.as_mut()?;
        let delta = angular_delta(session.prev_angle, curr);
        session.prev_angle = curr;

        self.internal += value_delta(delta, lap);
        let mode = self.mode();
        if !mode.is_encoder() {
            self.internal = winsorize(self.config.min(), self.internal, self.config.max());
        }

        self.value = self.quantize(self.internal, lap, mode);
        self.sync_display_angle();
        self.value_rev += 1;
        Some(self.value)
    }

    /// Release an active drag.
    pub fn end_drag(&mut self) -> DragEnd {
        if self.drag.take().is_none() {
            return DragEnd::Idle;
        }
        let mode = self.mode();
        if mode.is_digital() {
            return DragEnd::Snap(self.request_snap(mode));
        }
        // Come to rest where we are: fold encoder rotation back into one
        // revolution and restart the accumulator from the visible value.
        if mode.is_encoder() {
            self.display_angle = wrap(self.display_angle, FULL_TURN_DEG);
        }
        self.internal = self.value;
        DragEnd::Settled
    }

    /// Complete a settle animation started by [`end_drag`](Self::end_drag).
    ///
    /// Returns `false` (and does nothing) when the token is stale, i.e. a
    /// newer drag or external set has superseded the animation.
    pub fn finish_snap(&mut self, token: SnapToken) -> bool {
        if !self.snap_pending || token.0 != self.snap_rev {
            return false;
        }
        self.snap_pending = false;
        let lap = self.config.effective_lap();
        self.display_angle = value_to_display_angle(self.value, self.config.min(), lap);
        if self.mode().is_encoder() {
            self.display_angle = wrap(self.display_angle, FULL_TURN_DEG);
        }
        self.internal = self.value;
        true
    }

    /// Set the value from outside a drag.
    ///
    /// Ignored (returns `Ok(false)`) while a drag is active; the pointer
    /// owns the value then. Otherwise returns whether the value changed.
    pub fn set_value(&mut self, value: f64) -> Result<bool, KnobConfigError> {
        if self.drag.is_some() {
            return Ok(false);
        }
        if value < self.config.min() || value > self.config.max() {
            return Err(KnobConfigError::ValueOutOfBounds {
                value,
                min: self.config.min(),
                max: self.config.max(),
            });
        }
        let value = match &self.positions {
            Some(set) => set.nearest(value),
            None => value,
        };
        self.cancel_pending_snap();
        let changed = value != self.value;
        self.value = value;
        self.internal = value;
        let lap = self.config.effective_lap();
        self.display_angle = value_to_display_angle(value, self.config.min(), lap);
        if self.mode().is_encoder() {
            self.display_angle = wrap(self.display_angle, FULL_TURN_DEG);
        }
        if changed {
            self.value_rev += 1;
        }
        Ok(changed)
    }

    fn cancel_pending_snap(&mut self) {
        self.snap_rev += 1;
        self.snap_pending = false;
    }

    /// Map the accumulator onto the externally visible value for `mode`.
    ///
    /// With a position set the published value is always a set member, for
    /// digital knobs too: their smooth rotation is visual only, carried by
    /// the accumulator.
    fn quantize(&self, internal: f64, lap: f64, mode: Mode) -> f64 {
        let min = self.config.min();
        let continuous = if mode.is_encoder() {
            wrap(internal - min, lap) + min
        } else {
            internal
        };
        match &self.positions {
            Some(set) if mode.is_encoder() => set.nearest_wrapped(continuous, lap),
            Some(set) => set.nearest(continuous),
            None => continuous,
        }
    }

    /// Recompute the dial rotation from the current value.
    ///
    /// A dragged sticky knob follows the accumulator, not the snapped
    /// value, so the dial tracks the cursor. Encoders display
    /// `overflow + value` so the revolution count gathered in the
    /// accumulator survives quantization and the dial keeps turning
    /// smoothly across laps.
    fn sync_display_angle(&mut self) {
        let lap = self.config.effective_lap();
        let min = self.config.min();
        let display_value = if self.sticky && self.drag.is_some() {
            self.internal
        } else if self.mode().is_encoder() {
            self.encoder_overflow(lap) + self.value
        } else {
            self.value
        };
        self.display_angle = value_to_display_angle(display_value, min, lap);
    }

    /// Whole laps accumulated beyond the visible value window.
    fn encoder_overflow(&self, lap: f64) -> f64 {
        let min = self.config.min();
        let offset = wrap(self.internal - min, lap) + min;
        self.internal - offset
    }

    /// Build the settle request for a digital release.
    ///
    /// The value is already a set member from the last move; only the dial
    /// target is left to pick. For encoders the member's angle competes
    /// with its copies one lap up and down, so the dial settles along the
    /// short arc even when the snap crossed the seam.
    fn request_snap(&mut self, mode: Mode) -> SnapRequest {
        let lap = self.config.effective_lap();
        let min = self.config.min();
        let target_value = if mode.is_encoder() {
            let offset = wrap(self.internal - min, lap) + min;
            let mut target = self.value;
            for candidate in [self.value - lap, self.value + lap] {
                if (candidate - offset).abs() < (target - offset).abs() {
                    target = candidate;
                }
            }
            self.encoder_overflow(lap) + target
        } else {
            self.value
        };
        self.snap_rev += 1;
        self.snap_pending = true;
        SnapRequest {
            target_angle: value_to_display_angle(target_value, min, lap),
            token: SnapToken(self.snap_rev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{DeviceKind, DeviceMode};

    const CENTER: (f64, f64) = (100.0, 100.0);
    const NORTH: (f64, f64) = (100.0, 50.0);
    const EAST: (f64, f64) = (150.0, 100.0);
    const SOUTH: (f64, f64) = (100.0, 150.0);
    const WEST: (f64, f64) = (50.0, 100.0);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Cursor position at `deg` clockwise from north, 50px out from CENTER.
    fn cursor_at(deg: f64) -> (f64, f64) {
        let rad = deg.to_radians();
        (100.0 + rad.sin() * 50.0, 100.0 - rad.cos() * 50.0)
    }

    fn multi_turn(min: f64, max: f64) -> KnobState {
        KnobState::new(KnobOptions {
            min,
            max,
            ..Default::default()
        })
        .unwrap()
    }

    fn encoder(min: f64, max: f64) -> KnobState {
        KnobState::new(KnobOptions {
            min,
            max,
            infinite: true,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn initial_value_defaults_to_min() {
        let knob = multi_turn(5.0, 15.0);
        assert_eq!(knob.value(), 5.0);
        assert_eq!(knob.phase(), Phase::Idle);
        assert_eq!(knob.display_angle(), 0.0);
    }

    #[test]
    fn initial_value_out_of_bounds_is_rejected() {
        let err = KnobState::new(KnobOptions {
            min: 0.0,
            max: 10.0,
            value: Some(11.0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, KnobConfigError::ValueOutOfBounds { .. }));
    }

    #[test]
    fn initial_value_snaps_to_positions() {
        let knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 360.0,
            positions: Some(vec![0.0, 90.0, 180.0, 270.0]),
            value: Some(100.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(knob.value(), 90.0);
    }

    #[test]
    fn quarter_turn_moves_a_quarter_lap() {
        let mut knob = multi_turn(0.0, 100.0);
        knob.begin_drag(CENTER, NORTH);
        assert_eq!(knob.phase(), Phase::Dragging);
        let value = knob.drag_move(CENTER, EAST).unwrap();
        assert!(close(value, 25.0));
        assert!(close(knob.display_angle(), 90.0));
        assert_eq!(knob.end_drag(), DragEnd::Settled);
        assert_eq!(knob.phase(), Phase::Idle);
    }

    #[test]
    fn bounded_knob_clamps_at_max() {
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 100.0,
            value: Some(90.0),
            ..Default::default()
        })
        .unwrap();
        knob.begin_drag(CENTER, NORTH);
        // Half a turn is +50, clipped at 100.
        let value = knob.drag_move(CENTER, SOUTH).unwrap();
        assert!(close(value, 100.0));
        // Further clockwise motion cannot push past the bound.
        let value = knob.drag_move(CENTER, WEST).unwrap();
        assert!(close(value, 100.0));
        knob.end_drag();
        assert!(close(knob.display_angle(), 360.0));
    }

    #[test]
    fn encoder_wraps_across_the_lap() {
        // Range 0..10, one lap per revolution. From 9, a +72° turn adds 2
        // and wraps to 1.
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 10.0,
            infinite: true,
            value: Some(9.0),
            ..Default::default()
        })
        .unwrap();
        knob.begin_drag(CENTER, NORTH);
        let value = knob.drag_move(CENTER, cursor_at(72.0));
        assert!(close(value.unwrap(), 1.0));
        assert_eq!(knob.mode().device, DeviceMode::Encoder);
    }

    #[test]
    fn encoder_display_angle_normalizes_on_release() {
        let mut knob = encoder(0.0, 10.0);
        knob.begin_drag(CENTER, NORTH);
        // 45° steps, one and a quarter revolutions: 450° of rotation.
        for step in 1..=10 {
            knob.drag_move(CENTER, cursor_at(step as f64 * 45.0 % 360.0));
        }
        assert!(close(knob.display_angle(), 450.0));
        assert_eq!(knob.end_drag(), DragEnd::Settled);
        assert!(close(knob.display_angle(), 90.0));
        assert!(close(knob.value(), 2.5));
    }

    #[test]
    fn discrete_knob_snaps_while_dragging() {
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 360.0,
            positions: Some(vec![0.0, 90.0, 180.0, 270.0]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(knob.mode().kind, DeviceKind::Discrete);
        knob.begin_drag(CENTER, NORTH);
        // 100° of rotation is worth 100; the nearest stop is 90.
        let cursor = cursor_at(100.0);
        let value = knob.drag_move(CENTER, cursor).unwrap();
        assert!(close(value, 90.0));
        assert!(close(knob.display_angle(), 90.0));
        assert_eq!(knob.end_drag(), DragEnd::Settled);
        // The accumulator restarts from the snapped value.
        assert!(close(knob.value(), 90.0));
    }

    #[test]
    fn digital_knob_snaps_the_value_but_not_the_display() {
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 360.0,
            positions: Some(vec![0.0, 90.0, 180.0, 270.0]),
            sticky: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(knob.mode().kind, DeviceKind::Digital);
        knob.begin_drag(CENTER, NORTH);
        // The published value is the nearest stop on every move; only the
        // dial keeps following the cursor.
        let value = knob.drag_move(CENTER, cursor_at(100.0)).unwrap();
        assert!(close(value, 90.0));
        assert!(close(knob.display_angle(), 100.0));

        let DragEnd::Snap(request) = knob.end_drag() else {
            panic!("digital release must request a snap");
        };
        assert_eq!(knob.phase(), Phase::SnapPending);
        assert!(close(knob.value(), 90.0));
        assert!(close(request.target_angle, 90.0));

        assert!(knob.finish_snap(request.token));
        assert_eq!(knob.phase(), Phase::Idle);
        assert!(close(knob.display_angle(), 90.0));
        // A second completion with the same token is a no-op.
        assert!(!knob.finish_snap(request.token));
    }

    #[test]
    fn digital_encoder_settles_across_the_seam() {
        // Lap 10, stops at 1 and 9, starting on 9. Pushing clockwise past
        // the seam to a continuous 0.4 must settle forwards onto the next
        // lap's 1, not spin backwards through 9.
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 10.0,
            infinite: true,
            positions: Some(vec![1.0, 9.0]),
            sticky: true,
            value: Some(9.0),
            ..Default::default()
        })
        .unwrap();
        knob.begin_drag(CENTER, NORTH);
        // +50.4° of rotation on a lap of 10 is +1.4: the accumulator sits
        // at 10.4 (wrapped 0.4) and the published value snaps to 1.
        let value = knob.drag_move(CENTER, cursor_at(50.4)).unwrap();
        assert!(close(value, 1.0));
        assert!(close(knob.display_angle(), 374.4));

        let DragEnd::Snap(request) = knob.end_drag() else {
            panic!("digital release must request a snap");
        };
        // The stored value is the set member 1, but the dial target keeps
        // the accumulated lap: overflow 10 + 1 = 11 -> 396°, a short
        // clockwise settle from the current 374.4°.
        assert!(close(knob.value(), 1.0));
        assert!(close(request.target_angle, 396.0));

        assert!(knob.finish_snap(request.token));
        // After the settle the angle renormalizes into one revolution.
        assert!(close(knob.display_angle(), 36.0));
    }

    #[test]
    fn new_drag_invalidates_a_pending_snap() {
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 360.0,
            positions: Some(vec![0.0, 180.0]),
            sticky: true,
            ..Default::default()
        })
        .unwrap();
        knob.begin_drag(CENTER, NORTH);
        knob.drag_move(CENTER, SOUTH);
        let DragEnd::Snap(request) = knob.end_drag() else {
            panic!("expected a snap");
        };
        // Grab the knob again before the animation completes.
        knob.begin_drag(CENTER, SOUTH);
        assert_eq!(knob.phase(), Phase::Dragging);
        assert!(!knob.finish_snap(request.token));
    }

    #[test]
    fn set_value_is_ignored_while_dragging() {
        let mut knob = multi_turn(0.0, 100.0);
        knob.begin_drag(CENTER, NORTH);
        assert_eq!(knob.set_value(50.0), Ok(false));
        assert_eq!(knob.value(), 0.0);
        knob.end_drag();
        assert_eq!(knob.set_value(50.0), Ok(true));
        assert_eq!(knob.value(), 50.0);
        // Setting the same value again reports no change.
        assert_eq!(knob.set_value(50.0), Ok(false));
    }

    #[test]
    fn set_value_validates_and_snaps() {
        let mut knob = KnobState::new(KnobOptions {
            min: 0.0,
            max: 100.0,
            positions: Some(vec![0.0, 50.0, 100.0]),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            knob.set_value(150.0),
            Err(KnobConfigError::ValueOutOfBounds { .. })
        ));
        assert_eq!(knob.set_value(60.0), Ok(true));
        assert_eq!(knob.value(), 50.0);
        assert!(close(knob.display_angle(), 180.0));
    }

    #[test]
    fn value_revision_tracks_changes() {
        let mut knob = multi_turn(0.0, 100.0);
        let r0 = knob.value_revision();
        knob.begin_drag(CENTER, NORTH);
        knob.drag_move(CENTER, EAST);
        assert!(knob.value_revision() > r0);
        knob.end_drag();
        let r1 = knob.value_revision();
        knob.set_value(25.0).unwrap(); // no change, already 25
        assert_eq!(knob.value_revision(), r1);
    }

    #[test]
    fn counter_clockwise_from_min_stays_at_min() {
        let mut knob = multi_turn(0.0, 100.0);
        knob.begin_drag(CENTER, NORTH);
        // A small counter-clockwise step wraps the pointer angle to 350°
        // but must not move the value below min.
        let cursor = cursor_at(350.0);
        let value = knob.drag_move(CENTER, cursor).unwrap();
        assert!(close(value, 0.0));
        assert!(close(knob.display_angle(), 0.0));
    }

    #[test]
    fn drag_move_without_drag_is_none() {
        let mut knob = multi_turn(0.0, 100.0);
        assert_eq!(knob.drag_move(CENTER, EAST), None);
        assert_eq!(knob.end_drag(), DragEnd::Idle);
    }
}
