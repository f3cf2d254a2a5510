//! Range model: bounds, root/end angles, and the lap derivation.
//!
//! `KnobConfig` replaces string-reflected attribute storage with typed
//! fields. Every setter re-validates, so a stored config is always
//! internally consistent.

use crate::error::KnobConfigError;

/// Validated range configuration for one knob.
///
/// Reader quirks of the attribute surface are kept at the typed boundary:
/// `from == 360` reads as `0`, `to == 0` reads as `360`, and `to` reads as
/// unset while `infinite` is on.
#[derive(Clone, Debug, PartialEq)]
pub struct KnobConfig {
    min: f64,
    max: f64,
    from: f64,
    to: Option<f64>,
    /// Explicit lap, if one was configured. Ignored when `infinite` is on
    /// or `to` is set.
    lap: Option<f64>,
    infinite: bool,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 360.0,
            from: 0.0,
            to: None,
            lap: None,
            infinite: false,
        }
    }
}

impl KnobConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Root angle in `[0, 360)`; a configured `360` folds to `0`.
    #[inline]
    pub fn from(&self) -> f64 {
        if self.from == 360.0 { 0.0 } else { self.from }
    }

    /// End angle in `(0, 360]`, or `None` when unset or overridden by
    /// `infinite`; a configured `0` folds to `360`.
    #[inline]
    pub fn to(&self) -> Option<f64> {
        if self.infinite {
            return None;
        }
        self.to.map(|to| if to == 0.0 { 360.0 } else { to })
    }

    #[inline]
    pub fn infinite(&self) -> bool {
        self.infinite
    }

    /// Set both bounds at once. Fails if `min > max`.
    pub fn set_bounds(&mut self, min: f64, max: f64) -> Result<(), KnobConfigError> {
        if min > max {
            return Err(KnobConfigError::BoundsReversed { min, max });
        }
        self.min = min;
        self.max = max;
        Ok(())
    }

    pub fn set_min(&mut self, min: f64) -> Result<(), KnobConfigError> {
        self.set_bounds(min, self.max)
    }

    pub fn set_max(&mut self, max: f64) -> Result<(), KnobConfigError> {
        self.set_bounds(self.min, max)
    }

    pub fn set_from(&mut self, from: f64) -> Result<(), KnobConfigError> {
        if !(0.0..=360.0).contains(&from) || from.is_nan() {
            return Err(KnobConfigError::AngleOutOfRange { from, to: self.to });
        }
        self.from = from;
        Ok(())
    }

    pub fn set_to(&mut self, to: Option<f64>) -> Result<(), KnobConfigError> {
        if let Some(to) = to
            && (!(0.0..=360.0).contains(&to) || to.is_nan())
        {
            return Err(KnobConfigError::AngleOutOfRange {
                from: self.from,
                to: Some(to),
            });
        }
        self.to = to;
        Ok(())
    }

    pub fn set_lap(&mut self, lap: Option<f64>) {
        self.lap = lap;
    }

    pub fn set_infinite(&mut self, infinite: bool) {
        self.infinite = infinite;
    }

    /// Value span of one full 360° revolution, derived in priority order:
    ///
    /// 1. `infinite` → `max - min` (encoder wraps once per revolution);
    /// 2. `to` set → `(max - min)` scaled up by the inverse of the angular
    ///    span fraction, so the bounded arc covers the whole range;
    /// 3. explicit `lap` → that value;
    /// 4. otherwise → `max - min`.
    pub fn effective_lap(&self) -> f64 {
        let base = self.max - self.min;
        if self.infinite {
            return base;
        }
        if let Some(to) = self.to() {
            return base / angular_span_fraction(self.from(), to);
        }
        self.lap.unwrap_or(base)
    }
}

/// Fraction of a full revolution covered by the arc from `from` to `to`,
/// going clockwise.
///
/// `from == to` and the `0 → 360` pair both mean one complete revolution.
/// When `to` sits counter-clockwise of `from`, the arc is treated as
/// wrapping through north onto the "next" revolution.
pub fn angular_span_fraction(from: f64, to: f64) -> f64 {
    let span = if from == to || (from == 0.0 && to == 360.0) {
        360.0
    } else if from < to {
        to - from
    } else {
        to + 360.0 - from
    };
    span / 360.0
}
