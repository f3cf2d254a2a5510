//! Settle animation for digital knobs.
//!
//! When a digital knob is released, the state machine hands out a
//! [`SnapRequest`](knob_core::SnapRequest) and waits for the frontend to
//! finish the visual settle. `SnapAnimation` runs that settle over a fixed
//! duration and reports completion back through
//! [`KnobControl::finish_snap`]. It lives in egui temp memory, so it must
//! stay `Clone + Default`.

use knob_core::{KnobControl, KnobId, SnapToken};

/// Duration of the settle, in seconds.
pub const SNAP_SECS: f64 = 0.25;

#[derive(Clone, Debug)]
struct ActiveSnap {
    from: f64,
    to: f64,
    start: f64,
    token: SnapToken,
}

/// Interpolates the dial angle from release to the snapped position.
#[derive(Clone, Debug, Default)]
pub struct SnapAnimation {
    active: Option<ActiveSnap>,
}

/// Eased progress with a slight overshoot before coming to rest, so the
/// dial visibly "clicks" into its stop.
fn settle(t: f64) -> f64 {
    const C1: f64 = 0.6;
    const C3: f64 = C1 + 1.0;
    let u = t - 1.0;
    1.0 + C3 * u * u * u + C1 * u * u
}

impl SnapAnimation {
    /// Begin animating from the current dial angle towards `to`.
    pub fn start(&mut self, from: f64, to: f64, token: SnapToken, now: f64) {
        self.active = Some(ActiveSnap {
            from,
            to,
            start: now,
            token,
        });
    }

    /// Abandon the animation, e.g. because the knob was grabbed again. The
    /// state machine invalidates the token on its side.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the animation and return the dial angle to draw this frame,
    /// or `None` when no animation is running.
    ///
    /// On the final frame this reports completion to the store; a stale
    /// token makes that a no-op there, which is fine either way.
    pub fn tick<S: KnobControl + ?Sized>(
        &mut self,
        now: f64,
        id: KnobId,
        store: &mut S,
    ) -> Option<f64> {
        let snap = self.active.as_ref()?;
        let elapsed = now - snap.start;
        if elapsed >= SNAP_SECS {
            let token = snap.token;
            let to = snap.to;
            self.active = None;
            store.finish_snap(id, token);
            return Some(to);
        }
        let t = settle((elapsed / SNAP_SECS).clamp(0.0, 1.0));
        Some(snap.from + (snap.to - snap.from) * t)
    }
}
