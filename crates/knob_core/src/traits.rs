//! Abstraction over knob state access.
//!
//! Frontend code (e.g. the gfx widget) depends on this trait instead of the
//! concrete [`KnobStore`], which keeps paint and routing testable against
//! lightweight fakes.

use crate::error::KnobConfigError;
use crate::id::KnobId;
use crate::knob::{DragEnd, KnobOptions, Phase, SnapToken};
use crate::mode::Mode;
use crate::store::KnobStore;

/// Read/write access to knob interaction state.
pub trait KnobControl {
    fn ensure_initial(&mut self, id: KnobId, options: KnobOptions) -> Result<(), KnobConfigError>;
    fn has(&self, id: KnobId) -> bool;
    fn value(&self, id: KnobId) -> Option<f64>;
    fn mode(&self, id: KnobId) -> Option<Mode>;
    fn display_angle(&self, id: KnobId) -> Option<f64>;
    fn root_angle(&self, id: KnobId) -> Option<f64>;
    fn phase(&self, id: KnobId) -> Option<Phase>;
    fn is_dragging(&self, id: KnobId) -> bool;
    fn value_revision(&self, id: KnobId) -> u64;
    fn begin_drag(&mut self, id: KnobId, center: (f64, f64), cursor: (f64, f64));
    fn drag_move(&mut self, id: KnobId, center: (f64, f64), cursor: (f64, f64));
    fn end_drag(&mut self, id: KnobId) -> DragEnd;
    fn finish_snap(&mut self, id: KnobId, token: SnapToken) -> bool;
    fn set_value(&mut self, id: KnobId, value: f64) -> Result<bool, KnobConfigError>;
}

impl KnobControl for KnobStore {
    #[inline]
    fn ensure_initial(&mut self, id: KnobId, options: KnobOptions) -> Result<(), KnobConfigError> {
        KnobStore::ensure_initial(self, id, options)
    }

    #[inline]
    fn has(&self, id: KnobId) -> bool {
        KnobStore::has(self, id)
    }

    #[inline]
    fn value(&self, id: KnobId) -> Option<f64> {
        KnobStore::value(self, id)
    }

    #[inline]
    fn mode(&self, id: KnobId) -> Option<Mode> {
        KnobStore::mode(self, id)
    }

    #[inline]
    fn display_angle(&self, id: KnobId) -> Option<f64> {
        KnobStore::display_angle(self, id)
    }

    #[inline]
    fn root_angle(&self, id: KnobId) -> Option<f64> {
        KnobStore::root_angle(self, id)
    }

    #[inline]
    fn phase(&self, id: KnobId) -> Option<Phase> {
        KnobStore::phase(self, id)
    }

    #[inline]
    fn is_dragging(&self, id: KnobId) -> bool {
        KnobStore::is_dragging(self, id)
    }

    #[inline]
    fn value_revision(&self, id: KnobId) -> u64 {
        KnobStore::value_revision(self, id)
    }

    #[inline]
    fn begin_drag(&mut self, id: KnobId, center: (f64, f64), cursor: (f64, f64)) {
        KnobStore::begin_drag(self, id, center, cursor)
    }

    #[inline]
    fn drag_move(&mut self, id: KnobId, center: (f64, f64), cursor: (f64, f64)) {
        KnobStore::drag_move(self, id, center, cursor)
    }

    #[inline]
    fn end_drag(&mut self, id: KnobId) -> DragEnd {
        KnobStore::end_drag(self, id)
    }

    #[inline]
    fn finish_snap(&mut self, id: KnobId, token: SnapToken) -> bool {
        KnobStore::finish_snap(self, id, token)
    }

    #[inline]
    fn set_value(&mut self, id: KnobId, value: f64) -> Result<bool, KnobConfigError> {
        KnobStore::set_value(self, id, value)
    }
}
