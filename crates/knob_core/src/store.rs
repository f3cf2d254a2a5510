//! Registry of knob state, keyed by [`KnobId`].
//!
//! The store is the single owner of all `KnobState`; frontends talk to it
//! through [`KnobControl`](crate::traits::KnobControl) and consume value
//! changes either by polling [`drain_events`](KnobStore::drain_events) or
//! through an mpsc [`subscribe`](KnobStore::subscribe) channel.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::KnobConfigError;
use crate::id::KnobId;
use crate::knob::{DragEnd, KnobOptions, KnobState, Phase, SnapToken};
use crate::mode::Mode;

/// A value change on one knob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobEvent {
    pub id: KnobId,
    pub value: f64,
}

/// Owns every knob's state and fans out change events.
#[derive(Default)]
pub struct KnobStore {
    knobs: HashMap<KnobId, KnobState>,
    events: Vec<KnobEvent>,
    listeners: Vec<Sender<KnobEvent>>,
}

impl KnobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a knob if it is not present yet. Idempotent, so the UI can
    /// call this every frame.
    pub fn ensure_initial(
        &mut self,
        id: KnobId,
        options: KnobOptions,
    ) -> Result<(), KnobConfigError> {
        if self.knobs.contains_key(&id) {
            return Ok(());
        }
        self.knobs.insert(id, KnobState::new(options)?);
        Ok(())
    }

    #[inline]
    pub fn has(&self, id: KnobId) -> bool {
        self.knobs.contains_key(&id)
    }

    pub fn value(&self, id: KnobId) -> Option<f64> {
        self.knobs.get(&id).map(|k| k.value())
    }

    pub fn mode(&self, id: KnobId) -> Option<Mode> {
        self.knobs.get(&id).map(|k| k.mode())
    }

    pub fn display_angle(&self, id: KnobId) -> Option<f64> {
        self.knobs.get(&id).map(|k| k.display_angle())
    }

    pub fn root_angle(&self, id: KnobId) -> Option<f64> {
        self.knobs.get(&id).map(|k| k.root_angle())
    }

    pub fn phase(&self, id: KnobId) -> Option<Phase> {
        self.knobs.get(&id).map(|k| k.phase())
    }

    pub fn is_dragging(&self, id: KnobId) -> bool {
        self.knobs.get(&id).is_some_and(|k| k.is_dragging())
    }

    pub fn value_revision(&self, id: KnobId) -> u64 {
        self.knobs.get(&id).map_or(0, |k| k.value_revision())
    }

    pub fn begin_drag(&mut self, id: KnobId, center: (f64, f64), cursor: (f64, f64)) {
        if let Some(knob) = self.knobs.get_mut(&id) {
            knob.begin_drag(center, cursor);
        }
    }

    /// Forward a pointer sample; emits a change event when a drag is live.
    pub fn drag_move(&mut self, id: KnobId, center: (f64, f64), cursor: (f64, f64)) {
        let moved = self
            .knobs
            .get_mut(&id)
            .and_then(|knob| knob.drag_move(center, cursor));
        if let Some(value) = moved {
            self.emit(KnobEvent { id, value });
        }
    }

    pub fn end_drag(&mut self, id: KnobId) -> DragEnd {
        let Some(knob) = self.knobs.get_mut(&id) else {
            return DragEnd::Idle;
        };
        let end = knob.end_drag();
        if let DragEnd::Snap(_) = end {
            let value = knob.value();
            self.emit(KnobEvent { id, value });
        }
        end
    }

    pub fn finish_snap(&mut self, id: KnobId, token: SnapToken) -> bool {
        self.knobs
            .get_mut(&id)
            .is_some_and(|k| k.finish_snap(token))
    }

    /// Set a knob's value from application code.
    pub fn set_value(&mut self, id: KnobId, value: f64) -> Result<bool, KnobConfigError> {
        let Some(knob) = self.knobs.get_mut(&id) else {
            return Ok(false);
        };
        let changed = knob.set_value(value)?;
        if changed {
            let value = knob.value();
            self.emit(KnobEvent { id, value });
        }
        Ok(changed)
    }

    /// Receive every future change event on a channel.
    pub fn subscribe(&mut self) -> Receiver<KnobEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    /// Take the events queued since the last drain, for per-frame polling.
    pub fn drain_events(&mut self) -> Vec<KnobEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: KnobEvent) {
        self.events.push(event);
        // Drop listeners whose receiving end is gone.
        self.listeners.retain(|tx| tx.send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: (f64, f64) = (100.0, 100.0);
    const NORTH: (f64, f64) = (100.0, 50.0);
    const EAST: (f64, f64) = (150.0, 100.0);

    fn percent_options() -> KnobOptions {
        KnobOptions {
            min: 0.0,
            max: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn ensure_initial_is_idempotent() {
        let mut store = KnobStore::new();
        let id = KnobId::from_raw(1);
        store.ensure_initial(id, percent_options()).unwrap();
        store.set_value(id, 40.0).unwrap();
        // Re-registering must not reset the existing knob.
        store.ensure_initial(id, percent_options()).unwrap();
        assert_eq!(store.value(id), Some(40.0));
    }

    #[test]
    fn missing_knob_reads_as_absent() {
        let mut store = KnobStore::new();
        let id = KnobId::from_raw(9);
        assert!(!store.has(id));
        assert_eq!(store.value(id), None);
        assert!(!store.is_dragging(id));
        assert_eq!(store.end_drag(id), DragEnd::Idle);
        assert_eq!(store.set_value(id, 1.0), Ok(false));
    }

    #[test]
    fn drag_emits_events() {
        let mut store = KnobStore::new();
        let id = KnobId::from_raw(1);
        store.ensure_initial(id, percent_options()).unwrap();
        store.begin_drag(id, CENTER, NORTH);
        store.drag_move(id, CENTER, EAST);
        store.end_drag(id);

        let events = store.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert!((events[0].value - 25.0).abs() < 1e-9);
        // Drained means gone.
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn subscribers_see_changes_and_dead_ones_are_dropped() {
        let mut store = KnobStore::new();
        let id = KnobId::from_raw(1);
        store.ensure_initial(id, percent_options()).unwrap();

        let rx = store.subscribe();
        let dead = store.subscribe();
        drop(dead);

        store.set_value(id, 30.0).unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.id, id);
        assert_eq!(event.value, 30.0);
        assert_eq!(store.listeners.len(), 1);
    }

    #[test]
    fn set_value_without_change_emits_nothing() {
        let mut store = KnobStore::new();
        let id = KnobId::from_raw(1);
        store.ensure_initial(id, percent_options()).unwrap();
        store.set_value(id, 0.0).unwrap();
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn digital_release_emits_the_snapped_value() {
        let mut store = KnobStore::new();
        let id = KnobId::from_raw(1);
        store
            .ensure_initial(
                id,
                KnobOptions {
                    min: 0.0,
                    max: 360.0,
                    positions: Some(vec![0.0, 90.0, 180.0, 270.0]),
                    sticky: true,
                    ..Default::default()
                },
            )
            .unwrap();
        store.begin_drag(id, CENTER, NORTH);
        store.drag_move(id, CENTER, EAST); // continuous 90, already a stop
        let DragEnd::Snap(request) = store.end_drag(id) else {
            panic!("digital release must request a snap");
        };
        assert!(store.finish_snap(id, request.token));

        let values: Vec<f64> = store.drain_events().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![90.0, 90.0]);
    }
}
