//! UI-agnostic rotary knob state.
//!
//! This crate holds everything about a knob that is not pixels: range
//! configuration, pointer-angle math, the per-knob drag state machine, and
//! a store that owns many knobs and fans out value-change events. It has no
//! dependency on egui, winit, or any rendering code, so all of it is
//! testable headless.
//!
//! The typical flow:
//!
//! 1. register a knob with [`KnobStore::ensure_initial`];
//! 2. feed pointer samples through [`KnobControl`] during a drag;
//! 3. on a [`DragEnd::Snap`] outcome, animate to the requested angle and
//!    report back with [`KnobStore::finish_snap`];
//! 4. consume value changes via [`KnobStore::drain_events`] or
//!    [`KnobStore::subscribe`].

pub mod angle;
pub mod config;
pub mod error;
pub mod id;
pub mod knob;
pub mod mode;
pub mod positions;
pub mod store;
pub mod traits;

pub use angle::{FULL_TURN_DEG, pointer_angle};
pub use config::KnobConfig;
pub use error::KnobConfigError;
pub use id::KnobId;
pub use knob::{DragEnd, KnobOptions, KnobState, Phase, SnapRequest, SnapToken};
pub use mode::{DeviceKind, DeviceMode, Mode};
pub use positions::PositionSet;
pub use store::{KnobEvent, KnobStore};
pub use traits::KnobControl;
