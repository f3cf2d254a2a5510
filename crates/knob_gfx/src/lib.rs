//! egui frontend for `knob_core`.
//!
//! Splits the widget into the same seams the state machine has: `route`
//! turns pointer state into drag transitions, `anim` runs the digital
//! settle, `paint` draws the dial, and `widget` glues them together behind
//! a builder API.

pub mod anim;
pub mod paint;
pub(crate) mod route;
pub mod style;
pub mod widget;

pub use anim::{SNAP_SECS, SnapAnimation};
pub use style::KnobStyle;
pub use widget::Knob;
