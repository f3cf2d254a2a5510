//! Visual parameters of the knob widget.

use egui::{Color32, Stroke};

/// Colors and metrics for painting a knob.
///
/// The defaults give a small neutral dial with a contrasting marker, usable
/// on both light and dark backdrops.
#[derive(Clone, Debug, PartialEq)]
pub struct KnobStyle {
    /// Outer diameter in points.
    pub diameter: f32,
    pub body_fill: Color32,
    pub body_stroke: Stroke,
    /// The line from the hub towards the rim that shows the rotation.
    pub marker_stroke: Stroke,
    /// Overlay blended onto the body while the knob is grabbed.
    pub active_tint: Color32,
    /// Paint a light arc on the upper-left rim for a bit of depth.
    pub shine: bool,
}

impl Default for KnobStyle {
    fn default() -> Self {
        Self {
            diameter: 32.0,
            body_fill: Color32::from_gray(60),
            body_stroke: Stroke::new(1.0, Color32::from_gray(30)),
            marker_stroke: Stroke::new(2.0, Color32::from_gray(220)),
            active_tint: Color32::from_black_alpha(40),
            shine: true,
        }
    }
}
