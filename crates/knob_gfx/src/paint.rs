//! Dial painting.

use egui::{Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::style::KnobStyle;

/// Unit vector pointing `deg` clockwise from north, in screen coordinates.
#[inline]
fn direction(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Paint one knob into `rect`.
///
/// `angle_deg` is the total rotation clockwise from north (root angle plus
/// dial rotation); only its remainder mod 360 is visible.
pub fn paint_knob(painter: &Painter, rect: Rect, style: &KnobStyle, angle_deg: f32, active: bool) {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0;

    painter.circle(center, radius, style.body_fill, style.body_stroke);
    if active {
        painter.circle_filled(center, radius, style.active_tint);
    }

    if style.shine {
        painter.add(shine_arc(center, radius * 0.8));
    }

    // Marker from mid-hub to just inside the rim.
    let dir = direction(angle_deg);
    painter.line_segment(
        [
            center + dir * radius * 0.35,
            center + dir * radius * 0.85,
        ],
        style.marker_stroke,
    );
}

/// A faint highlight arc over the upper-left quadrant of the rim.
///
/// egui has no arc primitive, so the arc is a polyline of short segments.
fn shine_arc(center: Pos2, radius: f32) -> Shape {
    const SEGMENTS: usize = 12;
    // From west (270°) through north (0°/360°).
    let points: Vec<Pos2> = (0..=SEGMENTS)
        .map(|i| {
            let deg = 270.0 + 90.0 * i as f32 / SEGMENTS as f32;
            center + direction(deg) * radius
        })
        .collect();
    Shape::line(
        points,
        Stroke::new(1.5, egui::Color32::from_white_alpha(24)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_matches_screen_convention() {
        let north = direction(0.0);
        assert!(north.x.abs() < 1e-6 && (north.y + 1.0).abs() < 1e-6);
        let east = direction(90.0);
        assert!((east.x - 1.0).abs() < 1e-6 && east.y.abs() < 1e-6);
        let south = direction(180.0);
        assert!(south.x.abs() < 1e-6 && (south.y - 1.0).abs() < 1e-6);
    }
}
