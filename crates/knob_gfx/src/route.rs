//! Pointer routing for the knob widget.
//!
//! One call per frame per knob turns egui's pointer state into the three
//! drag transitions of the state machine: press, move, release. Returns
//! whether the caller should request a repaint.

use egui::{CursorIcon, Event, PointerButton, Pos2, Rect, Response, Ui};
use knob_core::{DragEnd, KnobControl, KnobId};

use crate::anim::SnapAnimation;

fn to_point(pos: Pos2) -> (f64, f64) {
    (pos.x as f64, pos.y as f64)
}

pub(crate) fn route_knob_input<S: KnobControl + ?Sized>(
    ui: &mut Ui,
    resp: &Response,
    rect: Rect,
    id: KnobId,
    store: &mut S,
    anim: &mut SnapAnimation,
) -> bool {
    let mut request_repaint = false;
    let center = to_point(rect.center());
    let radius = rect.width().min(rect.height()) / 2.0;

    // Prefer response-scoped positions when available, fall back to the global pointer.
    let pointer_pos = |ui: &Ui| -> Option<Pos2> {
        resp.interact_pointer_pos()
            .or_else(|| resp.hover_pos())
            .or_else(|| ui.input(|i| i.pointer.interact_pos().or(i.pointer.latest_pos())))
    };

    if resp.hovered() || store.is_dragging(id) {
        ui.output_mut(|o| o.cursor_icon = CursorIcon::Grab);
    }

    // Pointer down inside the dial -> grab. Grabbing a settling knob takes
    // over from the current dial angle.
    if ui.input(|i| i.pointer.primary_pressed())
        && let Some(pos) = pointer_pos(ui)
        && pos.distance(rect.center()) <= radius
        && resp.hovered()
    {
        anim.cancel();
        store.begin_drag(id, center, to_point(pos));
        log::debug!(target: "knob.drag", "begin id={} at {:?}", id.as_raw(), pos);
        request_repaint = true;
    }

    if store.is_dragging(id) {
        if ui.input(|i| i.pointer.primary_down())
            && let Some(pos) = pointer_pos(ui)
        {
            store.drag_move(id, center, to_point(pos));
            request_repaint = true;
        }

        // Swallow secondary clicks so no context menu opens mid-gesture.
        ui.input_mut(|i| {
            i.events.retain(|e| {
                !matches!(
                    e,
                    Event::PointerButton {
                        button: PointerButton::Secondary,
                        ..
                    }
                )
            });
        });

        if ui.input(|i| i.pointer.primary_released()) {
            match store.end_drag(id) {
                DragEnd::Snap(request) => {
                    let from = store.display_angle(id).unwrap_or(request.target_angle);
                    let now = ui.input(|i| i.time);
                    anim.start(from, request.target_angle, request.token, now);
                    log::debug!(
                        target: "knob.drag",
                        "release id={} snapping to {:.1}°",
                        id.as_raw(),
                        request.target_angle
                    );
                }
                end => {
                    log::trace!(target: "knob.drag", "release id={} {:?}", id.as_raw(), end);
                }
            }
            request_repaint = true;
        }
    }

    request_repaint
}
