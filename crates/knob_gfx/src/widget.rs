//! The egui knob widget.
//!
//! `Knob` is a thin per-frame view over state owned by a
//! [`KnobControl`] store: it allocates the dial's rect, routes pointer
//! input, runs any settle animation, and paints. All value semantics live
//! in `knob_core`.

use egui::{Response, Sense, Ui, Vec2};
use knob_core::{KnobControl, KnobId, KnobOptions};

use crate::anim::SnapAnimation;
use crate::paint::paint_knob;
use crate::route::route_knob_input;
use crate::style::KnobStyle;

pub struct Knob {
    id: KnobId,
    options: KnobOptions,
    style: KnobStyle,
}

impl Knob {
    pub fn new(id: impl Into<KnobId>) -> Self {
        Self {
            id: id.into(),
            options: KnobOptions::default(),
            style: KnobStyle::default(),
        }
    }

    /// Configuration used when this id is seen for the first time. Existing
    /// knobs keep their registered configuration.
    pub fn options(mut self, options: KnobOptions) -> Self {
        self.options = options;
        self
    }

    pub fn style(mut self, style: KnobStyle) -> Self {
        self.style = style;
        self
    }

    pub fn diameter(mut self, diameter: f32) -> Self {
        self.style.diameter = diameter;
        self
    }

    pub fn show<S: KnobControl + ?Sized>(self, ui: &mut Ui, store: &mut S) -> Response {
        let desired = Vec2::splat(self.style.diameter);
        let (rect, mut resp) = ui.allocate_exact_size(desired, Sense::click_and_drag());

        if let Err(err) = store.ensure_initial(self.id, self.options) {
            log::warn!(
                target: "knob.widget",
                "rejected configuration for id={}: {err}",
                self.id.as_raw()
            );
            return resp;
        }

        // The settle animation is per-widget view state, not knob state, so
        // it lives in egui temp memory keyed by the knob id.
        let anim_id = ui.make_persistent_id(("knob-snap", self.id.as_raw()));
        let mut anim: SnapAnimation = ui
            .data_mut(|d| d.get_temp(anim_id))
            .unwrap_or_default();

        let rev_before = store.value_revision(self.id);
        let mut repaint = route_knob_input(ui, &resp, rect, self.id, store, &mut anim);

        let now = ui.input(|i| i.time);
        let dial = anim
            .tick(now, self.id, store)
            .or_else(|| store.display_angle(self.id))
            .unwrap_or(0.0);
        repaint |= anim.is_active() || store.is_dragging(self.id);

        if ui.is_rect_visible(rect) {
            let angle = store.root_angle(self.id).unwrap_or(0.0) + dial;
            paint_knob(
                ui.painter(),
                rect,
                &self.style,
                angle as f32,
                store.is_dragging(self.id),
            );
        }

        if store.value_revision(self.id) != rev_before {
            resp.mark_changed();
        }
        if repaint {
            ui.ctx().request_repaint();
        }
        ui.data_mut(|d| d.insert_temp(anim_id, anim));
        resp
    }
}
