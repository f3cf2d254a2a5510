//! Behavioral mode classification.
//!
//! A knob's behavior is the product of two independent axes: how its range
//! maps onto rotation (the device), and how values quantize (the kind).
//! Both are derived from configuration, never stored.

use crate::config::KnobConfig;
use crate::positions::PositionSet;

/// How the value range maps onto dial rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceMode {
    /// Endless rotation; the value wraps around every lap.
    Encoder,
    /// Bounded range that may take several revolutions to traverse.
    MultiTurn,
    /// Bounded range covered by a single arc between `from` and `to`.
    SingleTurn,
}

/// How values quantize along the range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    /// Continuous values.
    Analog,
    /// Values snap to the position set while dragging.
    Discrete,
    /// Values snap to the position set on release, with a settle animation.
    Digital,
}

/// Full behavioral mode of a knob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode {
    pub device: DeviceMode,
    pub kind: DeviceKind,
}

impl Mode {
    /// Derive the mode from the current configuration.
    ///
    /// `infinite` forces an encoder; a `to` angle forces a single turn;
    /// everything else is multi-turn. Positions without `sticky` quantize
    /// continuously (discrete); with `sticky` they settle on release
    /// (digital).
    pub fn classify(config: &KnobConfig, positions: Option<&PositionSet>, sticky: bool) -> Self {
        let device = if config.infinite() {
            DeviceMode::Encoder
        } else if config.to().is_some() {
            DeviceMode::SingleTurn
        } else {
            DeviceMode::MultiTurn
        };
        let kind = match positions {
            None => DeviceKind::Analog,
            Some(_) if sticky => DeviceKind::Digital,
            Some(_) => DeviceKind::Discrete,
        };
        Self { device, kind }
    }

    #[inline]
    pub fn is_encoder(self) -> bool {
        self.device == DeviceMode::Encoder
    }

    #[inline]
    pub fn is_digital(self) -> bool {
        self.kind == DeviceKind::Digital
    }
}
