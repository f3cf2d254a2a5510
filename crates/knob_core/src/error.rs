//! Validation errors raised at configuration-mutation time.
//!
//! All failures here are synchronous and fatal to the mutation that caused
//! them; nothing in the drag path ever returns an error.

use std::fmt;

/// A rejected knob configuration change.
///
/// Each variant carries enough context to produce a distinct, user-facing
/// message. Runtime drag computation never produces these.
#[derive(Clone, Debug, PartialEq)]
pub enum KnobConfigError {
    /// `min` ended up above `max`.
    BoundsReversed { min: f64, max: f64 },
    /// `from` or `to` left the `[0, 360]` degree range.
    AngleOutOfRange { from: f64, to: Option<f64> },
    /// `value` violated `min <= value <= max`.
    ValueOutOfBounds { value: f64, min: f64, max: f64 },
    /// The position list contains a repeated value.
    NonUniquePositions,
    /// The position list has fewer than two entries.
    TooFewPositions,
    /// The position list is not a list of ordinary numbers (NaN present).
    NotOrderedNumeric,
    /// A position falls outside the `[min, max]` value range.
    PositionsOutOfBounds { min: f64, max: f64 },
}

impl fmt::Display for KnobConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsReversed { min, max } => {
                write!(f, "min '{min}' is greater than max '{max}'")
            }
            Self::AngleOutOfRange { from, to } => match to {
                Some(to) => write!(
                    f,
                    "angles from ('{from}') and to ('{to}') must be in bounds '0'..'360'"
                ),
                None => write!(f, "angle from ('{from}') must be in bounds '0'..'360'"),
            },
            Self::ValueOutOfBounds { value, min, max } => {
                write!(f, "value '{value}' is outside of bounds '{min}'..'{max}'")
            }
            Self::NonUniquePositions => write!(f, "positions do not contain unique values"),
            Self::TooFewPositions => {
                write!(f, "positions cannot contain less than two values")
            }
            Self::NotOrderedNumeric => write!(f, "positions is not an ordered list of numbers"),
            Self::PositionsOutOfBounds { min, max } => {
                write!(f, "positions contain values outside of bounds '{min}'..'{max}'")
            }
        }
    }
}

impl std::error::Error for KnobConfigError {}
