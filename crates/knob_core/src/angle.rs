//! Pointer-to-angle and angle-to-value conversions.
//!
//! Angles are degrees in screen convention: 0° points north (up) and values
//! grow clockwise, matching the dial's visual rotation. All functions here
//! are pure; malformed transient geometry degrades to an angle of `0.0`
//! rather than failing.

use std::f64::consts::TAU;

/// One full revolution, in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Euclidean-style modulo: result is always in `[0, d)` for `d > 0`.
///
/// A zero divisor yields `0.0` (a degenerate zero-span range pins the dial).
#[inline]
pub fn wrap(n: f64, d: f64) -> f64 {
    if d == 0.0 {
        return 0.0;
    }
    ((n % d) + d) % d
}

/// Clamp `value` into `[min, max]`.
#[inline]
pub fn winsorize(min: f64, value: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clockwise angle in `[0, 360)` of the line from `center` to `cursor`,
/// with 0° at north.
///
/// The mathematical `atan2` angle (0 = east, counter-clockwise-positive) is
/// rotated by 3π/2 so the result matches the dial's rotation convention.
/// A zero-length vector is treated as angle `0.0`.
pub fn pointer_angle(center: (f64, f64), cursor: (f64, f64)) -> f64 {
    let dx = center.0 - cursor.0;
    let dy = center.1 - cursor.1;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let rad = dy.atan2(dx) + 3.0 / 4.0 * TAU;
    wrap(rad, TAU) * FULL_TURN_DEG / TAU
}

/// Signed angular movement from `prev` to `curr`, both in `[0, 360)`.
///
/// Crossing the 0/360 seam is detected heuristically: `prev > 270 && curr < 90`
/// is a clockwise wrap, `prev < 90 && curr > 270` a counter-clockwise one.
/// This assumes no single tick moves more than ~180°; faster motion
/// misclassifies the wrap direction. Known limitation, kept by design.
pub fn angular_delta(prev: f64, curr: f64) -> f64 {
    if prev > 270.0 && curr < 90.0 {
        // Clockwise wrap - treat the next angle as past 360
        curr + 360.0 - prev
    } else if prev < 90.0 && curr > 270.0 {
        // Counter-clockwise wrap - treat the previous angle as past 360
        curr - prev - 360.0
    } else {
        curr - prev
    }
}

/// Convert an angular movement in degrees to a value movement, given the
/// value span of one revolution.
#[inline]
pub fn value_delta(delta_deg: f64, lap: f64) -> f64 {
    delta_deg / FULL_TURN_DEG * lap
}

/// Dial rotation in degrees for a value, relative to the `from` root angle.
///
/// May exceed 360° for multi-turn ranges; the caller decides whether to
/// normalize.
#[inline]
pub fn value_to_display_angle(value: f64, min: f64, lap: f64) -> f64 {
    if lap == 0.0 {
        return 0.0;
    }
    (value - min) / lap * FULL_TURN_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn pointer_angle_cardinal_directions() {
        let center = (100.0, 100.0);
        assert!(close(pointer_angle(center, (100.0, 50.0)), 0.0)); // north
        assert!(close(pointer_angle(center, (150.0, 100.0)), 90.0)); // east
        assert!(close(pointer_angle(center, (100.0, 150.0)), 180.0)); // south
        assert!(close(pointer_angle(center, (50.0, 100.0)), 270.0)); // west
    }

    #[test]
    fn pointer_angle_zero_vector_is_zero() {
        assert_eq!(pointer_angle((10.0, 10.0), (10.0, 10.0)), 0.0);
    }

    #[test]
    fn pointer_angle_stays_in_range() {
        let center = (0.0, 0.0);
        for i in 0..360 {
            let rad = (i as f64).to_radians();
            let cursor = (rad.cos() * 50.0, rad.sin() * 50.0);
            let a = pointer_angle(center, cursor);
            assert!((0.0..360.0).contains(&a), "angle {a} out of range");
        }
    }

    #[test]
    fn angular_delta_plain_motion() {
        assert!(close(angular_delta(10.0, 40.0), 30.0));
        assert!(close(angular_delta(200.0, 170.0), -30.0));
    }

    #[test]
    fn angular_delta_wraps_clockwise() {
        assert!(close(angular_delta(350.0, 20.0), 30.0));
    }

    #[test]
    fn angular_delta_wraps_counter_clockwise() {
        assert!(close(angular_delta(20.0, 350.0), -30.0));
    }

    #[test]
    fn value_delta_scales_by_lap() {
        assert!(close(value_delta(90.0, 100.0), 25.0));
        assert!(close(value_delta(72.0, 10.0), 2.0));
        assert!(close(value_delta(-36.0, 10.0), -1.0));
    }

    #[test]
    fn display_angle_round_trip() {
        // valueToDisplayAngle(valueFromDisplayAngle(a)) ≈ a for the analog path
        let (min, lap) = (10.0, 50.0);
        for a in [0.0, 45.0, 123.456, 359.9] {
            let value = min + value_delta(a, lap);
            assert!(close(value_to_display_angle(value, min, lap), a));
        }
    }

    #[test]
    fn degenerate_lap_pins_the_dial() {
        assert_eq!(value_to_display_angle(5.0, 5.0, 0.0), 0.0);
        assert_eq!(wrap(7.0, 0.0), 0.0);
    }

    #[test]
    fn wrap_is_always_non_negative() {
        assert!(close(wrap(-30.0, 360.0), 330.0));
        assert!(close(wrap(370.0, 360.0), 10.0));
        assert!(close(wrap(720.0, 360.0), 0.0));
    }
}
