//! Discrete position sets and nearest-position selection.

use crate::error::KnobConfigError;

/// A validated, ascending list of discrete stop values.
///
/// Input order does not matter; the list is sorted on construction. At least
/// two unique, finite values are required and all of them must sit inside the
/// knob's `[min, max]` range.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionSet {
    sorted: Vec<f64>,
}

impl PositionSet {
    /// Validate `raw` against the value range and build a sorted set.
    pub fn new(raw: &[f64], min: f64, max: f64) -> Result<Self, KnobConfigError> {
        for (i, a) in raw.iter().enumerate() {
            for b in raw.iter().skip(i + 1) {
                if a == b {
                    return Err(KnobConfigError::NonUniquePositions);
                }
            }
        }
        if raw.len() < 2 {
            return Err(KnobConfigError::TooFewPositions);
        }
        if raw.iter().any(|p| p.is_nan()) {
            return Err(KnobConfigError::NotOrderedNumeric);
        }
        let mut sorted = raw.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        // Non-empty by the length check above.
        if sorted[0] < min || sorted[sorted.len() - 1] > max {
            return Err(KnobConfigError::PositionsOutOfBounds { min, max });
        }
        Ok(Self { sorted })
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.sorted
    }

    #[inline]
    pub fn first(&self) -> f64 {
        self.sorted[0]
    }

    #[inline]
    pub fn last(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Member of the set closest to `value`. On a tie the lower position
    /// wins, since replacement requires a strictly smaller distance.
    pub fn nearest(&self, value: f64) -> f64 {
        let mut best = self.sorted[0];
        for &p in &self.sorted[1..] {
            if (p - value).abs() < (best - value).abs() {
                best = p;
            }
        }
        best
    }

    /// Like [`nearest`](Self::nearest), but for an endlessly rotating range
    /// where the set wraps around every `lap`.
    ///
    /// Besides the real members, two phantom candidates compete: the last
    /// position one lap down and the first position one lap up. If a phantom
    /// wins, the matching real member is returned, so the caller still gets a
    /// value inside the configured range.
    pub fn nearest_wrapped(&self, value: f64, lap: f64) -> f64 {
        let mut best = self.nearest(value);
        let mut best_dist = (best - value).abs();

        let below = self.last() - lap;
        if (below - value).abs() < best_dist {
            best = self.last();
            best_dist = (below - value).abs();
        }
        let above = self.first() + lap;
        if (above - value).abs() < best_dist {
            best = self.first();
        }
        best
    }
}
