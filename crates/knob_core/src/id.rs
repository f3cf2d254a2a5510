//! Generic, UI-agnostic identifier for knob controls.
//!
//! This type intentionally uses a plain `u64` to avoid coupling to any
//! widget-framework identifier type. Integration layers can provide `From`
//! implementations to convert from their native ID types.

/// Opaque identifier for a knob within a [`KnobStore`](crate::KnobStore).
///
/// This is a lightweight, copyable handle. The actual value has no semantic
/// meaning within this crate—it's just a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KnobId(u64);

impl KnobId {
    /// Create a `KnobId` from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying raw value.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for KnobId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u32> for KnobId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw as u64)
    }
}

impl From<KnobId> for u64 {
    #[inline]
    fn from(id: KnobId) -> Self {
        id.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knob_id_round_trip() {
        let raw = 42u64;
        let id = KnobId::from_raw(raw);
        assert_eq!(id.as_raw(), raw);
    }

    #[test]
    fn knob_id_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(KnobId::from_raw(1));
        set.insert(KnobId::from_raw(2));
        set.insert(KnobId::from_raw(1)); // duplicate

        assert_eq!(set.len(), 2);
    }
}
