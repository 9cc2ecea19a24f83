#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type HeightMap = HashMap<usize, u32>;
#[cfg(not(feature = "std"))]
type HeightMap = BTreeMap<usize, u32>;

/// Measured heights recorded per item index.
///
/// The tracker only reports a change (and bumps its revision) when a measurement actually differs
/// from what is already recorded. Rendered item wrappers typically re-measure on every layout pass,
/// so redundant measurements must not invalidate the metrics table.
#[derive(Clone, Debug, Default)]
pub struct HeightTracker {
    heights: HeightMap,
    revision: u64,
}

impl HeightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `height` for `index`. Returns `true` if the recorded value changed.
    pub fn record(&mut self, index: usize, height: u32) -> bool {
        if self.heights.get(&index) == Some(&height) {
            return false;
        }
        self.heights.insert(index, height);
        self.revision = self.revision.wrapping_add(1);
        true
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.heights.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Monotonic counter bumped on every effective change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear(&mut self) {
        if self.heights.is_empty() {
            return;
        }
        self.heights.clear();
        self.revision = self.revision.wrapping_add(1);
    }

    /// Drops measurements for indices `>= count`.
    pub fn retain_below(&mut self, count: usize) {
        let before = self.heights.len();
        self.heights.retain(|&index, _| index < count);
        if self.heights.len() != before {
            self.revision = self.revision.wrapping_add(1);
        }
    }

    /// Iterates over `(index, height)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.heights.iter().map(|(&i, &h)| (i, h))
    }
}
