use alloc::vec::Vec;

use crate::ItemMetrics;
use crate::heights::HeightTracker;

/// Per-item `{index, offset_top, height}` rows plus the total content height.
///
/// Invariant: `entries[i + 1].offset_top == entries[i].offset_top + entries[i].height`, so the
/// table is sorted by offset and can be binary searched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsTable {
    entries: Vec<ItemMetrics>,
    total_height: u64,
}

impl MetricsTable {
    /// Builds the table for `count` items.
    ///
    /// When `dynamic` is set, recorded heights from `heights` override `item_height`; otherwise
    /// every item uses `item_height`.
    pub fn compute(count: usize, item_height: u32, heights: &HeightTracker, dynamic: bool) -> Self {
        let mut entries = Vec::with_capacity(count);
        let mut offset = 0u64;
        for index in 0..count {
            let height = if dynamic {
                heights.get(index).unwrap_or(item_height)
            } else {
                item_height
            };
            entries.push(ItemMetrics {
                index,
                offset_top: offset,
                height,
            });
            offset = offset.saturating_add(height as u64);
        }
        Self {
            entries,
            total_height: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ItemMetrics> {
        self.entries.get(index).copied()
    }

    pub fn entries(&self) -> &[ItemMetrics] {
        &self.entries
    }

    pub fn total_height(&self) -> u64 {
        self.total_height
    }

    /// Returns the index of the item covering `offset`, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let i = self.entries.partition_point(|m| m.ends_before(offset));
        Some(i.min(self.entries.len() - 1))
    }
}

/// The inputs a [`MetricsTable`] was built from.
///
/// The engine compares these before rebuilding so that scroll ticks never pay for an `O(n)` pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MetricsInputs {
    pub(crate) count: usize,
    pub(crate) item_height: u32,
    pub(crate) heights_revision: u64,
    pub(crate) dynamic: bool,
}
