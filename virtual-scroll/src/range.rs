use core::cmp;

use crate::VisibleRange;
use crate::metrics::MetricsTable;

/// Returns the minimal index range intersecting `[scroll_offset, scroll_offset + container_height)`,
/// widened by `overscan` items on each side and clamped to the table.
///
/// Intersection is half-open: an item whose bottom edge sits exactly on the viewport top, or
/// whose top edge sits exactly on the viewport bottom, is outside the viewport (it can still be
/// included through overscan). Zero-height items lying on the viewport top are inside it.
pub fn locate(
    table: &MetricsTable,
    scroll_offset: u64,
    container_height: u32,
    overscan: usize,
) -> VisibleRange {
    let visible = locate_visible(table, scroll_offset, container_height);
    widen(visible, overscan, table.len())
}

/// Same as [`locate`] without the overscan margin.
pub fn locate_visible(
    table: &MetricsTable,
    scroll_offset: u64,
    container_height: u32,
) -> VisibleRange {
    let entries = table.entries();
    if entries.is_empty() {
        return VisibleRange::EMPTY;
    }

    let viewport_end = scroll_offset.saturating_add(container_height as u64);

    let start = entries.partition_point(|m| m.ends_before(scroll_offset));
    // One past the last item whose top edge lies above the viewport bottom.
    let end = start + entries[start..].partition_point(|m| m.offset_top < viewport_end);

    VisibleRange {
        start,
        end: cmp::max(start, end),
    }
}

/// The window used when the collection is below the activation threshold.
pub fn full(count: usize) -> VisibleRange {
    VisibleRange {
        start: 0,
        end: count,
    }
}

pub(crate) fn widen(range: VisibleRange, overscan: usize, count: usize) -> VisibleRange {
    let end = cmp::min(count, range.end.saturating_add(overscan));
    let start = cmp::min(range.start.saturating_sub(overscan), end);
    VisibleRange { start, end }
}
