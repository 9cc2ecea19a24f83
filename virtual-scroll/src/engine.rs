use alloc::vec::Vec;
use core::cmp;

use crate::heights::HeightTracker;
use crate::metrics::{MetricsInputs, MetricsTable};
use crate::range;
use crate::{
    Align, ItemMetrics, ScrollDirection, ScrollOptions, ScrollSnapshot, ScrollState,
    VisibleRange, WindowedItem,
};

/// A headless windowing engine for a single list.
///
/// This type is UI-agnostic:
/// - It never sees item payloads, only the item count.
/// - Your adapter drives it by reporting container height, scroll offsets and (optionally)
///   measured item heights.
/// - Rendering is exposed via iteration over [`WindowedItem`]s.
///
/// The metrics table is rebuilt only when the item count, the fixed item height, the recorded
/// heights or the dynamic-height flag change. Scroll updates only re-run the range lookup.
#[derive(Clone, Debug)]
pub struct VirtualScroll {
    options: ScrollOptions,
    count: usize,
    scroll_offset: u64,
    container_height: u32,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    heights: HeightTracker,
    metrics: MetricsTable,
    metrics_inputs: MetricsInputs,
    metrics_revision: u64,
}

impl VirtualScroll {
    pub fn new(count: usize, options: ScrollOptions) -> Self {
        vdebug!(
            count,
            item_height = options.item_height,
            overscan = options.overscan,
            threshold = options.threshold,
            dynamic = options.enable_dynamic_height,
            "VirtualScroll::new"
        );
        let heights = HeightTracker::new();
        let metrics_inputs = MetricsInputs {
            count,
            item_height: options.item_height,
            heights_revision: 0,
            dynamic: options.enable_dynamic_height,
        };
        let metrics = MetricsTable::compute(
            count,
            options.item_height,
            &heights,
            options.enable_dynamic_height,
        );
        Self {
            count,
            scroll_offset: 0,
            container_height: options.container_height,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            heights,
            metrics,
            metrics_inputs,
            metrics_revision: 0,
            options,
        }
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    /// Replaces the options, rebuilding the metrics table only if a metrics input changed.
    ///
    /// `container_height` in the options is an initial estimate; it does not override a height
    /// already reported through [`Self::set_container_height`].
    pub fn set_options(&mut self, options: ScrollOptions) {
        vtrace!(
            item_height = options.item_height,
            overscan = options.overscan,
            threshold = options.threshold,
            dynamic = options.enable_dynamic_height,
            "VirtualScroll::set_options"
        );
        self.options = options;
        self.refresh_metrics();
    }

    /// Copies the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ScrollOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Replaces the collection size. Measurements for indices past the new end are dropped.
    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        self.count = count;
        self.heights.retain_below(count);
        self.refresh_metrics();
    }

    /// Whether windowing is active (the collection reaches the activation threshold).
    pub fn is_virtual(&self) -> bool {
        self.options.is_virtual_for(self.count)
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
    }

    /// Marks the list as scrolling and restarts the idle debounce window at `now_ms`.
    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Clears `is_scrolling` once `scroll_debounce_ms` elapsed since the last scroll event.
    ///
    /// Returns `true` if the flag was cleared by this call.
    pub fn update_scrolling(&mut self, now_ms: u64) -> bool {
        if !self.is_scrolling {
            return false;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) >= self.options.scroll_debounce_ms {
            self.set_is_scrolling(false);
            return true;
        }
        false
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            scroll_offset: self.scroll_offset,
            container_height: self.container_height,
            is_scrolling: self.is_scrolling,
        }
    }

    /// Returns `true` if the offset changed.
    pub fn set_scroll_offset(&mut self, offset: u64) -> bool {
        if self.scroll_offset == offset {
            return false;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        true
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) -> bool {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped)
    }

    /// Applies a scroll offset reported by the UI layer and marks the list as scrolling.
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        vtrace!(offset, now_ms, "apply_scroll_event");
        self.set_scroll_offset(offset);
        self.notify_scroll_event(now_ms);
    }

    /// Returns `true` if the height changed.
    pub fn set_container_height(&mut self, height: u32) -> bool {
        if self.container_height == height {
            return false;
        }
        vtrace!(height, "set_container_height");
        self.container_height = height;
        true
    }

    /// Records a measured height for `index`.
    ///
    /// Returns `true` if the metrics table was rebuilt. This is a no-op when dynamic heights are
    /// disabled, when `index` is out of range, or when `height` equals the recorded value.
    pub fn measure_item(&mut self, index: usize, height: u32) -> bool {
        if !self.options.enable_dynamic_height {
            return false;
        }
        if index >= self.count {
            vwarn!(index, count = self.count, "measure_item: out-of-range index");
            return false;
        }
        if !self.heights.record(index, height) {
            return false;
        }
        vtrace!(index, height, "measure_item");
        self.refresh_metrics()
    }

    /// Records several measurements, rebuilding the metrics table at most once.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> bool {
        if !self.options.enable_dynamic_height {
            return false;
        }
        let mut changed = false;
        for (index, height) in measurements {
            if index >= self.count {
                continue;
            }
            changed |= self.heights.record(index, height);
        }
        changed && self.refresh_metrics()
    }

    pub fn reset_measurements(&mut self) {
        self.heights.clear();
        self.refresh_metrics();
    }

    pub fn heights(&self) -> &HeightTracker {
        &self.heights
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.heights.get(index).is_some()
    }

    pub fn metrics(&self) -> &MetricsTable {
        &self.metrics
    }

    /// Incremented every time the metrics table is rebuilt.
    pub fn metrics_revision(&self) -> u64 {
        self.metrics_revision
    }

    pub fn total_height(&self) -> u64 {
        self.metrics.total_height()
    }

    pub fn item(&self, index: usize) -> Option<ItemMetrics> {
        self.metrics.get(index)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.metrics.index_at_offset(offset)
    }

    /// The window to render for the current scroll state.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range_for(self.scroll_offset, self.container_height)
    }

    pub fn visible_range_for(&self, scroll_offset: u64, container_height: u32) -> VisibleRange {
        if !self.is_virtual() {
            return range::full(self.count);
        }
        range::locate(
            &self.metrics,
            scroll_offset,
            container_height,
            self.options.overscan,
        )
    }

    /// The items that actually intersect the viewport (no overscan, no threshold bypass).
    pub fn viewport_range(&self) -> VisibleRange {
        range::locate_visible(&self.metrics, self.scroll_offset, self.container_height)
    }

    pub fn for_each_windowed_item(&self, mut f: impl FnMut(WindowedItem)) {
        let window = self.visible_range();
        if window.is_empty() {
            return;
        }
        let viewport = self.viewport_range();
        for m in &self.metrics.entries()[window.start..window.end] {
            f(WindowedItem {
                index: m.index,
                offset_top: m.offset_top,
                height: m.height,
                is_visible: viewport.contains(m.index),
            });
        }
    }

    /// Collects the windowed items into `out` (clears `out` first).
    ///
    /// For maximum performance, prefer `for_each_windowed_item` and reuse a scratch buffer.
    pub fn collect_windowed_items(&self, out: &mut Vec<WindowedItem>) {
        out.clear();
        self.for_each_windowed_item(|it| out.push(it));
    }

    /// Pairs the current window with the caller's items.
    ///
    /// `items` should hold the collection the engine was sized for. Window indices past
    /// `items.len()` are skipped.
    pub fn windowed_items<'a, T>(
        &'a self,
        items: &'a [T],
    ) -> impl Iterator<Item = (&'a T, WindowedItem)> + 'a {
        let window = self.visible_range();
        let viewport = self.viewport_range();
        let end = cmp::min(window.end, items.len());
        let start = cmp::min(window.start, end);
        self.metrics.entries()[start..end].iter().map(move |m| {
            (
                &items[m.index],
                WindowedItem {
                    index: m.index,
                    offset_top: m.offset_top,
                    height: m.height,
                    is_visible: viewport.contains(m.index),
                },
            )
        })
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.container_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Computes the clamped scroll offset that brings `index` into view with `align`.
    ///
    /// Returns `None` for an out-of-range index.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Option<u64> {
        let item = self.metrics.get(index)?;
        let view = self.container_height as u64;

        let target = match align {
            Align::Start => item.offset_top,
            Align::End => item.bottom().saturating_sub(view),
            Align::Center => {
                let center = item.offset_top.saturating_add(item.height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if item.offset_top >= cur && item.bottom() <= cur_end {
                    cur
                } else if item.offset_top < cur {
                    item.offset_top
                } else {
                    item.bottom().saturating_sub(view)
                }
            }
        };

        Some(self.clamp_scroll_offset(target))
    }

    /// Jumps to `index` (no animation) and returns the applied offset.
    ///
    /// This does not mark the list as scrolling.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        let offset = self.scroll_to_index_offset(index, align)?;
        self.set_scroll_offset(offset);
        Some(offset)
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        let mut heights: Vec<(usize, u32)> = self.heights.iter().collect();
        heights.sort_unstable_by_key(|&(index, _)| index);
        ScrollSnapshot {
            scroll_offset: self.scroll_offset,
            container_height: self.container_height,
            heights,
        }
    }

    /// Restores a snapshot taken with [`Self::snapshot`].
    ///
    /// Heights are applied only in dynamic mode and only for indices inside the current
    /// collection. The scroll offset is clamped after the heights are applied.
    pub fn restore(&mut self, snapshot: &ScrollSnapshot) {
        vdebug!(
            scroll_offset = snapshot.scroll_offset,
            heights = snapshot.heights.len(),
            "restore"
        );
        if snapshot.container_height > 0 {
            self.set_container_height(snapshot.container_height);
        }
        if self.options.enable_dynamic_height {
            let count = self.count;
            for &(index, height) in &snapshot.heights {
                if index < count {
                    self.heights.record(index, height);
                }
            }
            self.refresh_metrics();
        }
        self.set_scroll_offset_clamped(snapshot.scroll_offset);
        self.set_is_scrolling(false);
    }

    fn current_inputs(&self) -> MetricsInputs {
        let dynamic = self.options.enable_dynamic_height;
        MetricsInputs {
            count: self.count,
            item_height: self.options.item_height,
            // Recorded heights are ignored in fixed mode, so they must not invalidate the table.
            heights_revision: if dynamic { self.heights.revision() } else { 0 },
            dynamic,
        }
    }

    fn refresh_metrics(&mut self) -> bool {
        let inputs = self.current_inputs();
        if inputs == self.metrics_inputs {
            return false;
        }
        self.metrics = MetricsTable::compute(
            inputs.count,
            inputs.item_height,
            &self.heights,
            inputs.dynamic,
        );
        self.metrics_inputs = inputs;
        self.metrics_revision = self.metrics_revision.wrapping_add(1);
        vdebug!(
            count = inputs.count,
            total_height = self.metrics.total_height(),
            revision = self.metrics_revision,
            "rebuild_metrics"
        );
        true
    }
}
