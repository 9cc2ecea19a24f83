use crate::*;

use alloc::vec::Vec;

/// Fixed-seed generator for the randomized layout checks (64-bit LCG, high bits only).
struct Lcg {
    state: u64,
}

impl Lcg {
    fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 11
    }

    /// Uniform-ish value in `lo..hi`; `lo` when the span is empty.
    fn between(&mut self, lo: u64, hi: u64) -> u64 {
        match hi.checked_sub(lo) {
            Some(span) if span > 0 => lo + self.step() % span,
            _ => lo,
        }
    }

    fn index(&mut self, hi: usize) -> usize {
        self.between(0, hi as u64) as usize
    }

    fn height(&mut self, hi: u32) -> u32 {
        self.between(0, hi as u64) as u32
    }

    fn coin(&mut self) -> bool {
        self.step() & 1 == 1
    }
}

fn virtual_list(count: usize) -> VirtualScroll {
    // Threshold 0 keeps windowing active for any count.
    VirtualScroll::new(count, ScrollOptions::default().with_threshold(0))
}

fn dynamic_list(count: usize) -> VirtualScroll {
    VirtualScroll::new(
        count,
        ScrollOptions::default()
            .with_threshold(0)
            .with_dynamic_height(true),
    )
}

fn intersecting(table: &MetricsTable, scroll_offset: u64, container_height: u32) -> Vec<usize> {
    let viewport_end = scroll_offset + container_height as u64;
    table
        .entries()
        .iter()
        .filter(|m| {
            let reaches_top = m.bottom() > scroll_offset || m.offset_top >= scroll_offset;
            reaches_top && m.offset_top < viewport_end
        })
        .map(|m| m.index)
        .collect()
}

#[test]
fn scenario_top_of_list() {
    let v = VirtualScroll::new(1000, ScrollOptions::default());
    assert!(v.is_virtual());
    assert_eq!(v.visible_range(), VisibleRange { start: 0, end: 13 });
}

#[test]
fn scenario_scrolled_to_item_100() {
    let mut v = VirtualScroll::new(1000, ScrollOptions::default());
    v.set_scroll_offset(5000);
    assert_eq!(v.visible_range(), VisibleRange { start: 95, end: 113 });
}

#[test]
fn scenario_below_threshold_renders_everything() {
    let mut v = VirtualScroll::new(50, ScrollOptions::default());
    assert!(!v.is_virtual());
    for offset in [0u64, 1, 400, 1249, 2500, 10_000] {
        v.set_scroll_offset(offset);
        assert_eq!(v.visible_range(), VisibleRange { start: 0, end: 50 });
    }
}

#[test]
fn scenario_dynamic_measurement_shifts_later_offsets() {
    let mut v = VirtualScroll::new(1000, ScrollOptions::default().with_dynamic_height(true));
    let before = v.metrics().clone();
    let rev = v.metrics_revision();

    assert!(v.measure_item(3, 120));
    assert_eq!(v.metrics_revision(), rev + 1);
    assert_eq!(v.total_height(), before.total_height() + 70);
    for i in 0..=3 {
        assert_eq!(
            v.item(i).unwrap().offset_top,
            before.get(i).unwrap().offset_top
        );
    }
    assert_eq!(v.item(3).unwrap().height, 120);
    for i in 4..1000 {
        assert_eq!(
            v.item(i).unwrap().offset_top,
            before.get(i).unwrap().offset_top + 70
        );
    }

    // Re-measuring with the same height must not rebuild.
    assert!(!v.measure_item(3, 120));
    assert_eq!(v.metrics_revision(), rev + 1);
}

#[test]
fn scenario_scroll_to_last_item_aligned_end() {
    let v = VirtualScroll::new(1000, ScrollOptions::default());
    let expected = 999u64 * 50 + 50 - 400;
    assert_eq!(v.max_scroll_offset(), 50_000 - 400);
    assert_eq!(v.scroll_to_index_offset(999, Align::End), Some(expected));
}

#[test]
fn empty_collection_yields_empty_table_and_range() {
    let v = virtual_list(0);
    assert!(v.metrics().is_empty());
    assert_eq!(v.total_height(), 0);
    assert_eq!(v.visible_range(), VisibleRange::EMPTY);
    assert_eq!(v.index_at_offset(0), None);
    assert_eq!(v.scroll_to_index_offset(0, Align::Start), None);

    let mut out = Vec::new();
    v.collect_windowed_items(&mut out);
    assert!(out.is_empty());
}

#[test]
fn scroll_offset_past_the_end_returns_tail_range() {
    let mut v = VirtualScroll::new(1000, ScrollOptions::default());
    v.set_scroll_offset(1_000_000);
    let r = v.visible_range();
    assert_eq!(r, VisibleRange { start: 995, end: 1000 });

    v.set_scroll_offset(u64::MAX);
    let r = v.visible_range();
    assert!(r.start <= r.end && r.end <= 1000);
}

#[test]
fn zero_height_container_keeps_overscan_window() {
    let mut v = virtual_list(100);
    v.set_container_height(0);
    v.set_scroll_offset(500);
    let r = v.visible_range();
    assert_eq!(r, VisibleRange { start: 5, end: 15 });
    assert!(v.viewport_range().is_empty());
}

#[test]
fn offsets_are_contiguous_and_total_matches_sum() {
    let mut rng = Lcg::seeded(0x5eed_0001);
    for _ in 0..50 {
        let count = rng.index(300);
        let mut v = dynamic_list(count);
        if rng.coin() {
            v.update_options(|o| o.item_height = rng.height(120));
        }
        for _ in 0..rng.index(40) {
            if count == 0 {
                break;
            }
            let i = rng.index(count);
            v.measure_item(i, rng.height(400));
        }

        let entries = v.metrics().entries();
        assert_eq!(entries.len(), count);
        let mut sum = 0u64;
        for (i, m) in entries.iter().enumerate() {
            assert_eq!(m.index, i);
            assert_eq!(m.offset_top, sum);
            if i + 1 < entries.len() {
                assert!(entries[i + 1].offset_top >= m.offset_top);
                assert_eq!(entries[i + 1].offset_top, m.offset_top + m.height as u64);
            }
            sum += m.height as u64;
        }
        assert_eq!(v.total_height(), sum);
    }
}

#[test]
fn fixed_mode_ignores_recorded_heights() {
    let mut heights = HeightTracker::new();
    heights.record(1, 500);
    let table = MetricsTable::compute(3, 10, &heights, false);
    assert_eq!(table.total_height(), 30);
    let table = MetricsTable::compute(3, 10, &heights, true);
    assert_eq!(table.total_height(), 520);
}

#[test]
fn visible_range_is_minimal_overscanned_cover() {
    let mut rng = Lcg::seeded(0x5eed_0002);
    for _ in 0..200 {
        let count = rng.between(1, 200) as usize;
        let overscan = rng.index(8);
        let mut v = VirtualScroll::new(
            count,
            ScrollOptions::default()
                .with_threshold(0)
                .with_overscan(overscan)
                .with_dynamic_height(true)
                .with_item_height(rng.height(80)),
        );
        for i in 0..count {
            if rng.coin() {
                v.measure_item(i, rng.height(150));
            }
        }
        let total = v.total_height();
        let offset = rng.between(0, total + 200);
        let height = rng.height(600);
        v.set_scroll_offset(offset);
        v.set_container_height(height);

        let r = v.visible_range();
        assert!(r.start <= r.end && r.end <= count);

        let hits = intersecting(v.metrics(), offset, height);
        if let (Some(&first), Some(&last)) = (hits.first(), hits.last()) {
            assert_eq!(r.start, first.saturating_sub(overscan));
            assert_eq!(r.end, (last + 1 + overscan).min(count));
            assert_eq!(
                v.viewport_range(),
                VisibleRange {
                    start: first,
                    end: last + 1
                }
            );
        } else {
            assert!(r.len() <= 2 * overscan);
        }
    }
}

#[test]
fn threshold_bypass_holds_for_any_offset() {
    let mut rng = Lcg::seeded(0x5eed_0003);
    for _ in 0..100 {
        let threshold = rng.between(1, 300) as usize;
        let count = rng.index(threshold);
        let mut v = VirtualScroll::new(count, ScrollOptions::default().with_threshold(threshold));
        v.set_scroll_offset(rng.between(0, 100_000));
        v.set_container_height(rng.height(1000));
        assert!(!v.is_virtual());
        assert_eq!(v.visible_range(), VisibleRange { start: 0, end: count });
    }
}

#[test]
fn threshold_boundary_activates_windowing() {
    let v = VirtualScroll::new(100, ScrollOptions::default());
    assert!(v.is_virtual());
    let v = VirtualScroll::new(99, ScrollOptions::default());
    assert!(!v.is_virtual());
}

#[test]
fn calculations_are_idempotent() {
    let mut v = dynamic_list(500);
    v.measure_item(10, 77);
    v.set_scroll_offset(4321);

    let heights = v.heights().clone();
    let a = MetricsTable::compute(500, 50, &heights, true);
    let b = MetricsTable::compute(500, 50, &heights, true);
    assert_eq!(a, b);
    assert_eq!(&a, v.metrics());

    let r1 = range::locate(&a, 4321, 400, 5);
    let r2 = range::locate(&a, 4321, 400, 5);
    assert_eq!(r1, r2);
    assert_eq!(v.visible_range(), v.visible_range());
    assert_eq!(v.visible_range(), r1);
}

#[test]
fn scrolling_does_not_rebuild_metrics() {
    let mut v = virtual_list(1000);
    let rev = v.metrics_revision();
    for offset in (0..20_000).step_by(137) {
        v.set_scroll_offset(offset);
        let _ = v.visible_range();
    }
    v.set_container_height(800);
    v.set_overscan(2);
    v.update_options(|o| o.threshold = 10);
    assert_eq!(v.metrics_revision(), rev);

    v.update_options(|o| o.item_height = 20);
    assert_eq!(v.metrics_revision(), rev + 1);
    assert_eq!(v.total_height(), 20_000);
}

#[test]
fn measure_is_noop_when_dynamic_height_disabled() {
    let mut v = virtual_list(10);
    let rev = v.metrics_revision();
    assert!(!v.measure_item(3, 120));
    assert!(!v.is_measured(3));
    assert_eq!(v.total_height(), 500);
    assert_eq!(v.metrics_revision(), rev);
}

#[test]
fn measure_ignores_out_of_range_index() {
    let mut v = dynamic_list(10);
    assert!(!v.measure_item(10, 120));
    assert!(v.heights().is_empty());
}

#[test]
fn measure_many_rebuilds_once() {
    let mut v = dynamic_list(10);
    let rev = v.metrics_revision();
    assert!(v.measure_many([(0, 10), (1, 20), (2, 30), (99, 5)]));
    assert_eq!(v.metrics_revision(), rev + 1);
    assert_eq!(v.total_height(), 10 + 20 + 30 + 7 * 50);
    assert!(!v.measure_many([(0, 10), (1, 20)]));
}

#[test]
fn toggling_dynamic_height_applies_recorded_heights() {
    let mut v = dynamic_list(4);
    v.measure_item(0, 100);
    assert_eq!(v.total_height(), 250);

    v.update_options(|o| o.enable_dynamic_height = false);
    assert_eq!(v.total_height(), 200);

    v.update_options(|o| o.enable_dynamic_height = true);
    assert_eq!(v.total_height(), 250);
}

#[test]
fn set_count_replaces_collection_and_drops_stale_heights() {
    let mut v = dynamic_list(10);
    v.measure_item(2, 10);
    v.measure_item(8, 10);

    v.set_count(5);
    assert_eq!(v.count(), 5);
    assert!(v.is_measured(2));
    assert!(!v.is_measured(8));
    assert_eq!(v.total_height(), 10 + 4 * 50);

    v.set_count(10);
    assert_eq!(v.item(8).unwrap().height, 50);
}

#[test]
fn reset_measurements_restores_fixed_heights() {
    let mut v = dynamic_list(3);
    v.measure_item(1, 5);
    v.reset_measurements();
    assert_eq!(v.total_height(), 150);
    assert!(v.heights().is_empty());
}

#[test]
fn scroll_to_index_alignments() {
    let mut v = virtual_list(1000);
    assert_eq!(v.scroll_to_index_offset(100, Align::Start), Some(5000));
    assert_eq!(v.scroll_to_index_offset(100, Align::End), Some(5050 - 400));
    assert_eq!(v.scroll_to_index_offset(100, Align::Center), Some(5025 - 200));
    // Clamped at both ends.
    assert_eq!(v.scroll_to_index_offset(0, Align::End), Some(0));
    assert_eq!(v.scroll_to_index_offset(999, Align::Start), Some(49_600));

    v.set_scroll_offset(5000);
    assert_eq!(v.scroll_to_index_offset(102, Align::Auto), Some(5000));
    assert_eq!(v.scroll_to_index_offset(50, Align::Auto), Some(2500));
    assert_eq!(v.scroll_to_index_offset(200, Align::Auto), Some(10_050 - 400));
}

#[test]
fn scroll_to_invalid_index_is_noop() {
    let mut v = virtual_list(10);
    v.set_scroll_offset(30);
    assert_eq!(v.scroll_to_index(10, Align::Start), None);
    assert_eq!(v.scroll_to_index(usize::MAX, Align::Center), None);
    assert_eq!(v.scroll_offset(), 30);
}

#[test]
fn scroll_to_index_applies_offset_without_scrolling_flag() {
    let mut v = virtual_list(1000);
    assert_eq!(v.scroll_to_index(100, Align::Start), Some(5000));
    assert_eq!(v.scroll_offset(), 5000);
    assert!(!v.is_scrolling());
    assert_eq!(v.scroll_direction(), Some(ScrollDirection::Forward));
}

#[test]
fn windowed_items_carry_positions_and_visibility() {
    let mut v = VirtualScroll::new(1000, ScrollOptions::default().with_overscan(2));
    v.set_scroll_offset(1000);

    let mut out = Vec::new();
    v.collect_windowed_items(&mut out);
    let indexes: Vec<usize> = out.iter().map(|it| it.index).collect();
    assert_eq!(indexes, (18..30).collect::<Vec<_>>());
    for it in &out {
        assert_eq!(it.offset_top, it.index as u64 * 50);
        assert_eq!(it.height, 50);
        assert_eq!(it.is_visible, (20..28).contains(&it.index));
    }
}

#[test]
fn windowed_items_pair_with_caller_slice() {
    let rows: Vec<u32> = (0..200).map(|i| i * 10).collect();
    let mut v = VirtualScroll::new(rows.len(), ScrollOptions::default());
    v.set_scroll_offset(2500);

    let pairs: Vec<(u32, usize)> = v
        .windowed_items(&rows)
        .map(|(row, it)| (*row, it.index))
        .collect();
    assert_eq!(pairs.first(), Some(&(450, 45)));
    assert_eq!(pairs.last(), Some(&(620, 62)));
    assert!(pairs.iter().all(|&(row, i)| row == i as u32 * 10));
}

#[test]
fn windowed_items_skip_indices_past_short_slice() {
    let rows: Vec<u32> = (0..30).collect();
    let mut v = virtual_list(100);
    v.set_scroll_offset(1200);

    let indexes: Vec<usize> = v.windowed_items(&rows).map(|(_, it)| it.index).collect();
    assert_eq!(indexes, (19..30).collect::<Vec<_>>());
    assert_eq!(v.windowed_items(&rows[..10]).count(), 0);
}

#[test]
fn zero_height_rows_at_viewport_top_are_visible() {
    let v = VirtualScroll::new(1000, ScrollOptions::default().with_item_height(0));
    assert_eq!(v.total_height(), 0);
    assert_eq!(v.visible_range(), VisibleRange { start: 0, end: 1000 });
    assert_eq!(v.index_at_offset(0), Some(0));

    let mut v = VirtualScroll::new(
        1000,
        ScrollOptions::default()
            .with_item_height(0)
            .with_overscan(2),
    );
    v.set_container_height(0);
    assert_eq!(v.viewport_range(), VisibleRange { start: 0, end: 0 });
    assert_eq!(v.visible_range(), VisibleRange { start: 0, end: 2 });
}

#[test]
fn zero_height_measurements_do_not_skip_ahead() {
    let mut v = VirtualScroll::new(
        200,
        ScrollOptions::default().with_dynamic_height(true),
    );
    for i in 0..150 {
        v.measure_item(i, 0);
    }
    assert_eq!(v.item(150).map(|m| m.offset_top), Some(0));
    assert_eq!(v.viewport_range(), VisibleRange { start: 0, end: 158 });
    assert_eq!(v.visible_range(), VisibleRange { start: 0, end: 163 });

    v.set_scroll_offset(100);
    assert_eq!(v.viewport_range(), VisibleRange { start: 152, end: 160 });
}

#[test]
fn locate_visible_omits_overscan() {
    let table = MetricsTable::compute(100, 20, &HeightTracker::new(), false);
    assert_eq!(
        range::locate_visible(&table, 100, 60),
        VisibleRange { start: 5, end: 8 }
    );
    assert_eq!(
        range::locate(&table, 100, 60, 3),
        VisibleRange { start: 2, end: 11 }
    );
    assert_eq!(range::locate_visible(&table, 5000, 60), VisibleRange { start: 100, end: 100 });
    assert_eq!(range::full(7), VisibleRange { start: 0, end: 7 });
}

#[test]
fn clamped_offset_stops_at_last_page() {
    let mut v = virtual_list(100);
    assert_eq!(v.max_scroll_offset(), 4600);
    assert!(v.set_scroll_offset_clamped(9999));
    assert_eq!(v.scroll_offset(), 4600);
    assert!(!v.set_scroll_offset_clamped(4601));

    v.apply_scroll_event(300, 10);
    assert_eq!(
        v.scroll_state(),
        ScrollState {
            scroll_offset: 300,
            container_height: 400,
            is_scrolling: true,
        }
    );
}

#[test]
fn index_at_offset_maps_into_item() {
    let v = virtual_list(10);
    assert_eq!(v.index_at_offset(0), Some(0));
    assert_eq!(v.index_at_offset(49), Some(0));
    assert_eq!(v.index_at_offset(50), Some(1));
    assert_eq!(v.index_at_offset(10_000), Some(9));
}

#[test]
fn scrolling_flag_clears_after_debounce() {
    let mut v = VirtualScroll::new(
        1000,
        ScrollOptions::default().with_scroll_debounce_ms(100),
    );
    v.apply_scroll_event(10, 1000);
    assert!(v.is_scrolling());
    assert_eq!(v.scroll_direction(), Some(ScrollDirection::Forward));

    assert!(!v.update_scrolling(1050));
    v.apply_scroll_event(5, 1080);
    assert_eq!(v.scroll_direction(), Some(ScrollDirection::Backward));
    assert!(!v.update_scrolling(1150));
    assert!(v.update_scrolling(1180));
    assert!(!v.is_scrolling());
    assert_eq!(v.scroll_direction(), None);
    assert!(!v.update_scrolling(5000));
}

#[test]
fn snapshot_restores_offset_and_heights() {
    let mut v = dynamic_list(100);
    v.measure_item(7, 90);
    v.measure_item(3, 10);
    v.set_container_height(300);
    v.set_scroll_offset(1200);

    let snap = v.snapshot();
    assert_eq!(snap.heights, alloc::vec![(3, 10), (7, 90)]);

    let mut restored = dynamic_list(100);
    restored.apply_scroll_event(1, 0);
    restored.restore(&snap);
    assert_eq!(restored.scroll_offset(), 1200);
    assert_eq!(restored.container_height(), 300);
    assert_eq!(restored.total_height(), v.total_height());
    assert!(!restored.is_scrolling());
}

#[test]
fn restore_clamps_offset_and_skips_foreign_heights() {
    let snap = ScrollSnapshot {
        scroll_offset: 1_000_000,
        container_height: 0,
        heights: alloc::vec![(1, 100), (50, 100)],
    };

    let mut v = dynamic_list(10);
    v.restore(&snap);
    assert_eq!(v.container_height(), DEFAULT_CONTAINER_HEIGHT);
    assert_eq!(v.total_height(), 550);
    assert_eq!(v.scroll_offset(), 150);

    let mut fixed = virtual_list(10);
    fixed.restore(&snap);
    assert_eq!(fixed.total_height(), 500);
    assert_eq!(fixed.scroll_offset(), 100);
}

#[test]
fn height_tracker_reports_only_changes() {
    let mut t = HeightTracker::new();
    assert!(t.record(1, 10));
    let rev = t.revision();
    assert!(!t.record(1, 10));
    assert_eq!(t.revision(), rev);
    assert!(t.record(1, 11));
    assert_eq!(t.revision(), rev + 1);

    t.retain_below(1);
    assert!(t.is_empty());
    assert_eq!(t.revision(), rev + 2);
}

#[test]
fn default_options_match_documented_values() {
    let o = ScrollOptions::default();
    assert_eq!(o.item_height, 50);
    assert_eq!(o.overscan, 5);
    assert_eq!(o.threshold, 100);
    assert_eq!(o.container_height, 400);
    assert!(!o.enable_dynamic_height);
    assert_eq!(o.scroll_debounce_ms, 16);
}

#[test]
fn threshold_decides_windowing() {
    let options = ScrollOptions::new().with_threshold(100);
    assert_eq!(options, ScrollOptions::default().with_threshold(100));
    assert!(!options.is_virtual_for(99));
    assert!(options.is_virtual_for(100));
    assert_eq!(VirtualScroll::new(100, options).is_virtual(), options.is_virtual_for(100));
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults_for_missing_fields() {
    let o: ScrollOptions =
        serde_json::from_str(r#"{ "item_height": 32, "enable_dynamic_height": true }"#).unwrap();
    assert_eq!(
        o,
        ScrollOptions::default()
            .with_item_height(32)
            .with_dynamic_height(true)
    );
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_survives_json_storage() {
    let mut v = dynamic_list(20);
    v.measure_item(4, 70);
    v.set_scroll_offset(300);
    let json = serde_json::to_string(&v.snapshot()).unwrap();
    let snap: ScrollSnapshot = serde_json::from_str(&json).unwrap();

    let mut restored = dynamic_list(20);
    restored.restore(&snap);
    assert_eq!(restored.scroll_offset(), 300);
    assert_eq!(restored.item(4).unwrap().height, 70);
}
