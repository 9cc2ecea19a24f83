// Example: fixed-height windowing with the default options.
use virtual_scroll::{Align, ScrollOptions, VirtualScroll};

fn main() {
    let rows: Vec<String> = (0..1000).map(|i| format!("row {i}")).collect();
    let mut v = VirtualScroll::new(rows.len(), ScrollOptions::default());

    println!(
        "is_virtual={} total_height={} range={:?}",
        v.is_virtual(),
        v.total_height(),
        v.visible_range()
    );

    v.set_scroll_offset(5000);
    for (row, item) in v.windowed_items(&rows) {
        let marker = if item.is_visible { "*" } else { " " };
        println!("{marker} {:>6}px {row}", item.offset_top);
    }

    if let Some(offset) = v.scroll_to_index(999, Align::End) {
        println!("scroll_to_index(999, End) -> {offset}");
    }
}
