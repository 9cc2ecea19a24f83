// Example: dynamic height measurement and snapshot restore.
use virtual_scroll::{ScrollOptions, VirtualScroll};

fn main() {
    let opts = ScrollOptions::default()
        .with_dynamic_height(true)
        .with_container_height(300);
    let mut v = VirtualScroll::new(500, opts);
    v.set_scroll_offset(200);

    println!(
        "before: total={} range={:?} rev={}",
        v.total_height(),
        v.visible_range(),
        v.metrics_revision()
    );

    // Rendered wrappers report their layout height after each pass.
    let changed = v.measure_item(3, 120);
    let again = v.measure_item(3, 120);
    println!(
        "measure(3, 120): rebuilt={changed} repeated={again} total={} rev={}",
        v.total_height(),
        v.metrics_revision()
    );

    let snap = v.snapshot();
    let mut restored = VirtualScroll::new(500, opts);
    restored.restore(&snap);
    println!(
        "restored: offset={} total={}",
        restored.scroll_offset(),
        restored.total_height()
    );
}
