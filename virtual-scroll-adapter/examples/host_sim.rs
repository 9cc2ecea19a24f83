// Example: a simulated host driving a VirtualList through scroll, frame and resize events.
use std::cell::Cell;
use std::rc::Rc;

use virtual_scroll::{Align, ScrollOptions};
use virtual_scroll_adapter::{
    FrameRequest, FrameScheduler, ScrollBehavior, ScrollContainer, Subscription, VirtualList,
};

#[derive(Debug, Default)]
struct FakeElement {
    scroll_top: u64,
    client_height: u32,
    listening: bool,
}

impl ScrollContainer for FakeElement {
    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn client_height(&self) -> u32 {
        self.client_height
    }

    fn scroll_to(&mut self, offset: u64, behavior: ScrollBehavior) {
        println!("  element.scroll_to({offset}, {behavior:?})");
        self.scroll_top = offset;
    }

    fn subscribe(&mut self) -> Subscription {
        self.listening = true;
        Subscription(1)
    }

    fn unsubscribe(&mut self, _subscription: Subscription) {
        self.listening = false;
    }
}

#[derive(Debug, Default)]
struct FrameQueue {
    next: u64,
    pending: Option<FrameRequest>,
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        let request = FrameRequest(self.next);
        self.pending = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}

fn main() {
    let opts = ScrollOptions::default().with_dynamic_height(true);
    let mut list: VirtualList<FakeElement, FrameQueue> =
        VirtualList::new(10_000, opts, FrameQueue::default());

    let spacer_height = Rc::new(Cell::new(0u64));
    let sink = Rc::clone(&spacer_height);
    list.attach_spacer(move |h: u64| sink.set(h));

    list.attach_container(FakeElement {
        client_height: 600,
        ..FakeElement::default()
    });
    println!(
        "attached: lifecycle={:?} spacer={} range={:?}",
        list.lifecycle(),
        spacer_height.get(),
        list.visible_range()
    );

    // A burst of wheel events within one frame: only the first requests a frame.
    let mut now_ms = 0u64;
    for step in 1..=4u64 {
        if let Some(el) = list.container_mut() {
            el.scroll_top = step * 120;
        }
        let requested = list.on_scroll(now_ms);
        println!("scroll event {step}: frame requested={requested}");
        now_ms += 2;
    }
    if let Some(request) = list.scheduler().pending {
        list.on_frame(request);
    }
    println!(
        "after frame: offset={} range={:?} coalesced={}",
        list.scroll_offset(),
        list.visible_range(),
        list.coordinator().coalesced_events()
    );

    // Rows report their layout heights.
    for item in list.windowed_items() {
        if item.index % 3 == 0 {
            list.measure_item(item.index, 80);
        }
    }
    println!("after measure: spacer={}", spacer_height.get());

    now_ms += 50;
    list.tick(now_ms);
    println!("idle: is_scrolling={}", list.is_scrolling());

    list.scroll_to_index(9_999, Align::End);

    if let Some(el) = list.detach_container() {
        println!("detached: listening={}", el.listening);
    }
}
