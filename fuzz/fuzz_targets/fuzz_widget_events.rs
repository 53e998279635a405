#![no_main]

use focus_countdown::store::{MemoryStore, PersistedStore};
use focus_countdown::widget::{Widget, WidgetContext, WidgetEvent};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    // Each line is one event; malformed lines are skipped like the event loop does
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut widget = Widget::new(
        PersistedStore::new(Arc::new(MemoryStore::new())),
        WidgetContext::default(),
    );
    widget.attach();
    for line in s.lines() {
        if let Ok(event) = serde_json::from_str::<WidgetEvent>(line) {
            widget.dispatch(event);
            let _ = widget.view();
        }
    }
});
