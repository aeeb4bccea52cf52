// Example: a host frame loop driving the `is_scrolling` hint.
use virtual_window::{VirtualWindow, WindowOptions};

fn main() -> Result<(), virtual_window::WindowError> {
    let rows: Vec<u32> = (0..10_000).collect();
    let mut w = VirtualWindow::new(rows, WindowOptions::new(20).with_scrolling_delay_ms(150))?;
    w.on_resize(400);

    // 60fps ticks; the user flicks the wheel for the first ~300ms.
    let mut now_ms = 0u64;
    let mut offset = 0u64;
    for frame in 0..40u64 {
        now_ms += 16;
        if now_ms <= 300 {
            offset += 60;
            w.on_scroll(offset, now_ms);
        }
        w.update_scrolling(now_ms);

        if frame % 4 == 0 {
            println!(
                "t={now_ms:>4}ms top={:>5} scrolling={} range={:?}",
                w.scroll_top(),
                w.is_scrolling(),
                w.visible_range()
            );
        }
    }
    Ok(())
}
