// Example: minimal usage and scroll-to helper.
use virtual_window::{Align, VirtualWindow, WindowOptions};

fn main() -> Result<(), virtual_window::WindowError> {
    let rows: Vec<String> = (0..1_000_000).map(|i| format!("row {i}")).collect();
    let mut w = VirtualWindow::new(rows, WindowOptions::new(24))?;
    w.on_resize(480);
    w.on_scroll(123_456, 0);

    println!("total_height={}", w.total_height());
    println!("visible_range={:?}", w.visible_range());
    for row in w.visible_items().iter().take(3) {
        println!("  #{:>7} top={:>8} {}", row.index, row.offset_top, row.item);
    }

    let off = w.scroll_to_index(999_999, Align::End)?;
    println!("after scroll_to_index: offset={off} range={:?}", w.visible_range());

    if let Err(err) = w.scroll_to_index(1_000_000, Align::Start) {
        println!("ignored: {err}");
    }
    Ok(())
}
