// Example: a leads table mounted on a simulated scroll container.
use std::convert::Infallible;

use virtual_window::{Align, VirtualWindow, WindowOptions};
use virtual_window_adapter::{Listener, ScrollHost, ViewportEvent, VirtualList};

#[derive(Clone, Debug)]
struct Lead {
    id: u32,
    company: String,
    stage: &'static str,
}

/// Stands in for a DOM element: clamps like a browser and counts its listeners.
#[derive(Debug, Default)]
struct Pane {
    scroll_top: u64,
    height: u32,
    content_height: u64,
    listeners: usize,
}

impl ScrollHost for Pane {
    type Error = Infallible;

    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        let max = self.content_height.saturating_sub(self.height as u64);
        self.scroll_top = scroll_top.min(max);
    }

    fn container_height(&self) -> u32 {
        self.height
    }

    fn attach(&mut self, _listener: Listener) -> Result<(), Infallible> {
        self.listeners += 1;
        Ok(())
    }

    fn detach(&mut self, _listener: Listener) {
        self.listeners -= 1;
    }
}

fn fetch_leads(range: std::ops::Range<u32>) -> Vec<Lead> {
    const STAGES: [&str; 4] = ["new", "contacted", "qualified", "proposal"];
    range
        .map(|id| Lead {
            id,
            company: format!("Company {id:05}"),
            stage: STAGES[id as usize % STAGES.len()],
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const ROW: u32 = 40;
    let leads = fetch_leads(100..50_100);
    let pane = Pane {
        height: 400,
        content_height: leads.len() as u64 * ROW as u64,
        ..Pane::default()
    };

    let window = VirtualWindow::new(leads, WindowOptions::new(ROW).with_overscan(3))?;
    let mut list = VirtualList::mount(window, pane)?;
    println!("mounted with {} listeners", list.host().listeners);

    // The user drags the scrollbar; the platform fires a scroll event.
    list.host_mut().set_scroll_top(12_345);
    list.handle_event(ViewportEvent::Scroll { now_ms: 16 });

    let frame = list.render(|lead, _, is_scrolling| {
        if is_scrolling {
            lead.company.clone()
        } else {
            format!("{} [{}]", lead.company, lead.stage)
        }
    });
    println!("spacer={}px rows={}", frame.spacer_height, frame.rows.len());
    for row in frame.rows.iter().take(3) {
        println!("  top={:>6} {}", row.offset_top, row.content);
    }

    // Jump to the lead a search box matched.
    let found = list
        .window()
        .items()
        .iter()
        .position(|lead| lead.id == 40_000)
        .unwrap_or(0);
    let off = list.scroll_to_index(found, Align::Auto, 32)?;
    println!("scrolled to #{found} at {off}px");

    // Ten new leads land at the top; keep the viewport on the same record.
    let refreshed: Vec<Lead> = fetch_leads(90..100)
        .into_iter()
        .chain(list.window().items().iter().cloned())
        .collect();
    list.host_mut().content_height += 10 * ROW as u64;
    let kept = list.replace_items(refreshed, |lead| lead.id);
    println!("anchored={kept} scroll_top={}", list.window().scroll_top());

    list.tick(500);
    let window = list.unmount();
    println!("unmounted; {} leads, scrolling={}", window.count(), window.is_scrolling());
    Ok(())
}
