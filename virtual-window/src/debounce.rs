/// A single re-armable deadline that drives the `is_scrolling` hint.
///
/// Every `arm` replaces the outstanding deadline (debounce, not throttle), so at most one
/// deadline exists per instance. Time is supplied by the caller in milliseconds; the host
/// decides where it comes from (frame clock, timer, test script).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollingDebounce {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl ScrollingDebounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the delay. An armed deadline keeps the delay it was armed with.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Cancels any pending deadline and schedules a new one `delay_ms` after `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Returns `true` once, when the armed deadline has been reached, and disarms.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
