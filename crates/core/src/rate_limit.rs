//! Two-tier rate limiting for slider drags.
//!
//! A drag produces values far faster than the host settings store should
//! see them. Local feedback is throttled; commits to shared state are
//! debounced and always flushed when the drag ends.
//!
//! Time is passed in explicitly so callers decide the clock.

use std::time::{Duration, Instant};

/// Leading-edge throttle: lets a value through at most once per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Whether an update at `now` should pass.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Trailing debounce holding the latest value until input goes quiet.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(interval: Duration) -> Self {
        Self { interval, pending: None }
    }

    /// Replace the pending value and restart the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, since)) if now.saturating_duration_since(*since) >= self.interval => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Values released by one drag step.
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate<T> {
    /// Value to show locally, if the throttle let it through.
    pub local: Option<T>,
    /// Value to commit to shared state, if the debounce released one.
    pub commit: Option<T>,
}

/// Throttled local feedback plus debounced commits for one control.
#[derive(Debug, Clone)]
pub struct DragCommitter<T> {
    throttle: Throttle,
    debounce: Debounce<T>,
}

impl<T: Clone> DragCommitter<T> {
    pub fn new(throttle: Duration, debounce: Duration) -> Self {
        Self { throttle: Throttle::new(throttle), debounce: Debounce::new(debounce) }
    }

    pub fn drag(&mut self, value: T, now: Instant) -> DragUpdate<T> {
        let commit = self.debounce.poll(now);
        let local = self.throttle.ready(now).then(|| value.clone());
        self.debounce.push(value, now);
        DragUpdate { local, commit }
    }

    /// Release a commit if the drag has paused long enough.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.debounce.poll(now)
    }

    /// Drag finished: the last value is always returned if not yet committed.
    pub fn end(&mut self) -> Option<T> {
        self.throttle.reset();
        self.debounce.flush()
    }

    pub fn cancel(&mut self) {
        self.throttle.reset();
        self.debounce.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn throttle_passes_first_then_waits() {
        let start = Instant::now();
        let mut throttle = Throttle::new(MS * 30);

        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + MS * 10));
        assert!(throttle.ready(start + MS * 30));
    }

    #[test]
    fn debounce_keeps_latest_value() {
        let start = Instant::now();
        let mut debounce = Debounce::new(MS * 100);
        debounce.push(1, start);
        debounce.push(2, start + MS * 50);

        assert_eq!(debounce.poll(start + MS * 100), None);
        assert_eq!(debounce.poll(start + MS * 150), Some(2));
        assert_eq!(debounce.poll(start + MS * 300), None);
    }

    #[test]
    fn drag_end_flushes_terminal_value() {
        let start = Instant::now();
        let mut drag = DragCommitter::new(MS * 10, MS * 100);
        for step in 0..20u32 {
            drag.drag(400 + step, start + MS * step);
        }

        assert_eq!(drag.end(), Some(419));
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn paused_drag_commits() {
        let start = Instant::now();
        let mut drag = DragCommitter::new(MS * 10, MS * 100);

        let first = drag.drag(500, start);
        assert_eq!(first, DragUpdate { local: Some(500), commit: None });

        let later = drag.drag(600, start + MS * 200);
        assert_eq!(later.commit, Some(500));
        assert_eq!(later.local, Some(600));
        assert_eq!(drag.end(), Some(600));
    }

    #[test]
    fn cancel_drops_pending() {
        let start = Instant::now();
        let mut drag = DragCommitter::new(MS, MS * 100);
        drag.drag(1, start);
        drag.cancel();
        assert!(!drag.is_pending());
        assert_eq!(drag.end(), None);
    }
}
