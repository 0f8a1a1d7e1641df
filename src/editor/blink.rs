use std::time::{Duration, Instant};

/// Caret blink bookkeeping.
///
/// The editor never drives the clock. Activity restarts the cycle with the
/// caret shown, and the presentation layer calls [`tick`](Self::tick) once
/// per frame with its own reading of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBlink {
    visible: bool,
    last_blink: Instant,
    interval: Duration,
}

impl CursorBlink {
    pub const fn new(interval: Duration, now: Instant) -> Self {
        Self {
            visible: true,
            last_blink: now,
            interval,
        }
    }

    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// When the caret last changed phase or was reset.
    pub const fn last_blink(&self) -> Instant {
        self.last_blink
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Show the caret and restart the cycle at `now`.
    pub const fn reset(&mut self, now: Instant) {
        self.visible = true;
        self.last_blink = now;
    }

    /// Flip visibility if a full interval has passed since the last phase
    /// change. Returns `true` when the caret changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_blink) <= self.interval {
            return false;
        }
        self.visible = !self.visible;
        self.last_blink = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_starts_visible() {
        let now = Instant::now();
        let blink = CursorBlink::new(INTERVAL, now);
        assert!(blink.visible());
        assert_eq!(blink.last_blink(), now);
    }

    #[test]
    fn test_tick_within_interval_keeps_phase() {
        let start = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL, start);
        assert!(!blink.tick(start + Duration::from_millis(500)));
        assert!(blink.visible());
    }

    #[test]
    fn test_tick_after_interval_toggles() {
        let start = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL, start);
        let later = start + Duration::from_millis(501);
        assert!(blink.tick(later));
        assert!(!blink.visible());
        assert_eq!(blink.last_blink(), later);

        assert!(blink.tick(later + Duration::from_millis(600)));
        assert!(blink.visible());
    }

    #[test]
    fn test_tick_with_earlier_clock_reading_is_ignored() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut blink = CursorBlink::new(INTERVAL, start);
        assert!(!blink.tick(start - Duration::from_millis(900)));
        assert!(blink.visible());
    }

    #[test]
    fn test_reset_shows_caret() {
        let start = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL, start);
        blink.tick(start + Duration::from_secs(1));
        assert!(!blink.visible());

        let now = start + Duration::from_secs(2);
        blink.reset(now);
        assert!(blink.visible());
        assert_eq!(blink.last_blink(), now);
    }
}
