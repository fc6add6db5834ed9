// ABOUTME: Search input debouncer
// ABOUTME: Holds back keystrokes until the input has been quiet for a fixed window

use std::time::{Duration, Instant};

/// Quiet period before a typed search term takes effect
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Collapses a burst of input changes into the last value of the burst.
///
/// Time is passed in explicitly so the event loop decides when to poll and
/// tests can drive the clock.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    value: String,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            value: String::new(),
            pending: None,
        }
    }

    /// Record a raw input change; replaces any value still waiting
    pub fn input(&mut self, raw: impl Into<String>, now: Instant) {
        self.pending = Some((raw.into(), now + self.delay));
    }

    /// When the pending value becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Release the pending value once its window has closed.
    ///
    /// Returns the new effective value only when it differs from the current
    /// one, so retyping the same term emits nothing.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => {}
            _ => return None,
        }
        let (next, _) = self.pending.take()?;
        if next == self.value {
            return None;
        }
        self.value = next.clone();
        Some(next)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
