//! Query debouncing
//!
//! Raw query text is recorded on every edit; the settled value is released
//! only after the delay has passed without further edits. Time is passed in
//! by the caller so the behavior is deterministic under test.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    settled: String,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            settled: String::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an edit made at `now`
    pub fn set(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// When the pending edit settles, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.delay)
    }

    /// Release the pending text once the delay elapsed.
    ///
    /// Returns the newly settled text, or `None` if nothing changed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Settle the pending text immediately
    pub fn flush(&mut self) -> Option<&str> {
        let (text, _) = self.pending.take()?;
        if text == self.settled {
            return None;
        }
        self.settled = text;
        Some(&self.settled)
    }

    /// Last settled text
    pub fn settled(&self) -> &str {
        &self.settled
    }
}
