//! Trailing-edge debounce for search input.
//!
//! Every keystroke replaces the pending text and pushes the deadline out by the
//! quiet window. The caller polls with the current instant (or sleeps until
//! [`Debouncer::deadline`]) and receives the committed text at most once per burst.

use std::time::Duration;
use tokio::time::Instant;

/// Default quiet window.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Pending-input debouncer.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Pending>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_WINDOW)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a keystroke at `now`, replacing any pending timer.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.quiet,
        });
    }

    /// When the pending text will commit, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending text if its quiet window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.pending {
            Some(ref p) if now >= p.deadline => self.pending.take().map(|p| p.text),
            _ => None,
        }
    }

    /// Take the pending text immediately, bypassing the timer.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.text)
    }

    /// Drop any pending text.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_commits_once_with_last_value() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        for (i, text) in ["b", "ba", "bat", "batm", "batman"].iter().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            debouncer.input(*text, at);
            assert_eq!(debouncer.poll(at), None);
        }

        let last = start + Duration::from_millis(400);
        assert_eq!(debouncer.poll(last + Duration::from_millis(499)), None);
        assert_eq!(
            debouncer.poll(last + Duration::from_millis(500)).as_deref(),
            Some("batman")
        );
        assert_eq!(debouncer.poll(last + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_keystroke_resets_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();

        debouncer.input("a", start);
        debouncer.input("ab", start + Duration::from_millis(450));
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(950))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
    }

    #[test]
    fn test_flush_and_cancel() {
        let mut debouncer = Debouncer::default();
        let now = Instant::now();

        debouncer.input("dune", now);
        assert_eq!(debouncer.flush().as_deref(), Some("dune"));
        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.flush(), None);

        debouncer.input("dune", now);
        debouncer.cancel();
        assert_eq!(debouncer.poll(now + Duration::from_secs(1)), None);
    }
}
