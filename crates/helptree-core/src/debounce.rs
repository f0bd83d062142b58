//! Fixed-delay, last-write-wins deferral.
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling a new value
//! replaces the old one and restarts the delay, so a burst of input collapses
//! into a single firing carrying the final value. Nothing runs in the
//! background: the owner calls [`Debouncer::poll`] from its event loop.
//!
//! Time comes from [`tokio::time::Instant`], which reads the real clock
//! outside a runtime and the virtual clock inside a paused test runtime.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel anything outstanding and start a fresh delay for `value`.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}
