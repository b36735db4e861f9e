//! Courtesy pauses between requests to the remote server.
//!
//! The driver never sleeps directly; it asks a [`Pacer`]. Production runs use
//! [`SleepPacer`]; `--no-delay` and tests use [`NoPacing`].

use std::thread;
use std::time::Duration;

/// Something that can wait between network calls.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the current thread for the full duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        tracing::debug!(delay_ms = duration.as_millis() as u64, "Pausing");
        thread::sleep(duration);
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&self, _duration: Duration) {}
}
