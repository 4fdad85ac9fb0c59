//! Time abstraction: every wall-clock read and every sleep the orchestrators
//! perform goes through this trait, so the real-time loop (spec §4.6/§4.7)
//! can be driven by a deterministic, instantly-advancing clock in tests
//! instead of the real one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::time::{sleep, Duration};

/// Source of wall-clock time and sleeps for the real-time orchestration
/// loops. `now()` returns fractional seconds since the Unix epoch — purely
/// for trace timestamps and drift logging, never for policy decisions.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current time, in fractional seconds since the Unix epoch.
    fn now(&self) -> f64;

    /// Sleep until `at` (fractional seconds since the Unix epoch). If `at`
    /// is already in the past, returns immediately.
    async fn sleep_until(&self, at: f64);
}

/// Real wall-clock backed by [`SystemTime`] and [`tokio::time::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is before the Unix epoch")
            .as_secs_f64()
    }

    async fn sleep_until(&self, at: f64) {
        let remaining = at - self.now();
        if remaining > 0.0 {
            sleep(Duration::from_secs_f64(remaining)).await;
        }
    }
}

/// Deterministic clock for orchestrator tests: `now()` is an atomic counter
/// that only moves forward when explicitly advanced, and `sleep_until`
/// jumps straight to the target time rather than actually waiting.
///
/// This makes orchestrator loop tests — bounded-lag handling, drift
/// reporting — run in microseconds and produce identical results on every
/// run, instead of depending on scheduler jitter.
pub struct VirtualClock {
    now_micros: AtomicU64,
}

impl VirtualClock {
    /// Start the clock at `start` (fractional seconds since the epoch).
    pub fn new(start: f64) -> Self {
        Self {
            now_micros: AtomicU64::new((start * 1_000_000.0) as u64),
        }
    }

    /// Move the clock forward by `seconds`, returning the new `now()`.
    pub fn advance(&self, seconds: f64) -> f64 {
        let delta = (seconds * 1_000_000.0) as u64;
        self.now_micros.fetch_add(delta, Ordering::SeqCst);
        self.now()
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> f64 {
        self.now_micros.load(Ordering::SeqCst) as f64 / 1_000_000.0
    }

    async fn sleep_until(&self, at: f64) {
        let current = self.now();
        if at > current {
            let micros = ((at - current) * 1_000_000.0) as u64;
            self.now_micros.fetch_add(micros, Ordering::SeqCst);
        }
    }
}
