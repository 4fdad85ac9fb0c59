//! Windowed observer: turns a monotonic cumulative counter into per-window
//! deltas.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::binding::read_usage;
use crate::error::{GovernorError, Result};

/// Maintains the single piece of state needed to turn `cpu.stat`'s
/// cumulative counter into a per-window delta: the last reading.
pub struct WindowedObserver {
    cgroup_path: PathBuf,
    last_usage_us: Option<u64>,
    regressions_observed: u64,
}

impl WindowedObserver {
    /// Construct an observer bound to a cgroup path. Must be [`init`](Self::init)ed
    /// before the first [`measure`](Self::measure).
    pub fn new(cgroup_path: impl Into<PathBuf>) -> Self {
        Self {
            cgroup_path: cgroup_path.into(),
            last_usage_us: None,
            regressions_observed: 0,
        }
    }

    /// Path of the cgroup this observer reads from.
    pub fn cgroup_path(&self) -> &Path {
        &self.cgroup_path
    }

    /// Read the current cumulative counter and store it as the baseline.
    /// Must be called once before the first window.
    pub fn init(&mut self) -> Result<()> {
        self.last_usage_us = Some(read_usage(&self.cgroup_path)?);
        Ok(())
    }

    /// Measure usage for the just-completed window: `current - last`.
    ///
    /// If the counter went backwards — a kernel reset or 64-bit wraparound —
    /// the delta is clamped to zero and an observability event is recorded
    /// (a `tracing::warn!` plus [`regressions_observed`](Self::regressions_observed)),
    /// rather than failing the run. Crashing the governor over one
    /// underreported window is worse than the data loss itself.
    pub fn measure(&mut self) -> Result<u64> {
        let last = self
            .last_usage_us
            .ok_or(GovernorError::NotInitialized)?;

        let current = read_usage(&self.cgroup_path)?;

        let delta = if current < last {
            self.regressions_observed += 1;
            warn!(
                cgroup = %self.cgroup_path.display(),
                last,
                current,
                "cpu.stat usage_usec went backwards; clamping window delta to 0"
            );
            0
        } else {
            current - last
        };

        self.last_usage_us = Some(current);
        Ok(delta)
    }

    /// Number of counter regressions observed and clamped to zero so far.
    pub fn regressions_observed(&self) -> u64 {
        self.regressions_observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_stat(dir: &Path, usage_usec: u64) {
        fs::write(
            dir.join("cpu.stat"),
            format!("usage_usec {usage_usec}\n"),
        )
        .unwrap();
    }

    #[test]
    fn measure_before_init_fails() {
        let dir = tempdir().unwrap();
        let mut observer = WindowedObserver::new(dir.path());
        let err = observer.measure().unwrap_err();
        assert!(matches!(err, GovernorError::NotInitialized));
    }

    #[test]
    fn measure_returns_delta_since_init() {
        let dir = tempdir().unwrap();
        write_stat(dir.path(), 1_000);
        let mut observer = WindowedObserver::new(dir.path());
        observer.init().unwrap();

        write_stat(dir.path(), 1_500);
        assert_eq!(observer.measure().unwrap(), 500);

        write_stat(dir.path(), 2_100);
        assert_eq!(observer.measure().unwrap(), 600);
    }

    #[test]
    fn regression_clamps_to_zero_and_is_recorded() {
        let dir = tempdir().unwrap();
        write_stat(dir.path(), 5_000);
        let mut observer = WindowedObserver::new(dir.path());
        observer.init().unwrap();

        write_stat(dir.path(), 1_000); // counter reset
        assert_eq!(observer.measure().unwrap(), 0);
        assert_eq!(observer.regressions_observed(), 1);

        // Baseline is still updated so the next window measures from the
        // post-regression value, not the stale pre-regression one.
        write_stat(dir.path(), 1_200);
        assert_eq!(observer.measure().unwrap(), 200);
    }

    #[test]
    fn exact_equal_reading_is_zero_delta_not_a_regression() {
        let dir = tempdir().unwrap();
        write_stat(dir.path(), 42);
        let mut observer = WindowedObserver::new(dir.path());
        observer.init().unwrap();

        assert_eq!(observer.measure().unwrap(), 0);
        assert_eq!(observer.regressions_observed(), 0);
    }
}
