//! Single-workload real-time orchestrator: the wall-clock-driven loop that
//! ties observer, window orchestrator, kernel binding and trace sink
//! together for one cgroup.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::binding::write_quota;
use crate::clock::Clock;
use crate::error::Result;
use crate::observer::WindowedObserver;
use crate::policy::{DecisionRecord, PolicyStateData};
use crate::trace::{TraceRecord, TraceSink};
use crate::window::WindowOrchestrator;

/// Drives one workload's control loop: observe, evaluate, trace, persist,
/// enforce, once per window, with bounded-lag recovery from sleep overshoot.
pub struct SingleWorkloadOrchestrator {
    cgroup_path: PathBuf,
    w_us: u64,
    observer: WindowedObserver,
    window_orchestrator: WindowOrchestrator,
    trace_sink: Arc<dyn TraceSink>,
    clock: Arc<dyn Clock>,
    last_record: Option<DecisionRecord>,
}

impl SingleWorkloadOrchestrator {
    /// Construct an orchestrator bound to a single cgroup, budget and
    /// window width.
    pub fn new(
        cgroup_path: impl Into<PathBuf>,
        b_us: u64,
        w_us: u64,
        trace_sink: Arc<dyn TraceSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let cgroup_path = cgroup_path.into();
        Ok(Self {
            observer: WindowedObserver::new(cgroup_path.clone()),
            window_orchestrator: WindowOrchestrator::new(b_us, w_us)?,
            cgroup_path,
            w_us,
            trace_sink,
            clock,
            last_record: None,
        })
    }

    /// `(policy state, last decision record)`. Returns the initial state
    /// and `None` if no window has been processed yet.
    pub fn get_status(&self) -> (PolicyStateData, Option<DecisionRecord>) {
        (
            self.window_orchestrator.current_state(),
            self.last_record.clone(),
        )
    }

    fn w_sec(&self) -> f64 {
        self.w_us as f64 / 1_000_000.0
    }

    /// Run the control loop. If `max_windows` is `Some(n)`, stops after `n`
    /// windows have been evaluated; if `None`, runs forever.
    pub async fn run_loop(&mut self, max_windows: Option<u64>) -> Result<()> {
        let w_sec = self.w_sec();
        self.observer.init()?;
        let mut next_wake = self.clock.now() + w_sec;
        let mut windows_run: u64 = 0;

        loop {
            if let Some(max) = max_windows {
                if windows_run >= max {
                    return Ok(());
                }
            }

            if next_wake > self.clock.now() {
                self.clock.sleep_until(next_wake).await;
            }

            let now = self.clock.now();
            let drift = now - next_wake;
            if drift > w_sec {
                warn!(
                    cgroup = %self.cgroup_path.display(),
                    drift_sec = drift,
                    window_sec = w_sec,
                    "major drift: sleep overshot by more than one window"
                );
            }

            let u_w = self.observer.measure()?;
            let (_state, decision, mut record) = self.window_orchestrator.advance(u_w)?;
            let window_index = self.window_orchestrator.current_window_index() - 1;
            record.window_index = Some(window_index);

            self.trace_sink
                .emit(&TraceRecord::single(record.clone(), self.clock.now()))?;

            self.last_record = Some(record);
            write_quota(
                &self.cgroup_path,
                Some(decision.t_w_us as i64),
                self.w_us,
            )?;

            windows_run += 1;
            next_wake += w_sec;

            let now = self.clock.now();
            if next_wake < now {
                let missed = ((now - next_wake) / w_sec).floor() as u64 + 1;
                warn!(
                    cgroup = %self.cgroup_path.display(),
                    missed_windows = missed,
                    "anti-spin: skipping missed windows without evaluating them"
                );
                next_wake += missed as f64 * w_sec;
            }
        }
    }
}
