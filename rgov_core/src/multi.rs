//! Multi-workload orchestrator: capacity admission and strict per-workload
//! isolation over a single global window clock.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::binding::write_quota;
use crate::clock::Clock;
use crate::error::{GovernorError, Result};
use crate::observer::WindowedObserver;
use crate::policy::evaluate;
use crate::store::PolicyStore;
use crate::trace::{TraceRecord, TraceSink};
use crate::workload::WorkloadId;

struct Registration {
    cgroup_path: PathBuf,
    budget_us: u64,
    observer: WindowedObserver,
}

/// Drives every registered workload's step against one global window clock.
/// Every workload's step touches only that workload's `(observer, state,
/// budget, cgroup_path)` — there is no cross-workload budget transfer,
/// borrowing, or priority (I3).
pub struct MultiWorkloadOrchestrator {
    capacity_us: u64,
    w_us: u64,
    registrations: BTreeMap<WorkloadId, Registration>,
    store: PolicyStore,
    trace_sink: Arc<dyn TraceSink>,
    clock: Arc<dyn Clock>,
}

impl MultiWorkloadOrchestrator {
    /// Construct an orchestrator with a fixed total capacity and global
    /// window width, both immutable for the life of the orchestrator.
    pub fn new(capacity_us: u64, w_us: u64, trace_sink: Arc<dyn TraceSink>, clock: Arc<dyn Clock>) -> Result<Self> {
        if capacity_us == 0 {
            return Err(GovernorError::InvalidInput(format!(
                "capacity must be > 0, got {capacity_us}"
            )));
        }
        if w_us == 0 {
            return Err(GovernorError::InvalidInput(format!(
                "window size must be > 0, got {w_us}"
            )));
        }
        Ok(Self {
            capacity_us,
            w_us,
            registrations: BTreeMap::new(),
            store: PolicyStore::new(),
            trace_sink,
            clock,
        })
    }

    /// Total admitted capacity, in microseconds.
    pub fn capacity_us(&self) -> u64 {
        self.capacity_us
    }

    /// Sum of budgets already admitted across registered workloads.
    pub fn allocated_us(&self) -> u64 {
        self.registrations.values().map(|r| r.budget_us).sum()
    }

    /// Register a new workload. Rejects a duplicate `wid` with
    /// [`GovernorError::Duplicate`], and rejects if the admission would
    /// push total allocated budget above `capacity_us` (C1).
    pub fn register(
        &mut self,
        wid: WorkloadId,
        cgroup_path: impl Into<PathBuf>,
        budget_us: u64,
    ) -> Result<()> {
        if budget_us == 0 {
            return Err(GovernorError::InvalidInput(format!(
                "budget must be > 0, got {budget_us}"
            )));
        }
        if self.registrations.contains_key(&wid) {
            return Err(GovernorError::Duplicate(wid.as_str().to_string()));
        }
        let prospective = self.allocated_us() + budget_us;
        if prospective > self.capacity_us {
            return Err(GovernorError::InvalidInput(format!(
                "Capacity exceeded: {prospective} > {}",
                self.capacity_us
            )));
        }

        let cgroup_path = cgroup_path.into();
        let observer = WindowedObserver::new(cgroup_path.clone());
        self.registrations.insert(
            wid.clone(),
            Registration {
                cgroup_path,
                budget_us,
                observer,
            },
        );
        self.store.get_state(&wid); // auto-initializes to (Normal, 0)
        Ok(())
    }

    /// Workload ids currently registered, in deterministic sorted order.
    pub fn workload_ids(&self) -> Vec<WorkloadId> {
        self.registrations.keys().cloned().collect()
    }

    fn w_sec(&self) -> f64 {
        self.w_us as f64 / 1_000_000.0
    }

    /// `observer.init()` for every registered workload. Must be called
    /// before the first `run_loop`.
    fn init_observers(&mut self) -> Result<()> {
        for reg in self.registrations.values_mut() {
            reg.observer.init()?;
        }
        Ok(())
    }

    /// One global-window step: for each registered workload independently,
    /// observe, evaluate, trace, persist and enforce, all tagged with the
    /// same `global_window_index`.
    fn step(&mut self, global_window_index: u64) -> Result<()> {
        for (wid, reg) in self.registrations.iter_mut() {
            let u_w = reg.observer.measure()?;
            let state = self.store.get_state(wid);
            let (next_state, decision, mut record) = evaluate(state, u_w, reg.budget_us)?;
            record.window_index = Some(global_window_index);

            self.trace_sink
                .emit(&TraceRecord::for_workload(wid, record.clone(), self.clock.now()))?;

            self.store.set_decision(wid, next_state, record);

            write_quota(&reg.cgroup_path, Some(decision.t_w_us as i64), self.w_us)?;
        }
        Ok(())
    }

    /// Drive every registered workload's step once per global window,
    /// using identical sleep/drift/anti-spin math as the single-workload
    /// orchestrator, scoped to the shared clock.
    pub async fn run_loop(&mut self, max_windows: Option<u64>) -> Result<()> {
        let w_sec = self.w_sec();
        self.init_observers()?;

        let mut next_wake = self.clock.now() + w_sec;
        let mut global_window_index: u64 = 0;

        loop {
            if let Some(max) = max_windows {
                if global_window_index >= max {
                    return Ok(());
                }
            }

            if next_wake > self.clock.now() {
                self.clock.sleep_until(next_wake).await;
            }

            let now = self.clock.now();
            let drift = now - next_wake;
            if drift > w_sec {
                warn!(drift_sec = drift, window_sec = w_sec, "major drift across global window");
            }

            self.step(global_window_index)?;
            global_window_index += 1;
            next_wake += w_sec;

            let now = self.clock.now();
            if next_wake < now {
                let missed = ((now - next_wake) / w_sec).floor() as u64 + 1;
                warn!(missed_windows = missed, "anti-spin: skipping missed global windows");
                next_wake += missed as f64 * w_sec;
            }
        }
    }
}
