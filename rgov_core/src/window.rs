//! Pure window advancement: sequences [`evaluate`](crate::policy::evaluate)
//! over an index counter and owns the per-workload history. No wall-clock
//! time, no timers, no I/O — `W` is a symbolic constant carried through the
//! interface, never read by the policy itself.

use crate::error::Result;
use crate::policy::{evaluate, DecisionRecord, EnforcementDecision, PolicyState, PolicyStateData};

/// Slim replay row: state at the start of the window, what was observed,
/// and what was enforced for the next window.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowRecord {
    /// Index of this window, starting at 0.
    pub window_index: u64,
    /// Policy state at the start of the window.
    pub state_at_start: PolicyStateData,
    /// Observed usage for the window, in microseconds.
    pub u_w_us: u64,
    /// Enforced quota for the next window, in microseconds.
    pub t_w_us: u64,
}

/// Pure, single-workload window sequencer.
///
/// Owns `{B, W, window_index, current_state, history}`. `W` is fixed for
/// the life of the orchestrator (T1); exactly one policy evaluation happens
/// per [`advance`](Self::advance) call (T2); policy effects never happen
/// outside `advance` (G4).
pub struct WindowOrchestrator {
    b_us: u64,
    w_us: u64,
    window_index: u64,
    state: PolicyStateData,
    history: Vec<WindowRecord>,
}

impl WindowOrchestrator {
    /// Construct a fresh orchestrator at `(Normal, 0)`, window index 0.
    pub fn new(b_us: u64, w_us: u64) -> Result<Self> {
        if b_us == 0 {
            return Err(crate::error::GovernorError::InvalidInput(format!(
                "budget must be > 0, got {b_us}"
            )));
        }
        if w_us == 0 {
            return Err(crate::error::GovernorError::InvalidInput(format!(
                "window size must be > 0, got {w_us}"
            )));
        }
        Ok(Self {
            b_us,
            w_us,
            window_index: 0,
            state: PolicyStateData::initial(),
            history: Vec::new(),
        })
    }

    /// Advance exactly one window given observed usage `u_w_us`.
    pub fn advance(
        &mut self,
        u_w_us: u64,
    ) -> Result<(PolicyStateData, EnforcementDecision, DecisionRecord)> {
        let state_at_start = self.state;
        let (next_state, decision, mut record) = evaluate(self.state, u_w_us, self.b_us)?;

        record.window_index = Some(self.window_index);

        self.history.push(WindowRecord {
            window_index: self.window_index,
            state_at_start,
            u_w_us,
            t_w_us: decision.t_w_us,
        });

        self.state = next_state;
        self.window_index += 1;

        Ok((next_state, decision, record))
    }

    /// Declared budget, in microseconds.
    pub fn budget_us(&self) -> u64 {
        self.b_us
    }

    /// Fixed window width, in microseconds.
    pub fn window_us(&self) -> u64 {
        self.w_us
    }

    /// Index of the window that will be evaluated next.
    pub fn current_window_index(&self) -> u64 {
        self.window_index
    }

    /// Current policy state (debug/logging only — not policy-relevant).
    pub fn current_state(&self) -> PolicyStateData {
        self.state
    }

    /// Whether the workload is currently throttled.
    pub fn is_throttled(&self) -> bool {
        self.state.mode() == PolicyState::Throttled
    }

    /// Defensive copy of the full window history.
    pub fn history(&self) -> Vec<WindowRecord> {
        self.history.clone()
    }
}
