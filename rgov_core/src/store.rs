//! Policy store: the keyed mapping from workload id to `(state, last
//! record)`. Exclusively owned by whoever holds it — the multi-workload
//! orchestrator never reaches into another workload's entry, and the store
//! never reaches across entries on its own (I2, I3).

use std::collections::HashMap;

use crate::policy::{DecisionRecord, PolicyStateData};
use crate::workload::WorkloadId;

/// Per-workload policy state and last decision record.
#[derive(Default)]
pub struct PolicyStore {
    states: HashMap<WorkloadId, PolicyStateData>,
    last_records: HashMap<WorkloadId, DecisionRecord>,
}

impl PolicyStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state for a workload, auto-initializing absent
    /// entries to `(Normal, 0)`.
    pub fn get_state(&mut self, wid: &WorkloadId) -> PolicyStateData {
        *self
            .states
            .entry(wid.clone())
            .or_insert_with(PolicyStateData::initial)
    }

    /// Get the last decision record for a workload, if any window has been
    /// processed for it yet.
    pub fn get_last_record(&self, wid: &WorkloadId) -> Option<&DecisionRecord> {
        self.last_records.get(wid)
    }

    /// Persist the outcome of a window: new state and its decision record.
    pub fn set_decision(
        &mut self,
        wid: &WorkloadId,
        state: PolicyStateData,
        record: DecisionRecord,
    ) {
        self.states.insert(wid.clone(), state);
        self.last_records.insert(wid.clone(), record);
    }

    /// Reset a workload back to its initial state, discarding history.
    pub fn reset(&mut self, wid: &WorkloadId) {
        self.states.insert(wid.clone(), PolicyStateData::initial());
        self.last_records.remove(wid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{evaluate, PolicyState};

    fn wid(name: &str) -> WorkloadId {
        WorkloadId::new(name).unwrap()
    }

    #[test]
    fn absent_entry_initializes_to_normal_zero() {
        let mut store = PolicyStore::new();
        let state = store.get_state(&wid("a"));
        assert_eq!(state.mode(), PolicyState::Normal);
        assert_eq!(state.debt_us(), 0);
        assert!(store.get_last_record(&wid("a")).is_none());
    }

    #[test]
    fn set_decision_updates_both_state_and_record() {
        let mut store = PolicyStore::new();
        let (state, _decision, record) =
            evaluate(PolicyStateData::initial(), 200_000, 100_000).unwrap();
        store.set_decision(&wid("a"), state, record.clone());

        assert_eq!(store.get_state(&wid("a")), state);
        assert_eq!(store.get_last_record(&wid("a")), Some(&record));
    }

    #[test]
    fn entries_are_isolated_by_workload_id() {
        let mut store = PolicyStore::new();
        let (state_a, _d, record_a) =
            evaluate(PolicyStateData::initial(), 200_000, 100_000).unwrap();
        store.set_decision(&wid("a"), state_a, record_a);

        // workload "b" is untouched
        let state_b = store.get_state(&wid("b"));
        assert_eq!(state_b.mode(), PolicyState::Normal);
        assert!(store.get_last_record(&wid("b")).is_none());
    }

    #[test]
    fn reset_clears_state_and_record() {
        let mut store = PolicyStore::new();
        let (state, _d, record) = evaluate(PolicyStateData::initial(), 200_000, 100_000).unwrap();
        store.set_decision(&wid("a"), state, record);

        store.reset(&wid("a"));
        assert_eq!(store.get_state(&wid("a")).debt_us(), 0);
        assert!(store.get_last_record(&wid("a")).is_none());
    }
}
