//! End-to-end policy scenarios exercising the window orchestrator and
//! replay harness together, all at `B = 100_000`, `W = 100_000`.

use rgov_core::policy::{evaluate, PolicyState, PolicyStateData};
use rgov_core::replay::{replay, verify_replay_determinism, ReplayInput};
use rgov_core::window::WindowOrchestrator;

const B: u64 = 100_000;
const W: u64 = 100_000;

#[test]
fn continuous_2x_overshoot_100_windows() {
    let mut orch = WindowOrchestrator::new(B, W).unwrap();

    let (state0, decision0, record0) = orch.advance(200_000).unwrap();
    assert_eq!(record0.state_before.mode(), PolicyState::Normal);
    assert_eq!(record0.state_before.debt_us(), 0);
    assert_eq!(decision0.t_w_us, 0);
    assert_eq!(state0.mode(), PolicyState::Throttled);
    assert_eq!(state0.debt_us(), 100_000);

    for _ in 0..99 {
        let (_state, decision, record) = orch.advance(200_000).unwrap();
        assert_eq!(record.state_before.mode(), PolicyState::Throttled);
        assert_eq!(decision.t_w_us, 0);
    }

    assert_eq!(orch.current_state().debt_us(), 100_000 * 100);
}

#[test]
fn overshoot_then_zero() {
    let mut orch = WindowOrchestrator::new(B, W).unwrap();

    let (state0, decision0, _record0) = orch.advance(200_000).unwrap();
    assert_eq!(state0.mode(), PolicyState::Throttled);
    assert_eq!(state0.debt_us(), 100_000);
    assert_eq!(decision0.t_w_us, 0);

    let (state1, decision1, record1) = orch.advance(0).unwrap();
    assert_eq!(record1.state_before.mode(), PolicyState::Throttled);
    assert_eq!(record1.state_before.debt_us(), 100_000);
    assert_eq!(state1.mode(), PolicyState::Normal);
    assert_eq!(state1.debt_us(), 0);
    assert_eq!(decision1.t_w_us, 100_000);
}

#[test]
fn exact_budget_with_pre_existing_debt() {
    let mut state = PolicyStateData::new(PolicyState::Throttled, 50_000);
    for _ in 0..10 {
        let (next_state, decision, record) = evaluate(state, 100_000, B).unwrap();
        assert_eq!(next_state.mode(), PolicyState::Throttled);
        assert_eq!(next_state.debt_us(), 50_000);
        assert_eq!(decision.t_w_us, 0);
        assert_eq!(record.state_after.mode(), PolicyState::Throttled);
        assert_eq!(record.state_after.debt_us(), 50_000);
        state = next_state;
    }
}

#[test]
fn balanced_oscillation() {
    let mut orch = WindowOrchestrator::new(B, W).unwrap();

    for i in 0..20 {
        let (_high_state, _decision, high_record) = orch.advance(150_000).unwrap();
        assert_eq!(high_record.state_after.mode(), PolicyState::Throttled);
        assert_eq!(high_record.state_after.debt_us(), 50_000);

        let (_low_state, _decision, low_record) = orch.advance(50_000).unwrap();
        assert_eq!(low_record.state_after.mode(), PolicyState::Normal);
        assert_eq!(low_record.state_after.debt_us(), 0);

        assert!(high_record.state_after.debt_us() <= 50_000, "cycle {i}");
    }
}

#[test]
fn replay_equality_on_mixed_sequence() {
    let input = ReplayInput {
        b_us: B,
        w_us: W,
        observations: vec![50_000, 150_000, 75_000, 100_000, 0],
    };

    let first = replay(&input).unwrap();
    let second = replay(&input).unwrap();
    assert_eq!(first, second);
    assert!(verify_replay_determinism(&input, 5).unwrap());
}

#[test]
fn window_accounting_indexes_match_position() {
    let input = ReplayInput {
        b_us: B,
        w_us: W,
        observations: vec![10, 20, 30, 40],
    };
    let output = replay(&input).unwrap();
    assert_eq!(output.history.len(), input.observations.len());
    for (i, record) in output.history.iter().enumerate() {
        assert_eq!(record.window_index, i as u64);
    }
}
