//! Replay harness: run the same policy offline over a recorded observation
//! sequence, with no wall clock and no kernel I/O. This is the primary
//! vehicle for determinism tests (G1, G2).

use serde::{Deserialize, Serialize};

use crate::error::{GovernorError, Result};
use crate::window::{WindowOrchestrator, WindowRecord};

/// A replayable scenario: fixed budget and window width, plus the
/// per-window usage sequence to feed through a fresh window orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayInput {
    pub b_us: u64,
    pub w_us: u64,
    pub observations: Vec<u64>,
}

/// The full decision history produced by replaying a [`ReplayInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutput {
    pub history: Vec<WindowRecord>,
}

/// Feed each `U_w` in `input.observations` to a fresh [`WindowOrchestrator`]
/// constructed from `(input.b_us, input.w_us)`, in order, and return the
/// resulting window history.
pub fn replay(input: &ReplayInput) -> Result<ReplayOutput> {
    if input.observations.is_empty() {
        return Err(GovernorError::InvalidInput(
            "replay requires a non-empty observation sequence".to_string(),
        ));
    }

    let mut orchestrator = WindowOrchestrator::new(input.b_us, input.w_us)?;
    for &u_w in &input.observations {
        orchestrator.advance(u_w)?;
    }

    Ok(ReplayOutput {
        history: orchestrator.history(),
    })
}

/// Run [`replay`] `n` times over the same input and check that every pair
/// of runs produces history sequences equal field-for-field. `n` must be
/// at least 2 — a single run proves nothing about determinism.
pub fn verify_replay_determinism(input: &ReplayInput, n: usize) -> Result<bool> {
    if n < 2 {
        return Err(GovernorError::InvalidInput(format!(
            "verify_replay_determinism needs n >= 2, got {n}"
        )));
    }

    let first = replay(input)?;
    for _ in 1..n {
        let next = replay(input)?;
        if next != first {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_observation_sequence() {
        let input = ReplayInput {
            b_us: 100_000,
            w_us: 100_000,
            observations: vec![],
        };
        assert!(replay(&input).is_err());
    }

    #[test]
    fn replay_produces_one_history_row_per_observation() {
        let input = ReplayInput {
            b_us: 100_000,
            w_us: 100_000,
            observations: vec![50_000, 200_000, 10_000],
        };
        let output = replay(&input).unwrap();
        assert_eq!(output.history.len(), 3);
        assert_eq!(output.history[0].window_index, 0);
        assert_eq!(output.history[2].window_index, 2);
    }

    #[test]
    fn repeated_replays_are_field_for_field_identical() {
        let input = ReplayInput {
            b_us: 100_000,
            w_us: 100_000,
            observations: vec![120_000, 90_000, 250_000, 0, 50_000],
        };
        assert!(verify_replay_determinism(&input, 5).unwrap());
    }

    #[test]
    fn rejects_n_less_than_two() {
        let input = ReplayInput {
            b_us: 100_000,
            w_us: 100_000,
            observations: vec![1],
        };
        assert!(verify_replay_determinism(&input, 1).is_err());
    }
}
