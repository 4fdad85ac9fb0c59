//! Pure functions producing adversarial `U_w` observation sequences,
//! parameterized on a declared budget `B`. Used to drive the policy core
//! (directly, or through the replay harness) with pathological usage
//! patterns: sustained overshoot, debt paydown, oscillation, and the exact
//! budget boundary.

use crate::error::{GenerationError, Result};

fn require_positive_budget(b_us: u64) -> Result<()> {
    if b_us == 0 {
        return Err(GenerationError::InvalidBudget(b_us));
    }
    Ok(())
}

fn require_positive_count(name: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(GenerationError::InvalidCount { name, value });
    }
    Ok(())
}

fn require_factor_above_one(name: &'static str, value: f64) -> Result<()> {
    if value <= 1.0 {
        return Err(GenerationError::InvalidFactor {
            name,
            value,
            range: "(1.0, inf)",
        });
    }
    Ok(())
}

fn require_factor_in_open_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(GenerationError::InvalidFactor {
            name,
            value,
            range: "(0.0, 1.0)",
        });
    }
    Ok(())
}

fn require_factor_in_half_open_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if !(value >= 0.0 && value < 1.0) {
        return Err(GenerationError::InvalidFactor {
            name,
            value,
            range: "[0.0, 1.0)",
        });
    }
    Ok(())
}

/// Every window at `overshoot_factor * B`. Tests unbounded debt
/// accumulation (`overshoot_factor` must be `> 1.0`).
pub fn continuous_overshoot(b_us: u64, overshoot_factor: f64, num_windows: u64) -> Result<Vec<u64>> {
    require_positive_budget(b_us)?;
    require_factor_above_one("overshoot_factor", overshoot_factor)?;
    require_positive_count("num_windows", num_windows)?;

    let u_w = (b_us as f64 * overshoot_factor) as u64;
    Ok(vec![u_w; num_windows as usize])
}

/// `num_cycles` repetitions of `[overshoot, undershoot]`, to exercise debt
/// accumulation followed by paydown on alternating windows.
pub fn alternating_overshoot_undershoot(
    b_us: u64,
    overshoot_factor: f64,
    undershoot_factor: f64,
    num_cycles: u64,
) -> Result<Vec<u64>> {
    require_positive_budget(b_us)?;
    require_factor_above_one("overshoot_factor", overshoot_factor)?;
    require_factor_in_open_unit_interval("undershoot_factor", undershoot_factor)?;
    require_positive_count("num_cycles", num_cycles)?;

    let overshoot_u_w = (b_us as f64 * overshoot_factor) as u64;
    let undershoot_u_w = (b_us as f64 * undershoot_factor) as u64;

    let mut result = Vec::with_capacity(num_cycles as usize * 2);
    for _ in 0..num_cycles {
        result.push(overshoot_u_w);
        result.push(undershoot_u_w);
    }
    Ok(result)
}

/// `num_windows` windows of zero usage, to test debt paydown and the
/// transition back to `Normal`.
pub fn zero_usage(num_windows: u64) -> Result<Vec<u64>> {
    require_positive_count("num_windows", num_windows)?;
    Ok(vec![0; num_windows as usize])
}

/// `num_windows` windows at exactly `B` — no overshoot, no undershoot.
pub fn boundary_conditions(b_us: u64, num_windows: u64) -> Result<Vec<u64>> {
    require_positive_budget(b_us)?;
    require_positive_count("num_windows", num_windows)?;
    Ok(vec![b_us; num_windows as usize])
}

/// `accumulation_windows` at `overshoot_factor * B` followed by
/// `paydown_windows` at `paydown_factor * B`.
pub fn long_debt_accumulation(
    b_us: u64,
    overshoot_factor: f64,
    accumulation_windows: u64,
    paydown_factor: f64,
    paydown_windows: u64,
) -> Result<Vec<u64>> {
    require_positive_budget(b_us)?;
    require_factor_above_one("overshoot_factor", overshoot_factor)?;
    require_positive_count("accumulation_windows", accumulation_windows)?;
    require_factor_in_open_unit_interval("paydown_factor", paydown_factor)?;
    require_positive_count("paydown_windows", paydown_windows)?;

    let accumulation_u_w = (b_us as f64 * overshoot_factor) as u64;
    let paydown_u_w = (b_us as f64 * paydown_factor) as u64;

    let mut result = Vec::with_capacity((accumulation_windows + paydown_windows) as usize);
    result.extend(std::iter::repeat(accumulation_u_w).take(accumulation_windows as usize));
    result.extend(std::iter::repeat(paydown_u_w).take(paydown_windows as usize));
    Ok(result)
}

/// `num_oscillations` repetitions of `[high, low]`, to stress-test rapid
/// state transitions.
pub fn oscillation(
    b_us: u64,
    high_factor: f64,
    low_factor: f64,
    num_oscillations: u64,
) -> Result<Vec<u64>> {
    require_positive_budget(b_us)?;
    require_factor_above_one("high_factor", high_factor)?;
    require_factor_in_half_open_unit_interval("low_factor", low_factor)?;
    require_positive_count("num_oscillations", num_oscillations)?;

    let high_u_w = (b_us as f64 * high_factor) as u64;
    let low_u_w = (b_us as f64 * low_factor) as u64;

    let mut result = Vec::with_capacity(num_oscillations as usize * 2);
    for _ in 0..num_oscillations {
        result.push(high_u_w);
        result.push(low_u_w);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_overshoot_repeats_the_same_value() {
        let seq = continuous_overshoot(100_000, 2.0, 5).unwrap();
        assert_eq!(seq, vec![200_000; 5]);
    }

    #[test]
    fn continuous_overshoot_rejects_factor_at_or_below_one() {
        assert_eq!(
            continuous_overshoot(100_000, 1.0, 5),
            Err(GenerationError::InvalidFactor {
                name: "overshoot_factor",
                value: 1.0,
                range: "(1.0, inf)"
            })
        );
    }

    #[test]
    fn continuous_overshoot_rejects_zero_budget() {
        assert_eq!(
            continuous_overshoot(0, 2.0, 5),
            Err(GenerationError::InvalidBudget(0))
        );
    }

    #[test]
    fn alternating_overshoot_undershoot_produces_two_per_cycle() {
        let seq = alternating_overshoot_undershoot(100_000, 2.0, 0.5, 3).unwrap();
        assert_eq!(seq, vec![200_000, 50_000, 200_000, 50_000, 200_000, 50_000]);
    }

    #[test]
    fn zero_usage_is_all_zero() {
        assert_eq!(zero_usage(4).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn zero_usage_rejects_zero_count() {
        assert!(zero_usage(0).is_err());
    }

    #[test]
    fn boundary_conditions_is_exactly_budget() {
        assert_eq!(boundary_conditions(77_000, 3).unwrap(), vec![77_000; 3]);
    }

    #[test]
    fn long_debt_accumulation_concatenates_both_phases() {
        let seq = long_debt_accumulation(100_000, 1.5, 3, 0.5, 2).unwrap();
        assert_eq!(seq, vec![150_000, 150_000, 150_000, 50_000, 50_000]);
    }

    #[test]
    fn oscillation_alternates_high_and_low() {
        let seq = oscillation(100_000, 3.0, 0.1, 2).unwrap();
        assert_eq!(seq, vec![300_000, 10_000, 300_000, 10_000]);
    }

    #[test]
    fn oscillation_accepts_zero_low_factor() {
        let seq = oscillation(100_000, 2.0, 0.0, 1).unwrap();
        assert_eq!(seq, vec![200_000, 0]);
    }

    #[test]
    fn oscillation_rejects_low_factor_at_one() {
        assert!(oscillation(100_000, 2.0, 1.0, 1).is_err());
    }
}
