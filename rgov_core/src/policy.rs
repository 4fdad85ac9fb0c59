//! The pure policy function: `(state, usage, budget) -> (state', decision, record)`.
//!
//! Everything in this module is deterministic integer arithmetic. No clocks,
//! no randomness, no floating point, no I/O. `evaluate` is total over its
//! documented preconditions — the only failure mode is `InvalidInput`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GovernorError, Result};

/// Which of the two policy modes a workload is currently in.
///
/// `Normal` always implies zero debt; `Throttled` always implies positive
/// debt. The pair `(mode, debt_us)` is redundant — mode is derivable from
/// debt — but the redundancy is load-bearing for trace legibility and for
/// making the invariant checkable at the type's boundary rather than only
/// by inspection of `debt_us`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyState {
    /// No outstanding debt; the workload is enforced at its full budget.
    Normal,
    /// Outstanding debt; the workload is fully throttled until it clears.
    Throttled,
}

impl fmt::Display for PolicyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Throttled => write!(f, "THROTTLED"),
        }
    }
}

/// A policy state value: `{mode, debt_us}`, constructible only through
/// [`PolicyStateData::new`], which enforces P1 (`debt_us >= 0`, true by
/// construction since `debt_us` is unsigned) and P5 (`mode = Normal implies
/// debt_us = 0`) — the pair `(Normal, d > 0)` is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStateData {
    mode: PolicyState,
    debt_us: u64,
}

impl PolicyStateData {
    /// Construct a policy state, clamping debt to zero whenever mode is
    /// `Normal` so P5 cannot be violated by a careless caller.
    pub fn new(mode: PolicyState, debt_us: u64) -> Self {
        match mode {
            PolicyState::Normal => Self {
                mode,
                debt_us: 0,
            },
            PolicyState::Throttled => Self { mode, debt_us },
        }
    }

    /// The fresh state every workload starts in: `(Normal, 0)`.
    pub fn initial() -> Self {
        Self::new(PolicyState::Normal, 0)
    }

    /// Current mode.
    pub fn mode(&self) -> PolicyState {
        self.mode
    }

    /// Current accumulated debt, in microseconds.
    pub fn debt_us(&self) -> u64 {
        self.debt_us
    }
}

impl Default for PolicyStateData {
    fn default() -> Self {
        Self::initial()
    }
}

/// Enforcement output of one policy evaluation: the quota to write for the
/// next window. Always in `[0, B]` (P2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementDecision {
    /// Enforced quota for the next window, in microseconds.
    pub t_w_us: u64,
}

/// Stable rule identifier naming which branch of [`evaluate`] fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleId {
    /// Normal mode, usage at or under budget.
    N1UnderBudget,
    /// Normal mode, usage over budget: debt created.
    N2OverBudget,
    /// Throttled mode, repayment clears debt: back to Normal.
    T1DebtRecovered,
    /// Throttled mode, debt remains after repayment.
    T2StillInDebt,
}

impl RuleId {
    /// The exact stable string tag named by the specification, used
    /// verbatim on the trace wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N1UnderBudget => "RULE_N1_UNDER_BUDGET",
            Self::N2OverBudget => "RULE_N2_OVER_BUDGET",
            Self::T1DebtRecovered => "RULE_T1_DEBT_RECOVERED",
            Self::T2StillInDebt => "RULE_T2_STILL_IN_DEBT",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RuleId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "RULE_N1_UNDER_BUDGET" => Ok(Self::N1UnderBudget),
            "RULE_N2_OVER_BUDGET" => Ok(Self::N2OverBudget),
            "RULE_T1_DEBT_RECOVERED" => Ok(Self::T1DebtRecovered),
            "RULE_T2_STILL_IN_DEBT" => Ok(Self::T2StillInDebt),
            other => Err(serde::de::Error::custom(format!(
                "unknown policy_rule_id: {other}"
            ))),
        }
    }
}

/// Full audit row for one window: everything needed to reconstruct why a
/// decision was made, suitable for replay verification and tracing.
///
/// `window_index` is always populated by an orchestrator (single-, multi-,
/// or replay), never by [`evaluate`] itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Window this decision applies to, stamped by the caller.
    pub window_index: Option<u64>,
    /// Policy state at the start of the window.
    pub state_before: PolicyStateData,
    /// Debt at the start of the window, in microseconds.
    #[serde(rename = "debt_before")]
    pub debt_before_us: u64,
    /// Observed usage for the window, in microseconds.
    pub usage_us: u64,
    /// Declared budget for the window, in microseconds.
    pub budget_us: u64,
    /// Enforced quota written for the next window, in microseconds.
    #[serde(rename = "enforced_quota")]
    pub enforced_quota_us: u64,
    /// Policy state after applying this window's usage.
    pub state_after: PolicyStateData,
    /// Debt after applying this window's usage, in microseconds.
    #[serde(rename = "debt_after")]
    pub debt_after_us: u64,
    /// Which branch of [`evaluate`] fired.
    pub policy_rule_id: RuleId,
    /// Set when this window's outcome is itself evidence of an invariant
    /// worth flagging downstream (e.g. usage exceeded budget). Informational
    /// only — it does not mean an actual invariant was violated by the core.
    pub violated_invariant: Option<String>,
}

/// Evaluate one window of policy.
///
/// `w_us` (the window width) is accepted and carried into nothing but the
/// caller's own bookkeeping — it must never influence the branch taken here.
///
/// # Errors
///
/// Returns [`GovernorError::InvalidInput`] if `u_w_us` is... it can't be,
/// since usage is unsigned; the precondition that matters at this boundary
/// is `b_us > 0`.
pub fn evaluate(
    state: PolicyStateData,
    u_w_us: u64,
    b_us: u64,
) -> Result<(PolicyStateData, EnforcementDecision, DecisionRecord)> {
    if b_us == 0 {
        return Err(GovernorError::InvalidInput(format!(
            "budget must be > 0, got {b_us}"
        )));
    }

    let debt_before_us = state.debt_us();

    let (new_state, t_w_us, rule_id, violated_invariant) = match state.mode() {
        PolicyState::Normal => {
            if u_w_us <= b_us {
                (
                    PolicyStateData::new(PolicyState::Normal, 0),
                    b_us,
                    RuleId::N1UnderBudget,
                    None,
                )
            } else {
                let excess = u_w_us - b_us;
                (
                    PolicyStateData::new(PolicyState::Throttled, excess),
                    0,
                    RuleId::N2OverBudget,
                    Some("INV_USAGE_EXCEEDS_BUDGET".to_string()),
                )
            }
        }
        PolicyState::Throttled => {
            // repayment = B - U_w, may be negative; use i128 to avoid
            // underflow before deciding the branch.
            let repayment = i128::from(b_us) - i128::from(u_w_us);
            let new_debt = i128::from(debt_before_us) - repayment;

            if new_debt <= 0 {
                (
                    PolicyStateData::new(PolicyState::Normal, 0),
                    b_us,
                    RuleId::T1DebtRecovered,
                    None,
                )
            } else {
                (
                    PolicyStateData::new(PolicyState::Throttled, new_debt as u64),
                    0,
                    RuleId::T2StillInDebt,
                    Some("INV_DEBT_REMAINING".to_string()),
                )
            }
        }
    };

    let decision = EnforcementDecision { t_w_us };
    let record = DecisionRecord {
        window_index: None,
        state_before: state,
        debt_before_us,
        usage_us: u_w_us,
        budget_us: b_us,
        enforced_quota_us: t_w_us,
        state_after: new_state,
        debt_after_us: new_state.debt_us(),
        policy_rule_id: rule_id,
        violated_invariant,
    };

    Ok((new_state, decision, record))
}
