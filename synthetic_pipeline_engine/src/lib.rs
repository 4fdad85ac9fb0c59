//! Synthetic `U_w` observation sequence generators.
//!
//! A small family of pure functions, each producing a pathological usage
//! sequence parameterized on a declared budget `B`, for exercising the
//! policy core directly or through a replay harness without needing a
//! live cgroup.

pub mod error;
pub mod generators;

pub use error::{GenerationError, Result};
pub use generators::{
    alternating_overshoot_undershoot, boundary_conditions, continuous_overshoot,
    long_debt_accumulation, oscillation, zero_usage,
};
