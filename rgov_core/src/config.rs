//! Configuration types for embedding this crate in a larger binary: budgets,
//! capacity, and window width, loadable from TOML or environment the same
//! way every other system in the workspace loads its configuration.

use serde::{Deserialize, Serialize};
use shared_core::config::Config;
use shared_core::error::{Result as SharedResult, SystemError};

/// Per-workload configuration entry: a stable workload id, the cgroup it is
/// bound to, and its declared budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Stable workload identifier.
    pub id: String,
    /// Path to the workload's cgroup v2 directory.
    pub cgroup_path: String,
    /// Declared budget, in microseconds, for each window.
    pub budget_us: u64,
}

/// Top-level governor configuration: global window width, total admitted
/// capacity, and the set of workloads to register at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Fixed window width, in microseconds, shared by every workload.
    pub window_us: u64,
    /// Total CPU capacity admitted across all workloads, in microseconds.
    pub capacity_us: u64,
    /// Workloads to register when the governor starts.
    pub workloads: Vec<WorkloadConfig>,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            window_us: 100_000,
            capacity_us: 100_000,
            workloads: Vec::new(),
        }
    }
}

impl Config for GovernorConfig {
    fn validate(&self) -> SharedResult<()> {
        if self.window_us == 0 {
            return Err(SystemError::validation(
                "window_us",
                "must be > 0",
                Some(self.window_us.to_string()),
            ));
        }
        if self.capacity_us == 0 {
            return Err(SystemError::validation(
                "capacity_us",
                "must be > 0",
                Some(self.capacity_us.to_string()),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        let mut total_budget: u64 = 0;
        for workload in &self.workloads {
            if workload.budget_us == 0 {
                return Err(SystemError::validation(
                    "workloads[].budget_us",
                    "must be > 0",
                    Some(format!("{}: {}", workload.id, workload.budget_us)),
                ));
            }
            if !seen.insert(workload.id.clone()) {
                return Err(SystemError::validation(
                    "workloads[].id",
                    "duplicate workload id",
                    Some(workload.id.clone()),
                ));
            }
            total_budget += workload.budget_us;
        }

        if total_budget > self.capacity_us {
            return Err(SystemError::validation(
                "workloads",
                "sum of budget_us exceeds capacity_us",
                Some(format!("{total_budget} > {}", self.capacity_us)),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> GovernorConfig {
        GovernorConfig {
            window_us: 100_000,
            capacity_us: 200_000,
            workloads: vec![
                WorkloadConfig {
                    id: "db".to_string(),
                    cgroup_path: "/sys/fs/cgroup/db".to_string(),
                    budget_us: 100_000,
                },
                WorkloadConfig {
                    id: "worker".to_string(),
                    cgroup_path: "/sys/fs/cgroup/worker".to_string(),
                    budget_us: 80_000,
                },
            ],
        }
    }

    #[test]
    fn default_is_valid() {
        assert!(GovernorConfig::default().validate().is_ok());
    }

    #[test]
    fn valid_config_round_trips_through_toml() {
        let config = sample();
        let file = NamedTempFile::new().unwrap();
        config.save(file.path()).unwrap();

        let loaded = GovernorConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.window_us, config.window_us);
        assert_eq!(loaded.workloads.len(), 2);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn rejects_over_capacity_allocation() {
        let mut config = sample();
        config.capacity_us = 100_000; // less than 100_000 + 80_000
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_workload_ids() {
        let mut config = sample();
        config.workloads[1].id = "db".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_window() {
        let mut config = sample();
        config.window_us = 0;
        assert!(config.validate().is_err());
    }
}
