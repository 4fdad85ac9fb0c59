//! Simulates a cgroup v2 directory with `cpu.stat` and `cpu.max`, without
//! needing root or a real cgroup hierarchy.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct MockKernel {
    _dir: TempDir,
    root: PathBuf,
}

impl MockKernel {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("rgov_mock_cgroup_")
            .tempdir()
            .unwrap();
        let root = dir.path().to_path_buf();
        let kernel = Self { _dir: dir, root };
        kernel.set_usage(0);
        kernel.set_quota(None, 100_000);
        kernel
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Simulate the kernel updating `cpu.stat`.
    pub fn set_usage(&self, usage_usec: u64) {
        fs::write(
            self.root.join("cpu.stat"),
            format!("usage_usec {usage_usec}\nuser_usec 0\nsystem_usec 0\n"),
        )
        .unwrap();
    }

    /// Seed `cpu.max` directly (normally only the orchestrator writes it).
    pub fn set_quota(&self, quota: Option<i64>, period: u64) {
        let quota_str = match quota {
            None => "max".to_string(),
            Some(q) => q.to_string(),
        };
        fs::write(self.root.join("cpu.max"), format!("{quota_str} {period}\n")).unwrap();
    }

    /// Read back what the orchestrator wrote to `cpu.max`.
    pub fn read_enforced_quota(&self) -> (Option<i64>, u64) {
        let content = fs::read_to_string(self.root.join("cpu.max")).unwrap();
        let mut parts = content.trim().split_whitespace();
        let quota_str = parts.next().unwrap();
        let period_str = parts.next().unwrap();
        let period: u64 = period_str.parse().unwrap();
        let quota = if quota_str == "max" {
            None
        } else {
            Some(quota_str.parse().unwrap())
        };
        (quota, period)
    }
}
