//! Kernel binding: the only boundary to the real cgroup v2 filesystem.
//!
//! `cpu.stat` and `cpu.max` are in-kernel pseudo-files — reads and writes
//! against them do not block the way a real disk or network I/O would, so
//! this module is plain synchronous `std::fs`, not async.

use std::fs;
use std::path::Path;

use crate::error::{GovernorError, Result};

/// Read current cumulative CPU usage, in microseconds, from
/// `<cgroup_path>/cpu.stat`.
///
/// Parses `usage_usec <N>` out of the whitespace-separated `key value`
/// lines; all other lines (`user_usec`, `system_usec`, ...) are ignored.
/// A missing `usage_usec` token is a [`GovernorError::Parse`] failure.
pub fn read_usage(cgroup_path: &Path) -> Result<u64> {
    let stat_file = cgroup_path.join("cpu.stat");
    let content = fs::read_to_string(&stat_file)?;

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() == Some("usage_usec") {
            if let Some(value) = parts.next() {
                return value.parse::<u64>().map_err(|e| GovernorError::Parse {
                    file: stat_file.display().to_string(),
                    reason: format!("usage_usec value {value:?} is not an integer: {e}"),
                });
            }
        }
    }

    Err(GovernorError::Parse {
        file: stat_file.display().to_string(),
        reason: "no usage_usec field found".to_string(),
    })
}

/// Write an enforced quota to `<cgroup_path>/cpu.max`.
///
/// `quota_us = None` writes the literal `max` (unlimited); otherwise writes
/// the decimal integer. One write per call — writing the same `(quota_us,
/// period_us)` pair twice produces byte-identical file contents (E3).
pub fn write_quota(cgroup_path: &Path, quota_us: Option<i64>, period_us: u64) -> Result<()> {
    if let Some(q) = quota_us {
        if q < 0 {
            return Err(GovernorError::InvalidInput(format!(
                "negative quota: {q}"
            )));
        }
    }

    let quota_str = match quota_us {
        None => "max".to_string(),
        Some(q) => q.to_string(),
    };

    let max_file = cgroup_path.join("cpu.max");
    fs::write(max_file, format!("{quota_str} {period_us}"))?;
    Ok(())
}
