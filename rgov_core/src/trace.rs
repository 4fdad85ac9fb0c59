//! Structured trace emission: one JSON-lines record per policy decision.
//!
//! The wire schema is a [`DecisionRecord`](crate::policy::DecisionRecord)
//! plus a single non-semantic `timestamp` field. Field names are pinned by
//! `serde(rename)` so they stay stable across Rust-side refactors — traces
//! are consumed by other tools, not just read by humans.

use std::io::Write as _;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{GovernorError, Result};
use crate::policy::DecisionRecord;
use crate::workload::WorkloadId;

/// A decision record as it appears on the wire: the policy outcome plus the
/// wall-clock time it was recorded, and — for the multi-workload
/// orchestrator — which workload it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    #[serde(rename = "workload_id", skip_serializing_if = "Option::is_none")]
    pub workload_id: Option<String>,
    #[serde(flatten)]
    pub decision: DecisionRecord,
    /// Wall-clock time the record was emitted, fractional seconds since the
    /// Unix epoch. Not read by any policy logic — observability only.
    pub timestamp: f64,
}

impl TraceRecord {
    /// Build a trace record for a single-workload orchestrator (no workload
    /// id on the wire).
    pub fn single(decision: DecisionRecord, timestamp: f64) -> Self {
        Self {
            workload_id: None,
            decision,
            timestamp,
        }
    }

    /// Build a trace record tagged with the workload it belongs to.
    pub fn for_workload(wid: &WorkloadId, decision: DecisionRecord, timestamp: f64) -> Self {
        Self {
            workload_id: Some(wid.as_str().to_string()),
            decision,
            timestamp,
        }
    }
}

/// Destination for emitted trace records.
pub trait TraceSink: Send + Sync {
    /// Emit one record. Implementations must not buffer indefinitely —
    /// a trace consumer tailing the file expects each decision to show up
    /// promptly.
    fn emit(&self, record: &TraceRecord) -> Result<()>;
}

/// Writes one JSON object per line to any [`std::io::Write`] destination
/// (a file, stdout, an in-memory buffer in tests).
pub struct JsonlTraceSink<W: std::io::Write + Send> {
    writer: Mutex<W>,
}

impl<W: std::io::Write + Send> JsonlTraceSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: std::io::Write + Send> TraceSink for JsonlTraceSink<W> {
    fn emit(&self, record: &TraceRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| GovernorError::InvalidInput(format!("trace record not serializable: {e}")))?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| GovernorError::Io("trace sink writer lock poisoned".to_string()))?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{evaluate, PolicyStateData};
    use std::sync::Arc;

    fn sample_record() -> DecisionRecord {
        let (_, _, record) = evaluate(PolicyStateData::initial(), 200_000, 100_000).unwrap();
        record
    }

    #[test]
    fn emits_one_json_line_per_record() {
        let buf: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        struct VecSink(Arc<Mutex<Vec<u8>>>);
        impl std::io::Write for VecSink {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().write(data)
            }
            fn flush(&mut self) -> std::io::Result<()> {
                self.0.lock().unwrap().flush()
            }
        }

        let sink = JsonlTraceSink::new(VecSink(buf.clone()));
        sink.emit(&TraceRecord::single(sample_record(), 1_700_000_000.5))
            .unwrap();
        sink.emit(&TraceRecord::single(sample_record(), 1_700_000_100.0))
            .unwrap();

        let content = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(parsed.get("timestamp").is_some());
            assert!(parsed.get("policy_rule_id").is_some());
            assert!(parsed.get("workload_id").is_none());
        }
    }

    #[test]
    fn workload_tagged_record_carries_workload_id() {
        let buf = Vec::new();
        let sink = JsonlTraceSink::new(buf);
        let wid = WorkloadId::new("db-primary").unwrap();
        sink.emit(&TraceRecord::for_workload(&wid, sample_record(), 1.0))
            .unwrap();

        let inner = sink.writer.into_inner().unwrap();
        let content = String::from_utf8(inner).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed["workload_id"], "db-primary");
    }
}
