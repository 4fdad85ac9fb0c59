//! Policy and window-orchestration core for a per-cgroup CPU quota
//! governor.
//!
//! [`policy`] is the deterministic state machine; [`window`] sequences it
//! over a window index; [`observer`] and [`binding`] are the only pieces
//! that touch the cgroup v2 filesystem; [`store`] holds per-workload state;
//! [`orchestrator`] and [`multi`] are the real-time control loops;
//! [`replay`] re-runs the policy offline for determinism checks; [`trace`]
//! emits structured decision records.

pub mod binding;
pub mod clock;
pub mod config;
pub mod error;
pub mod multi;
pub mod observer;
pub mod orchestrator;
pub mod policy;
pub mod replay;
pub mod store;
pub mod trace;
pub mod window;
pub mod workload;

pub use clock::{Clock, SystemClock, VirtualClock};
pub use config::{GovernorConfig, WorkloadConfig};
pub use error::{GovernorError, Result};
pub use multi::MultiWorkloadOrchestrator;
pub use orchestrator::SingleWorkloadOrchestrator;
pub use policy::{DecisionRecord, EnforcementDecision, PolicyState, PolicyStateData, RuleId};
pub use replay::{replay, verify_replay_determinism, ReplayInput, ReplayOutput};
pub use store::PolicyStore;
pub use trace::{JsonlTraceSink, TraceRecord, TraceSink};
pub use window::{WindowOrchestrator, WindowRecord};
pub use workload::WorkloadId;
