use serde::{Deserialize, Serialize};

/// A schedulable unit of work bound to exactly one agent.
///
/// Created and edited by the external scheduler; the dashboard only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    /// Scheduler-internal agent id; may be an alias of a roster name.
    pub agent_id: String,
    /// Disabled jobs never contribute a liveness signal.
    #[serde(default)]
    pub enabled: bool,
}

/// The `jobs.json` document maintained by the scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRegistry {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

/// One line of a per-job append-only run log.
///
/// Only the timestamp matters to the dashboard; runner-specific fields are
/// ignored. A missing `ts` reads as zero, i.e. infinitely old.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunEvent {
    #[serde(default)]
    pub ts: u64,
}
