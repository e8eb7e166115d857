//! Agent liveness inference.
//!
//! Buckets every roster member into working / idle / offline from the
//! recency of its jobs' last run events. The resolver is a pure function:
//! callers inject the registry snapshot, the run-log tails and the current
//! time, so concurrent evaluations need no coordination.

use std::collections::{BTreeMap, HashMap};

use bullpen_model::{AgentId, AgentStatus, EpochMs, JobRecord, RunEvent};

/// Liveness windows and the scheduler-internal alias table.
///
/// `working_window_ms` must stay below `idle_window_ms`. Both windows and
/// the alias table are injected configuration; the resolver itself carries
/// no naming or threshold policy.
#[derive(Debug, Clone)]
pub struct PresenceConfig {
    /// A run newer than this makes its agent `working`.
    pub working_window_ms: u64,
    /// A run newer than this, but outside the working window, makes its
    /// agent `idle`. Anything older means `offline`.
    pub idle_window_ms: u64,
    /// Scheduler-internal agent ids mapped to public roster names.
    pub aliases: HashMap<String, String>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        let mut aliases = HashMap::new();
        aliases.insert("main".to_string(), AgentId::Fred.as_str().to_string());
        Self {
            working_window_ms: 15 * 60 * 1000,
            idle_window_ms: 12 * 60 * 60 * 1000,
            aliases,
        }
    }
}

impl PresenceConfig {
    /// Resolve a registry agent id to a roster member, via the alias table.
    pub fn roster_id(&self, raw: &str) -> Option<AgentId> {
        let name = self.aliases.get(raw).map(String::as_str).unwrap_or(raw);
        AgentId::from_name(name)
    }
}

/// Compute the status of every roster member.
///
/// Disabled jobs, unresolvable agent ids and jobs without a parsable last
/// run contribute nothing. An agent with several jobs is classified by the
/// most recent run across all of them, so the ages are aggregated before a
/// single classification per agent.
pub fn resolve(
    jobs: &[JobRecord],
    tails: &HashMap<String, Option<RunEvent>>,
    now: EpochMs,
    cfg: &PresenceConfig,
) -> BTreeMap<AgentId, AgentStatus> {
    let mut min_age: BTreeMap<AgentId, u64> = BTreeMap::new();

    for job in jobs {
        if !job.enabled {
            continue;
        }
        let Some(agent) = cfg.roster_id(&job.agent_id) else {
            continue;
        };
        let Some(Some(event)) = tails.get(&job.id) else {
            continue;
        };
        // A future timestamp (clock skew) clamps to age zero.
        let age = now.saturating_sub(event.ts);
        min_age
            .entry(agent)
            .and_modify(|a| *a = (*a).min(age))
            .or_insert(age);
    }

    let mut statuses = BTreeMap::new();
    for agent in AgentId::ALL {
        let status = match min_age.get(&agent) {
            Some(&age) if age < cfg.working_window_ms => AgentStatus::Working,
            Some(&age) if age < cfg.idle_window_ms => AgentStatus::Idle,
            _ => AgentStatus::Offline,
        };
        statuses.insert(agent, status);
    }
    statuses
}
