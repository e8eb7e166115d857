//! Snapshots of the scheduler's job registry and run logs.
//!
//! Layout: `<dir>/jobs.json` plus `<dir>/runs/<jobId>.jsonl`, both owned by
//! the external scheduler. Partial or missing telemetry is the steady state
//! for a dashboard, so everything here degrades to "no signal" instead of
//! failing; only a filesystem fault beyond a missing file is surfaced.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use bullpen_model::{JobRecord, RunEvent};

use crate::error::CoreError;

/// One point-in-time read of the registry plus each enabled job's last run.
#[derive(Debug, Default)]
pub struct CronSnapshot {
    pub jobs: Vec<JobRecord>,
    /// Keyed by job id; `None` when the log is missing, empty, or its last
    /// line does not parse.
    pub tails: HashMap<String, Option<RunEvent>>,
}

/// Reader over the scheduler's cron directory.
#[derive(Debug, Clone)]
pub struct CronStore {
    dir: PathBuf,
}

impl CronStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.dir.join("jobs.json")
    }

    fn run_log_path(&self, job_id: &str) -> PathBuf {
        self.dir.join("runs").join(format!("{job_id}.jsonl"))
    }

    /// Read the registry and the run-log tail of every enabled job.
    pub fn snapshot(&self) -> Result<CronSnapshot, CoreError> {
        let jobs = self.read_registry()?;
        let mut tails = HashMap::new();
        for job in jobs.iter().filter(|j| j.enabled) {
            tails.insert(job.id.clone(), self.read_tail(&job.id)?);
        }
        Ok(CronSnapshot { jobs, tails })
    }

    /// Registry entries, element-wise lenient: a document that is not JSON
    /// counts as empty, and entries that fail to decode are dropped one by
    /// one so a single bad record can not poison the rest.
    fn read_registry(&self) -> Result<Vec<JobRecord>, CoreError> {
        let path = self.jobs_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no job registry, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(CoreError::Io { path, source }),
        };

        let doc: Value = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable job registry");
                return Ok(Vec::new());
            }
        };
        let entries = doc
            .get("jobs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(entries
            .into_iter()
            .filter_map(|v| serde_json::from_value::<JobRecord>(v).ok())
            .collect())
    }

    /// Last non-empty line of the job's run log, if it parses. A parse
    /// failure on that line is no signal, not an error; earlier lines are
    /// never consulted.
    fn read_tail(&self, job_id: &str) -> Result<Option<RunEvent>, CoreError> {
        let path = self.run_log_path(job_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CoreError::Io { path, source }),
        };
        let Some(line) = raw.lines().rev().find(|l| !l.trim().is_empty()) else {
            return Ok(None);
        };
        match serde_json::from_str::<RunEvent>(line) {
            Ok(event) => Ok(Some(event)),
            Err(e) => {
                debug!(job = job_id, error = %e, "unparsable run-log tail");
                Ok(None)
            }
        }
    }
}
