//! Nightly audit history.
//!
//! The auditor job drops one `<date>.json` per run into the audit directory;
//! this store only reads them back, newest first.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use bullpen_model::{AuditOverview, AuditReport, AuditSnapshot};

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct AuditStore {
    dir: PathBuf,
}

impl AuditStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Latest report plus full history, newest first. Unparsable files are
    /// skipped; a missing directory means no audits have run yet.
    pub fn overview(&self) -> Result<AuditOverview, CoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AuditOverview::default()),
            Err(source) => {
                return Err(CoreError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut history = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Ok(raw) = fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str::<AuditReport>(&raw) {
                Ok(data) => history.push(AuditSnapshot {
                    date: data.date.clone(),
                    data,
                }),
                Err(e) => debug!(path = %path.display(), error = %e, "skipping unreadable audit file"),
            }
        }
        history.sort_by(|a, b| b.date.cmp(&a.date));
        let latest = history.first().map(|s| s.data.clone());
        Ok(AuditOverview { latest, history })
    }
}
