//! Per-agent markdown status reports.

use std::fs;
use std::path::PathBuf;

use time::OffsetDateTime;

use bullpen_model::{AgentId, AgentReport};

/// Reads `<dir>/<agent>.md` for every roster member.
///
/// Reports are written by the agents themselves on their own schedule, so a
/// missing file is normal and just renders as an empty card.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// One report per roster member, in roster order.
    pub fn all(&self) -> Vec<AgentReport> {
        AgentId::ALL.into_iter().map(|a| self.for_agent(a)).collect()
    }

    fn for_agent(&self, agent: AgentId) -> AgentReport {
        let path = self.dir.join(format!("{agent}.md"));
        let content = fs::read_to_string(&path).ok();
        let mtime = fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(OffsetDateTime::from);
        AgentReport {
            agent: agent.as_str().to_string(),
            emoji: agent.emoji().to_string(),
            exists: content.is_some(),
            content: content.unwrap_or_default(),
            mtime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_roster_member_gets_an_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scout.md"), "# Scout\nall quiet").unwrap();

        let reports = ReportStore::new(dir.path()).all();
        assert_eq!(reports.len(), AgentId::ALL.len());

        let scout = reports.iter().find(|r| r.agent == "scout").unwrap();
        assert!(scout.exists);
        assert!(scout.content.contains("all quiet"));
        assert!(scout.mtime.is_some());

        let dusty = reports.iter().find(|r| r.agent == "dusty").unwrap();
        assert!(!dusty.exists);
        assert!(dusty.content.is_empty());
        assert!(dusty.mtime.is_none());
    }

    #[test]
    fn missing_dir_yields_all_missing() {
        let reports = ReportStore::new("/definitely/not/here").all();
        assert!(reports.iter().all(|r| !r.exists));
    }
}
