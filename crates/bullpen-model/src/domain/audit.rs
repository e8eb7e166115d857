use serde::{Deserialize, Serialize};

/// Severity of an audit section, or of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Ok,
    Warning,
    Critical,
}

/// One audited area within a nightly run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSection {
    pub name: String,
    pub status: AuditStatus,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One nightly audit run, as written by the auditor job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Calendar date the run covers, `YYYY-MM-DD`.
    pub date: String,
    /// When the auditor actually ran, as it recorded it.
    pub run_at: String,
    pub overall_status: AuditStatus,
    #[serde(default)]
    pub sections: Vec<AuditSection>,
    #[serde(default)]
    pub summary: String,
}

/// One history entry: the audit recorded for a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSnapshot {
    pub date: String,
    pub data: AuditReport,
}

/// Everything the audit view needs: the newest run plus history, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditOverview {
    pub latest: Option<AuditReport>,
    pub history: Vec<AuditSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serde_roundtrip() {
        let json = r#"{
            "date": "2026-08-06",
            "runAt": "2026-08-06T03:00:12Z",
            "overallStatus": "warning",
            "sections": [
                {"name": "disk", "status": "ok", "findings": []},
                {"name": "backups", "status": "warning", "findings": ["stale snapshot"], "notes": "older than 48h"}
            ],
            "summary": "one warning"
        }"#;
        let report: AuditReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.overall_status, AuditStatus::Warning);
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[1].notes.as_deref(), Some("older than 48h"));

        let out = serde_json::to_string(&report).unwrap();
        assert!(out.contains(r#""overallStatus":"warning""#));
    }

    #[test]
    fn sections_default_empty() {
        let report: AuditReport = serde_json::from_str(
            r#"{"date":"2026-08-06","runAt":"x","overallStatus":"ok"}"#,
        )
        .unwrap();
        assert!(report.sections.is_empty());
        assert!(report.summary.is_empty());
    }
}
