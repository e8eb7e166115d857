use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One agent's markdown status report, as served to the reports view.
///
/// A roster member without a report file still gets an entry, with
/// `exists: false` and empty content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReport {
    pub agent: String,
    pub emoji: String,
    pub content: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub mtime: Option<OffsetDateTime>,
    pub exists: bool,
}
