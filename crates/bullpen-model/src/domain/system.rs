use serde::{Deserialize, Serialize};

/// Host facts reported by the system endpoint.
///
/// Memory and uptime come from the kernel on Linux and read as zero on
/// other platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Current wall time, RFC 3339.
    pub time: String,
    pub hostname: String,
    pub platform: String,
    pub arch: String,
    /// OS pretty-name where available, platform name otherwise.
    pub os: String,
    /// Host uptime in seconds.
    pub uptime: u64,
    pub freemem: u64,
    pub totalmem: u64,
    /// Scheduler gateway state, as condensed from its CLI output.
    pub gateway: String,
}
