//! Host facts for the system endpoint, plus the shared wall clock.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use bullpen_model::{EpochMs, SystemInfo};

/// Current wall clock in epoch milliseconds.
pub fn now_ms() -> EpochMs {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as EpochMs
}

/// Snapshot of host facts. The gateway state is probed separately and
/// passed in, since it belongs to the external scheduler.
pub fn system_info(gateway: String) -> SystemInfo {
    let (uptime, freemem, totalmem) = host_stats();
    SystemInfo {
        time: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
        hostname: hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string()),
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        os: os_pretty_name(),
        uptime,
        freemem,
        totalmem,
        gateway,
    }
}

/// OS pretty-name from `/etc/os-release` on Linux, platform name otherwise.
fn os_pretty_name() -> String {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string("/etc/os-release") {
            for line in content.lines() {
                if let Some(name) = line.strip_prefix("PRETTY_NAME=") {
                    return name.trim_matches('"').to_string();
                }
            }
        }
    }

    std::env::consts::OS.to_string()
}

/// Host uptime (seconds) and free/total memory (bytes) from the kernel.
#[cfg(target_os = "linux")]
fn host_stats() -> (u64, u64, u64) {
    // SAFETY: sysinfo only fills the struct it is handed.
    let mut info: libc::sysinfo = unsafe { std::mem::zeroed() };
    if unsafe { libc::sysinfo(&mut info) } != 0 {
        return (0, 0, 0);
    }
    let unit = u64::from(info.mem_unit.max(1));
    (
        info.uptime.max(0) as u64,
        info.freeram as u64 * unit,
        info.totalram as u64 * unit,
    )
}

#[cfg(not(target_os = "linux"))]
fn host_stats() -> (u64, u64, u64) {
    (0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ms_is_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
        assert!(a > 1_600_000_000_000);
    }

    #[test]
    fn snapshot_has_the_basics() {
        let info = system_info("unknown".to_string());
        assert!(!info.hostname.is_empty());
        assert_eq!(info.platform, std::env::consts::OS);
        assert!(info.time.contains('T'));
        assert_eq!(info.gateway, "unknown");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_reports_memory() {
        let info = system_info(String::new());
        assert!(info.totalmem > 0);
        assert!(info.uptime > 0);
    }
}
