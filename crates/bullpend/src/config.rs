//! Environment-driven daemon configuration.
//!
//! Every knob is a `BULLPEN_*` variable with a default that points at a
//! usable local setup under `~/.bullpen`. Unparsable values fall back to the
//! default with a warning instead of refusing to start.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

const DEFAULT_GATEWAY_CMD: &str = "openclaw gateway status";
const DEFAULT_WORKING_WINDOW_SECS: u64 = 15 * 60;
const DEFAULT_IDLE_WINDOW_SECS: u64 = 12 * 60 * 60;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    /// Scheduler data: `jobs.json` plus `runs/*.jsonl`.
    pub cron_dir: PathBuf,
    pub board_path: PathBuf,
    pub reports_dir: PathBuf,
    pub audit_dir: PathBuf,
    pub workspace_dir: PathBuf,
    pub working_window: Duration,
    pub idle_window: Duration,
    /// Scheduler CLI invocation for the gateway probe; empty disables it.
    pub gateway_cmd: Vec<String>,
    pub log_level: String,
    pub log_format: String,
}

impl DaemonConfig {
    /// Read `BULLPEN_*` variables, falling back to defaults under
    /// `$BULLPEN_HOME` (itself defaulting to `~/.bullpen`).
    pub fn from_env() -> Self {
        let home = env::var("BULLPEN_HOME").map(PathBuf::from).unwrap_or_else(|_| {
            PathBuf::from(env::var("HOME").unwrap_or_default()).join(".bullpen")
        });

        Self {
            listen: parse_addr(env::var("BULLPEN_ADDR").ok()),
            cron_dir: path_or(env::var("BULLPEN_CRON_DIR").ok(), home.join("cron")),
            board_path: path_or(env::var("BULLPEN_BOARD").ok(), home.join("kanban.json")),
            reports_dir: path_or(env::var("BULLPEN_REPORTS_DIR").ok(), home.join("reports")),
            audit_dir: path_or(env::var("BULLPEN_AUDIT_DIR").ok(), home.join("audit")),
            workspace_dir: path_or(env::var("BULLPEN_WORKSPACE").ok(), home.join("workspace")),
            working_window: parse_window(
                env::var("BULLPEN_WORKING_WINDOW_SECS").ok(),
                DEFAULT_WORKING_WINDOW_SECS,
            ),
            idle_window: parse_window(
                env::var("BULLPEN_IDLE_WINDOW_SECS").ok(),
                DEFAULT_IDLE_WINDOW_SECS,
            ),
            gateway_cmd: parse_cmd(env::var("BULLPEN_GATEWAY_CMD").ok()),
            log_level: env::var("BULLPEN_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("BULLPEN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        }
    }
}

fn path_or(value: Option<String>, default: PathBuf) -> PathBuf {
    match value {
        Some(v) if !v.trim().is_empty() => PathBuf::from(v),
        _ => default,
    }
}

fn parse_addr(value: Option<String>) -> SocketAddr {
    let default = SocketAddr::from(([127, 0, 0, 1], 4001));
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(addr = %raw, "unparsable listen address, using default");
            default
        }),
        None => default,
    }
}

fn parse_window(value: Option<String>, default_secs: u64) -> Duration {
    let secs = value
        .as_deref()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(raw) = value {
                warn!(window = %raw, "unparsable window, using default");
            }
            default_secs
        });
    Duration::from_secs(secs)
}

fn parse_cmd(value: Option<String>) -> Vec<String> {
    let raw = value.unwrap_or_else(|| DEFAULT_GATEWAY_CMD.to_string());
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_falls_back_on_garbage() {
        assert_eq!(
            parse_addr(Some("not-an-addr".to_string())),
            SocketAddr::from(([127, 0, 0, 1], 4001))
        );
        assert_eq!(
            parse_addr(Some("0.0.0.0:8080".to_string())),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn windows_parse_seconds() {
        assert_eq!(
            parse_window(Some("600".to_string()), DEFAULT_WORKING_WINDOW_SECS),
            Duration::from_secs(600)
        );
        assert_eq!(
            parse_window(Some("soon".to_string()), DEFAULT_WORKING_WINDOW_SECS),
            Duration::from_secs(DEFAULT_WORKING_WINDOW_SECS)
        );
        assert_eq!(
            parse_window(None, DEFAULT_IDLE_WINDOW_SECS),
            Duration::from_secs(DEFAULT_IDLE_WINDOW_SECS)
        );
    }

    #[test]
    fn gateway_cmd_splits_on_whitespace() {
        let cmd = parse_cmd(None);
        assert_eq!(cmd, ["openclaw", "gateway", "status"]);

        let cmd = parse_cmd(Some("  ".to_string()));
        assert!(cmd.is_empty());
    }

    #[test]
    fn empty_path_override_keeps_default() {
        let fallback = PathBuf::from("/fallback");
        assert_eq!(path_or(Some(String::new()), fallback.clone()), fallback);
        assert_eq!(
            path_or(Some("/custom".to_string()), fallback),
            PathBuf::from("/custom")
        );
    }
}
