//! Scheduler gateway probe.
//!
//! The gateway belongs to the external scheduler; the dashboard only shells
//! out to its CLI and condenses whatever comes back into a short state
//! string. Probe failures are a state, not an error.

use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GatewayProbe {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl GatewayProbe {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `running` when the CLI says so, otherwise its first output line;
    /// `error` when the probe can not run at all.
    pub async fn status(&self) -> String {
        if self.program.is_empty() {
            return "unknown".to_string();
        }

        let run = Command::new(&self.program).args(&self.args).output();
        let out = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => {
                debug!(program = %self.program, error = %e, "gateway probe failed to spawn");
                return "error".to_string();
            }
            Err(_) => {
                debug!(program = %self.program, "gateway probe timed out");
                return "error".to_string();
            }
        };

        let stdout = String::from_utf8_lossy(&out.stdout);
        let text = if stdout.trim().is_empty() {
            String::from_utf8_lossy(&out.stderr).trim().to_string()
        } else {
            stdout.trim().to_string()
        };

        if text.to_lowercase().contains("running") {
            "running".to_string()
        } else {
            text.lines().next().unwrap_or("unknown").to_string()
        }
    }
}
