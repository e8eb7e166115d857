use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{LogConfig, LogFormat};
use crate::error::LogError;

/// Install the global subscriber described by `cfg`. Call once, early.
pub fn log_init(cfg: &LogConfig) -> Result<(), LogError> {
    let filter = mk_filter(&cfg.level)?;
    match cfg.format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_ansi(cfg.use_color)
                .with_target(cfg.with_targets)
                .with_timer(mk_timer());
            init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(mk_timer());
            init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
        LogFormat::Journald => mk_journald(filter),
    }
}

fn mk_filter(level: &str) -> Result<EnvFilter, LogError> {
    EnvFilter::try_new(level).map_err(|_| LogError::InvalidLevel(level.to_string()))
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn init_with<S>(subscriber: S) -> Result<(), LogError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|e| {
        let s = e.to_string();
        if s.contains("SetGlobalDefaultError") {
            LogError::AlreadyInitialized
        } else {
            LogError::InitFailed(s)
        }
    })
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn mk_journald(filter: EnvFilter) -> Result<(), LogError> {
    let journald = tracing_journald::layer()
        .map_err(|e| LogError::InitFailed(format!("journald: {e}")))?;
    init_with(tracing_subscriber::registry().with(filter).with(journald))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn mk_journald(_filter: EnvFilter) -> Result<(), LogError> {
    Err(LogError::JournaldNotSupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_level_is_rejected_before_install() {
        let cfg = LogConfig {
            level: "info=debug=trace".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(log_init(&cfg), Err(LogError::InvalidLevel(_))));
    }
}
