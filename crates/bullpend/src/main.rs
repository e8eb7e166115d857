mod config;

use std::sync::Arc;

use anyhow::Context;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use bullpen_api::{HttpApi, StoreAdapter, axum};
use bullpen_core::audit::AuditStore;
use bullpen_core::browse::WorkspaceBrowser;
use bullpen_core::cron::CronStore;
use bullpen_core::gateway::GatewayProbe;
use bullpen_core::kanban::BoardStore;
use bullpen_core::presence::PresenceConfig;
use bullpen_core::reports::ReportStore;
use bullpen_observe::{LogConfig, LogFormat, log_init};

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = DaemonConfig::from_env();

    let format = cfg
        .log_format
        .parse::<LogFormat>()
        .with_context(|| format!("BULLPEN_LOG_FORMAT={}", cfg.log_format))?;
    log_init(&LogConfig {
        level: cfg.log_level.clone(),
        format,
        ..LogConfig::default()
    })
    .context("logger init")?;

    info!(
        listen = %cfg.listen,
        cron = %cfg.cron_dir.display(),
        workspace = %cfg.workspace_dir.display(),
        "bullpend starting"
    );

    let presence = PresenceConfig {
        working_window_ms: cfg.working_window.as_millis() as u64,
        idle_window_ms: cfg.idle_window.as_millis() as u64,
        ..PresenceConfig::default()
    };

    let (gateway_program, gateway_args) = match cfg.gateway_cmd.split_first() {
        Some((program, args)) => (program.clone(), args.to_vec()),
        None => (String::new(), Vec::new()),
    };

    let adapter = StoreAdapter::new(
        CronStore::new(&cfg.cron_dir),
        presence,
        BoardStore::new(&cfg.board_path),
        ReportStore::new(&cfg.reports_dir),
        AuditStore::new(&cfg.audit_dir),
        WorkspaceBrowser::new(&cfg.workspace_dir),
        GatewayProbe::new(gateway_program, gateway_args),
    );

    let app = HttpApi::new(Arc::new(adapter))
        .router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(cfg.listen)
        .await
        .with_context(|| format!("bind {}", cfg.listen))?;
    info!(addr = %cfg.listen, "dashboard api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("bullpend stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
