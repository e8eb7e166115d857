use std::collections::BTreeMap;

use async_trait::async_trait;

use bullpen_core::audit::AuditStore;
use bullpen_core::browse::WorkspaceBrowser;
use bullpen_core::cron::CronStore;
use bullpen_core::gateway::GatewayProbe;
use bullpen_core::kanban::BoardStore;
use bullpen_core::presence::{self, PresenceConfig};
use bullpen_core::reports::ReportStore;
use bullpen_core::system;
use bullpen_model::{
    AgentId, AgentReport, AgentStatus, AuditOverview, Board, Card, CardDraft, CardPatch,
    FileContent, FileNode, SystemInfo,
};

use crate::error::ApiError;
use crate::handler::DashboardHandler;

/// File-backed implementation of [`DashboardHandler`].
///
/// Holds no mutable state: every call re-reads the files it needs, so
/// overlapping requests never coordinate.
pub struct StoreAdapter {
    cron: CronStore,
    presence: PresenceConfig,
    board: BoardStore,
    reports: ReportStore,
    audit: AuditStore,
    browser: WorkspaceBrowser,
    gateway: GatewayProbe,
}

impl StoreAdapter {
    pub fn new(
        cron: CronStore,
        presence: PresenceConfig,
        board: BoardStore,
        reports: ReportStore,
        audit: AuditStore,
        browser: WorkspaceBrowser,
        gateway: GatewayProbe,
    ) -> Self {
        Self {
            cron,
            presence,
            board,
            reports,
            audit,
            browser,
            gateway,
        }
    }
}

#[async_trait]
impl DashboardHandler for StoreAdapter {
    async fn agent_statuses(&self) -> Result<BTreeMap<AgentId, AgentStatus>, ApiError> {
        let snap = self.cron.snapshot()?;
        Ok(presence::resolve(
            &snap.jobs,
            &snap.tails,
            system::now_ms(),
            &self.presence,
        ))
    }

    async fn board(&self) -> Result<Board, ApiError> {
        Ok(self.board.load()?)
    }

    async fn create_card(&self, draft: CardDraft) -> Result<Card, ApiError> {
        Ok(self.board.create(draft)?)
    }

    async fn update_card(&self, id: &str, patch: CardPatch) -> Result<Card, ApiError> {
        Ok(self.board.update(id, patch)?)
    }

    async fn delete_card(&self, id: &str) -> Result<(), ApiError> {
        Ok(self.board.delete(id)?)
    }

    async fn reports(&self) -> Result<Vec<AgentReport>, ApiError> {
        Ok(self.reports.all())
    }

    async fn audit(&self) -> Result<AuditOverview, ApiError> {
        Ok(self.audit.overview()?)
    }

    async fn file_tree(&self) -> Result<Vec<FileNode>, ApiError> {
        Ok(self.browser.tree()?)
    }

    async fn file_content(&self, path: &str) -> Result<FileContent, ApiError> {
        Ok(self.browser.content(path)?)
    }

    async fn system(&self) -> Result<SystemInfo, ApiError> {
        let gateway = self.gateway.status().await;
        Ok(system::system_info(gateway))
    }
}
