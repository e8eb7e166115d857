use std::collections::BTreeMap;

use async_trait::async_trait;

use bullpen_model::{
    AgentId, AgentReport, AgentStatus, AuditOverview, Board, Card, CardDraft, CardPatch,
    FileContent, FileNode, SystemInfo,
};

use crate::error::ApiError;

/// Dashboard backend surface.
///
/// This trait abstracts the file-backed stores so the HTTP layer stays
/// transport-only. The provided [`StoreAdapter`](crate::StoreAdapter) is the
/// stock implementation; custom handlers can wrap it for auth or caching.
#[async_trait]
pub trait DashboardHandler: Send + Sync + 'static {
    /// Current liveness of every roster member, recomputed from a fresh
    /// registry/run-log snapshot.
    async fn agent_statuses(&self) -> Result<BTreeMap<AgentId, AgentStatus>, ApiError>;

    async fn board(&self) -> Result<Board, ApiError>;
    async fn create_card(&self, draft: CardDraft) -> Result<Card, ApiError>;
    async fn update_card(&self, id: &str, patch: CardPatch) -> Result<Card, ApiError>;
    async fn delete_card(&self, id: &str) -> Result<(), ApiError>;

    async fn reports(&self) -> Result<Vec<AgentReport>, ApiError>;
    async fn audit(&self) -> Result<AuditOverview, ApiError>;

    async fn file_tree(&self) -> Result<Vec<FileNode>, ApiError>;
    async fn file_content(&self, path: &str) -> Result<FileContent, ApiError>;

    async fn system(&self) -> Result<SystemInfo, ApiError>;
}
