use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bullpen_core::system::now_ms;
use bullpen_model::{AgentId, AgentStatus, CardDraft, CardPatch, EpochMs};

use crate::{error::ApiError, handler::DashboardHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: DashboardHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /api/agent-status - Roster liveness map
    /// - GET /api/system - Host facts
    /// - GET /api/health - Liveness probe
    /// - GET/POST /api/kanban, PATCH/DELETE /api/kanban/:id - Board CRUD
    /// - GET /api/reports - Per-agent markdown reports
    /// - GET /api/audit - Nightly audit history
    /// - GET /api/files/tree, GET /api/files/content - Workspace browser
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/agent-status", get(agent_status::<H>))
            .route("/api/system", get(system::<H>))
            .route("/api/health", get(health))
            .route("/api/kanban", get(board::<H>))
            .route("/api/kanban", post(create_card::<H>))
            .route("/api/kanban/{id}", patch(update_card::<H>))
            .route("/api/kanban/{id}", delete(delete_card::<H>))
            .route("/api/reports", get(reports::<H>))
            .route("/api/audit", get(audit::<H>))
            .route("/api/files/tree", get(file_tree::<H>))
            .route("/api/files/content", get(file_content::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentStatusResponse {
    statuses: BTreeMap<AgentId, AgentStatus>,
    computed_at: EpochMs,
}

#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    ok: bool,
    ts: EpochMs,
}

#[derive(Debug, Deserialize)]
struct ContentParams {
    path: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/agent-status
async fn agent_status<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    let statuses = handler.agent_statuses().await?;
    debug!(agents = statuses.len(), "agent statuses resolved");

    Ok(Json(AgentStatusResponse {
        statuses,
        computed_at: now_ms(),
    }))
}

/// GET /api/system
async fn system<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    Ok(Json(handler.system().await?))
}

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        ts: now_ms(),
    })
}

/// GET /api/kanban
async fn board<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    Ok(Json(handler.board().await?))
}

/// POST /api/kanban
async fn create_card<H>(
    State(handler): State<Arc<H>>,
    Json(draft): Json<CardDraft>,
) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    if draft.title.trim().is_empty() {
        return Err(ApiError::InvalidRequest("title cannot be empty".into()));
    }

    debug!(title = %draft.title, assignee = %draft.assignee, "creating card");
    let card = handler.create_card(draft).await?;

    Ok((axum::http::StatusCode::CREATED, Json(card)))
}

/// PATCH /api/kanban/:id
async fn update_card<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
    Json(patch): Json<CardPatch>,
) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    if id.trim().is_empty() {
        return Err(ApiError::InvalidRequest("card id cannot be empty".into()));
    }
    if let Some(title) = &patch.title
        && title.trim().is_empty()
    {
        return Err(ApiError::InvalidRequest("title cannot be empty".into()));
    }

    let card = handler.update_card(&id, patch).await?;
    debug!(card = %id, "card updated");

    Ok(Json(card))
}

/// DELETE /api/kanban/:id
async fn delete_card<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    if id.trim().is_empty() {
        return Err(ApiError::InvalidRequest("card id cannot be empty".into()));
    }

    handler.delete_card(&id).await?;
    debug!(card = %id, "card deleted");

    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// GET /api/reports
async fn reports<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    Ok(Json(handler.reports().await?))
}

/// GET /api/audit
async fn audit<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    Ok(Json(handler.audit().await?))
}

/// GET /api/files/tree
async fn file_tree<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    Ok(Json(handler.file_tree().await?))
}

/// GET /api/files/content
///
/// Query params:
/// - ?path=rel/path - file path relative to the workspace root
async fn file_content<H>(
    State(handler): State<Arc<H>>,
    Query(params): Query<ContentParams>,
) -> Result<impl IntoResponse, ApiError>
where
    H: DashboardHandler,
{
    if params.path.trim().is_empty() {
        return Err(ApiError::InvalidRequest("path cannot be empty".into()));
    }

    debug!(path = %params.path, "reading workspace file");
    Ok(Json(handler.file_content(&params.path).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_envelope_uses_camel_case() {
        let mut statuses = BTreeMap::new();
        statuses.insert(AgentId::Scout, AgentStatus::Working);
        let body = AgentStatusResponse {
            statuses,
            computed_at: 1_754_000_000_000,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""computedAt":1754000000000"#));
        assert!(json.contains(r#""scout":"working""#));
    }
}
