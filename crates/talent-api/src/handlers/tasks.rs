//! Task handlers
//!
//! Endpoints for the derived company task board and the candidate
//! unread summary.

use axum::{extract::State, Json};
use talent_service::{TaskBoardResponse, TaskService, UnreadSummaryResponse};

use crate::extractors::Identity;
use crate::response::ApiResult;
use crate::state::AppState;

/// Company task dashboard, recomputed per request
///
/// GET /api/v1/tasks
pub async fn get_task_board(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> ApiResult<Json<TaskBoardResponse>> {
    let service = TaskService::new(state.service_context());
    let board = service.company_task_board(&caller).await?;
    Ok(Json(board))
}

/// Candidate unread summary from the notification ledger
///
/// GET /api/v1/tasks/me
pub async fn get_unread_summary(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> ApiResult<Json<UnreadSummaryResponse>> {
    let service = TaskService::new(state.service_context());
    let summary = service.candidate_unread_summary(&caller).await?;
    Ok(Json(summary))
}
