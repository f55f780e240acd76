//! Room handlers
//!
//! Endpoints for listing the caller's conversation rooms.

use axum::{extract::State, Json};
use talent_service::{RoomService, RoomSummaryResponse};

use crate::extractors::Identity;
use crate::response::ApiResult;
use crate::state::AppState;

/// List the caller's rooms with unread counts
///
/// GET /api/v1/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> ApiResult<Json<Vec<RoomSummaryResponse>>> {
    let service = RoomService::new(state.service_context());
    let rooms = service.list_rooms(&caller).await?;
    Ok(Json(rooms))
}
