//! Message handlers
//!
//! Endpoints for sending, listing, and marking messages read.

use axum::{
    extract::{Path, State},
    Json,
};
use talent_service::{
    MarkReadResponse, MessageResponse, MessageService, SendMessageRequest,
    StartConversationRequest,
};

use crate::extractors::{Identity, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Start (or reuse) a conversation and send the first message
///
/// POST /messages
pub async fn start_conversation(
    State(state): State<AppState>,
    Identity(caller): Identity,
    ValidatedJson(request): ValidatedJson<StartConversationRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.start_conversation(&caller, request).await?;
    Ok(Created(Json(response)))
}

/// Send a message into an existing room
///
/// POST /rooms/{room_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(room_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let response = service.send_to_room(&caller, room_id, request).await?;
    Ok(Created(Json(response)))
}

/// List messages in a room
///
/// GET /rooms/{room_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(room_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let messages = service
        .list_messages(&caller, room_id, &pagination.message_query())
        .await?;
    Ok(Json(messages))
}

/// Mark every inbound message in the room as read
///
/// POST /rooms/{room_id}/read
pub async fn mark_room_read(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(room_id): Path<String>,
) -> ApiResult<Json<MarkReadResponse>> {
    let room_id = room_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid room_id format"))?;

    let service = MessageService::new(state.service_context());
    let response = service.mark_room_read(&caller, room_id).await?;
    Ok(Json(response))
}
