//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, messages, rooms, tasks};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (mounted outside /api/v1)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(room_routes())
        .merge(message_routes())
        .merge(task_routes())
}

/// Room routes
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms/:room_id/messages", get(messages::get_messages))
        .route("/rooms/:room_id/messages", post(messages::send_message))
        .route("/rooms/:room_id/read", post(messages::mark_room_read))
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new().route("/messages", post(messages::start_conversation))
}

/// Task routes
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(tasks::get_task_board))
        .route("/tasks/me", get(tasks::get_unread_summary))
}
