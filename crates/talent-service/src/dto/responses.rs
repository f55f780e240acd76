//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(
        data: Vec<T>,
        before: Option<String>,
        after: Option<String>,
        has_more: bool,
        limit: i32,
    ) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                after,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Cursor for fetching next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i32,
}

// ============================================================================
// Room Responses
// ============================================================================

/// Room listing entry: the room plus its unread count for the caller
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummaryResponse {
    pub id: String,
    pub candidate_id: String,
    pub company_group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_job_posting_id: Option<String>,
    /// Messages from the other party the caller has not read yet
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// A single message in a room feed
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub room_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub message_type: String,
    pub sender_type: String,
    pub sender_id: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    pub file_urls: Vec<String>,
}

/// Result of a mark-room-read call
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    /// Messages flipped from SENT to READ by this call
    pub messages_marked: u64,
}

// ============================================================================
// Task Responses
// ============================================================================

/// One summarized entry inside a task bucket
#[derive(Debug, Clone, Serialize)]
pub struct TaskEntryResponse {
    pub candidate_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub anchored_at: DateTime<Utc>,
}

/// A named task bucket: active flag plus up to five entries
#[derive(Debug, Clone, Serialize)]
pub struct TaskBucketResponse {
    /// Stable bucket identifier, e.g. `NEW_APPLICATION`
    pub kind: String,
    pub active: bool,
    pub entries: Vec<TaskEntryResponse>,
}

/// The company task dashboard, recomputed per request
#[derive(Debug, Clone, Serialize)]
pub struct TaskBoardResponse {
    pub no_job_postings: TaskBucketResponse,
    pub new_applications: TaskBucketResponse,
    pub overdue_applications: TaskBucketResponse,
    pub new_messages: TaskBucketResponse,
    pub overdue_messages: TaskBucketResponse,
    pub unregistered_interview_results: TaskBucketResponse,
}

/// Per-task-type unread count for a candidate
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub task_type: String,
    pub count: i64,
}

/// One unread ledger entry surfaced to a candidate
#[derive(Debug, Clone, Serialize)]
pub struct UnreadNotificationResponse {
    pub message_id: String,
    pub task_type: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate-side unread summary derived from the ledger
#[derive(Debug, Clone, Serialize)]
pub struct UnreadSummaryResponse {
    pub totals: Vec<UnreadCountResponse>,
    pub recent: Vec<UnreadNotificationResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}
