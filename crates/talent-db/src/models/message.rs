//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub room_id: i64,
    pub subject: Option<String>,
    pub content: String,
    pub message_type: String,
    pub sender_type: String,
    pub sender_candidate_id: Option<i64>,
    pub sender_company_group_id: Option<i64>,
    pub status: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub file_urls: Vec<String>,
}
