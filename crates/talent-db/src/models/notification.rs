//! Unread notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for unread_notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub candidate_id: i64,
    pub message_id: i64,
    pub task_type: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NotificationModel {
    /// Check if the ledger row is still outstanding
    #[inline]
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}
