//! Room database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for rooms table
#[derive(Debug, Clone, FromRow)]
pub struct RoomModel {
    pub id: i64,
    pub candidate_id: i64,
    pub company_group_id: i64,
    pub related_job_posting_id: Option<i64>,
    pub participant_company_users: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoomModel {
    /// Check if the room is scoped to a job posting
    #[inline]
    pub fn is_job_scoped(&self) -> bool {
        self.related_job_posting_id.is_some()
    }
}
