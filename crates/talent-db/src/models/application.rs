//! Application database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for applications table (read-only in this subsystem)
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub candidate_id: i64,
    pub job_posting_id: i64,
    pub company_group_id: i64,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
