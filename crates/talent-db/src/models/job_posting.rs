//! Job posting database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for job_postings table (read-only in this subsystem)
#[derive(Debug, Clone, FromRow)]
pub struct JobPostingModel {
    pub id: i64,
    pub company_group_id: i64,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
