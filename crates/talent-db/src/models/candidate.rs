//! Candidate database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for candidates table (read-only in this subsystem)
#[derive(Debug, Clone, FromRow)]
pub struct CandidateModel {
    pub id: i64,
    pub email: String,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub notification_preference: Option<String>,
    pub created_at: DateTime<Utc>,
}
