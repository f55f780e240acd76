//! Candidate lead row - message joined with candidate and posting

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Joined row backing the message task buckets: a candidate-authored
/// message with the candidate's name parts and the room's posting title
#[derive(Debug, Clone, FromRow)]
pub struct CandidateLeadModel {
    pub room_id: i64,
    pub candidate_id: i64,
    pub email: String,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub job_title: Option<String>,
    pub anchored_at: DateTime<Utc>,
}
