//! Repository traits - persistence contracts for the domain
//!
//! Implemented against PostgreSQL in the db crate and against in-memory
//! stores in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::entities::{
    Application, Candidate, CompanyGroup, JobPosting, Message, Room, SenderType, TaskType,
    UnreadNotification,
};
use crate::error::DomainError;
use crate::tasks::CandidateLead;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Cursor query for message feeds
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Return messages before this message ID
    pub before: Option<Snowflake>,
    /// Return messages after this message ID
    pub after: Option<Snowflake>,
    /// Maximum number of messages to return
    pub limit: i64,
}

impl MessageQuery {
    pub fn latest(limit: i64) -> Self {
        Self {
            before: None,
            after: None,
            limit,
        }
    }
}

/// Room persistence operations
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> RepoResult<()>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>>;

    /// Look up the room for a (candidate, company group, job posting?)
    /// triple. Rooms are unique per triple.
    async fn find_by_participants(
        &self,
        candidate_id: Snowflake,
        company_group_id: Snowflake,
        related_job_posting_id: Option<Snowflake>,
    ) -> RepoResult<Option<Room>>;

    /// Rooms for a candidate, most recently updated first
    async fn list_for_candidate(&self, candidate_id: Snowflake) -> RepoResult<Vec<Room>>;

    /// Rooms for a set of company groups, most recently updated first
    async fn list_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<Vec<Room>>;

    /// Append a company-side participant if not already present
    async fn add_participant(
        &self,
        room_id: Snowflake,
        company_user_id: Snowflake,
    ) -> RepoResult<()>;

    /// Bump the room's recency timestamp
    async fn touch(&self, room_id: Snowflake, now: DateTime<Utc>) -> RepoResult<()>;
}

/// Message persistence operations
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &Message) -> RepoResult<()>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Messages in a room ordered by send time, ties broken by id
    async fn list_by_room(&self, room_id: Snowflake, query: &MessageQuery)
        -> RepoResult<Vec<Message>>;

    /// Flip every SENT message in the room authored by `sender_type` to
    /// READ, evaluated against database state at call time. Returns the
    /// ids of the messages that actually changed.
    async fn mark_room_read(
        &self,
        room_id: Snowflake,
        sender_type: SenderType,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Snowflake>>;

    /// Unread (SENT) messages in the room authored by `sender_type`
    async fn count_unread(&self, room_id: Snowflake, sender_type: SenderType) -> RepoResult<i64>;

    /// Candidate-authored, not-yet-processed messages across the given
    /// groups' rooms, joined with candidate name and posting title
    async fn find_candidate_leads(&self, group_ids: &[Snowflake])
        -> RepoResult<Vec<CandidateLead>>;
}

/// Unread notification ledger operations
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a ledger row. At most one row exists per message; a repeat
    /// insert for the same message is a no-op.
    async fn create(&self, notification: &UnreadNotification) -> RepoResult<()>;

    /// Populate `read_at` on unread rows for the given messages.
    /// Returns the number of rows that changed.
    async fn mark_read_for_messages(
        &self,
        message_ids: &[Snowflake],
        now: DateTime<Utc>,
    ) -> RepoResult<u64>;

    /// Unread ledger rows for a candidate, most recent first
    async fn list_unread_for_candidate(
        &self,
        candidate_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<UnreadNotification>>;

    /// Unread counts per task type for a candidate
    async fn count_unread_by_type(
        &self,
        candidate_id: Snowflake,
    ) -> RepoResult<Vec<(TaskType, i64)>>;
}

/// Read-only access to applications, owned by the application flow
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Applications with status SENT for the given groups
    async fn list_sent_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<Vec<Application>>;

    /// Applications with status RESPONDED for the given groups
    async fn list_responded_for_groups(
        &self,
        group_ids: &[Snowflake],
    ) -> RepoResult<Vec<Application>>;
}

/// Read-only access to job postings
#[async_trait]
pub trait JobPostingRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JobPosting>>;

    /// Number of active (published or pending-approval) postings
    async fn count_active_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<i64>;

    /// Posting titles for a set of ids
    async fn titles_by_ids(&self, ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, String>>;
}

/// Read-only access to candidates
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Candidate>>;

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Candidate>>;
}

/// Read-only access to company groups
#[async_trait]
pub trait CompanyGroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CompanyGroup>>;
}
