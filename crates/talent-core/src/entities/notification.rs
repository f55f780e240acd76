//! Unread notification ledger entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::MessageType;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Task category carried by a ledger row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    ScoutMessageUnread,
    ApplicationMessageUnread,
    GeneralMessageUnread,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScoutMessageUnread => "SCOUT_MESSAGE_UNREAD",
            Self::ApplicationMessageUnread => "APPLICATION_MESSAGE_UNREAD",
            Self::GeneralMessageUnread => "GENERAL_MESSAGE_UNREAD",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCOUT_MESSAGE_UNREAD" => Ok(Self::ScoutMessageUnread),
            "APPLICATION_MESSAGE_UNREAD" => Ok(Self::ApplicationMessageUnread),
            "GENERAL_MESSAGE_UNREAD" => Ok(Self::GeneralMessageUnread),
            other => Err(DomainError::ValidationError(format!(
                "invalid task type: {other}"
            ))),
        }
    }
}

impl From<MessageType> for TaskType {
    fn from(message_type: MessageType) -> Self {
        match message_type {
            MessageType::Scout => Self::ScoutMessageUnread,
            MessageType::Application => Self::ApplicationMessageUnread,
            MessageType::General => Self::GeneralMessageUnread,
        }
    }
}

/// Unread notification entity
///
/// A derived index row marking a message as outstanding for one
/// candidate. Exactly one row exists per candidate-targeted message; it
/// is created at send time and its `read_at` is populated when the room
/// is marked read. Never deleted: the ledger is rebuildable from
/// messages, so rows only accumulate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadNotification {
    pub id: Snowflake,
    pub candidate_id: Snowflake,
    pub message_id: Snowflake,
    pub task_type: TaskType,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UnreadNotification {
    /// Create a ledger row for a freshly sent message
    pub fn new(
        id: Snowflake,
        candidate_id: Snowflake,
        message_id: Snowflake,
        message_type: MessageType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            candidate_id,
            message_id,
            task_type: TaskType::from(message_type),
            read_at: None,
            created_at,
        }
    }

    #[inline]
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    /// Populate `read_at`, keeping the earliest timestamp on repeat calls
    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        if self.read_at.is_none() {
            self.read_at = Some(now);
        }
    }
}
