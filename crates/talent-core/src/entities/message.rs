//! Message entity and its read-state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Kind of message within a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Scout,
    Application,
    General,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scout => "SCOUT",
            Self::Application => "APPLICATION",
            Self::General => "GENERAL",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCOUT" => Ok(Self::Scout),
            "APPLICATION" => Ok(Self::Application),
            "GENERAL" => Ok(Self::General),
            other => Err(DomainError::ValidationError(format!(
                "invalid message type: {other}"
            ))),
        }
    }
}

/// Which side of the conversation authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderType {
    Candidate,
    CompanyUser,
}

impl SenderType {
    /// The other side of the conversation
    pub fn opposite(&self) -> Self {
        match self {
            Self::Candidate => Self::CompanyUser,
            Self::CompanyUser => Self::Candidate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candidate => "CANDIDATE",
            Self::CompanyUser => "COMPANY_USER",
        }
    }
}

impl std::fmt::Display for SenderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SenderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CANDIDATE" => Ok(Self::Candidate),
            "COMPANY_USER" => Ok(Self::CompanyUser),
            other => Err(DomainError::ValidationError(format!(
                "invalid sender type: {other}"
            ))),
        }
    }
}

/// Message author: exactly one of the two sides, with its identity.
///
/// Modeled as an enum so "sender_candidate_id xor sender_company_group_id"
/// holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSender {
    Candidate(Snowflake),
    CompanyGroup(Snowflake),
}

impl MessageSender {
    pub fn sender_type(&self) -> SenderType {
        match self {
            Self::Candidate(_) => SenderType::Candidate,
            Self::CompanyGroup(_) => SenderType::CompanyUser,
        }
    }

    pub fn candidate_id(&self) -> Option<Snowflake> {
        match self {
            Self::Candidate(id) => Some(*id),
            Self::CompanyGroup(_) => None,
        }
    }

    pub fn company_group_id(&self) -> Option<Snowflake> {
        match self {
            Self::CompanyGroup(id) => Some(*id),
            Self::Candidate(_) => None,
        }
    }
}

/// Read-state of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Sent,
    Read,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "SENT",
            Self::Read => "READ",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SENT" => Ok(Self::Sent),
            "READ" => Ok(Self::Read),
            other => Err(DomainError::ValidationError(format!(
                "invalid message status: {other}"
            ))),
        }
    }
}

/// Message entity
///
/// Invariant: `read_at.is_some()` if and only if `status == Read`, and the
/// only transition is Sent -> Read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub room_id: Snowflake,
    pub subject: Option<String>,
    pub content: String,
    pub message_type: MessageType,
    pub sender: MessageSender,
    pub status: MessageStatus,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    /// Attachment URLs, in upload order
    pub file_urls: Vec<String>,
}

impl Message {
    /// Create a new Message in state Sent
    pub fn new(
        id: Snowflake,
        room_id: Snowflake,
        sender: MessageSender,
        message_type: MessageType,
        content: String,
        subject: Option<String>,
        file_urls: Vec<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            room_id,
            subject,
            content,
            message_type,
            sender,
            status: MessageStatus::Sent,
            sent_at,
            read_at: None,
            file_urls,
        }
    }

    #[inline]
    pub fn sender_type(&self) -> SenderType {
        self.sender.sender_type()
    }

    #[inline]
    pub fn is_read(&self) -> bool {
        self.status == MessageStatus::Read
    }

    /// Mark the message read. Idempotent: re-reading keeps the original
    /// `read_at` and never moves the state backwards.
    pub fn mark_read(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_read() {
            return false;
        }
        self.status = MessageStatus::Read;
        self.read_at = Some(now);
        true
    }

    /// Get a truncated preview of the content (for notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }

}
