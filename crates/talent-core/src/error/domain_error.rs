//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Room not found: {0}")]
    RoomNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Candidate not found: {0}")]
    CandidateNotFound(Snowflake),

    #[error("Job posting not found: {0}")]
    JobPostingNotFound(Snowflake),

    #[error("Company group not found: {0}")]
    CompanyGroupNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Attachment too large: {size} bytes (max {max})")]
    AttachmentTooLarge { size: usize, max: usize },

    #[error("Unsupported attachment type: {0}")]
    UnsupportedAttachmentType(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Caller is not a participant of this room")]
    NotRoomParticipant,

    #[error("Missing permission over company group: {0}")]
    MissingGroupPermission(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Mail error: {0}")]
    MailError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::CandidateNotFound(_) => "UNKNOWN_CANDIDATE",
            Self::JobPostingNotFound(_) => "UNKNOWN_JOB_POSTING",
            Self::CompanyGroupNotFound(_) => "UNKNOWN_COMPANY_GROUP",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::AttachmentTooLarge { .. } => "ATTACHMENT_TOO_LARGE",
            Self::UnsupportedAttachmentType(_) => "UNSUPPORTED_ATTACHMENT_TYPE",

            // Authorization
            Self::NotRoomParticipant => "NOT_ROOM_PARTICIPANT",
            Self::MissingGroupPermission(_) => "MISSING_GROUP_PERMISSION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::MailError(_) => "MAIL_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_)
                | Self::MessageNotFound(_)
                | Self::CandidateNotFound(_)
                | Self::JobPostingNotFound(_)
                | Self::CompanyGroupNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ContentTooLong { .. }
                | Self::AttachmentTooLarge { .. }
                | Self::UnsupportedAttachmentType(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotRoomParticipant | Self::MissingGroupPermission(_)
        )
    }
}
