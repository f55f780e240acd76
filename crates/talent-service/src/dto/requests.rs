//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use talent_core::MessageType;
use validator::Validate;

// ============================================================================
// Message Requests
// ============================================================================

/// Send a message into an existing room
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,

    pub message_type: MessageType,

    /// Base64-encoded attachments, validated and stored before the
    /// message row is written
    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<AttachmentPayload>,
}

/// One uploaded attachment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachmentPayload {
    #[validate(length(min = 1, max = 255, message = "Filename must be 1-255 characters"))]
    pub filename: String,

    #[validate(length(min = 1, message = "Content type is required"))]
    pub content_type: String,

    /// Base64-encoded file content
    pub data: String,
}

/// Open (or reuse) a conversation with a counterpart and send the first
/// message. The room for the (candidate, company group, job posting?)
/// triple is created lazily if it does not exist yet.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartConversationRequest {
    /// Candidate id when the caller is company-side, company group id
    /// when the caller is a candidate. Snowflake string.
    pub counterpart_id: String,

    /// Optional job posting the conversation is scoped to
    pub related_job_posting_id: Option<String>,

    #[validate(nested)]
    pub message: SendMessageRequest,
}
