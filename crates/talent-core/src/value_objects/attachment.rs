//! Attachment upload policy
//!
//! Validation applied to attachment payloads before any upload or message
//! write happens (fail closed).

use crate::error::DomainError;

/// Maximum attachment size: 5 MiB
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Allow-listed MIME types for attachments
const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/png",
    "image/jpg",
    "image/jpeg",
    "image/gif",
    "text/plain",
];

/// Attachment validation policy
///
/// Constructed once and shared; kept as a type (rather than free
/// functions) so a future per-tenant policy can carry its own limits.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentPolicy {
    max_bytes: usize,
}

impl AttachmentPolicy {
    pub const fn new() -> Self {
        Self {
            max_bytes: MAX_ATTACHMENT_BYTES,
        }
    }

    /// Maximum allowed size in bytes
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Check whether a MIME type is allow-listed
    pub fn is_allowed_content_type(content_type: &str) -> bool {
        ALLOWED_CONTENT_TYPES.contains(&content_type)
    }

    /// Validate a single attachment payload before upload
    pub fn validate(&self, content_type: &str, size: usize) -> Result<(), DomainError> {
        if size > self.max_bytes {
            return Err(DomainError::AttachmentTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        if !Self::is_allowed_content_type(content_type) {
            return Err(DomainError::UnsupportedAttachmentType(
                content_type.to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::new()
    }
}
