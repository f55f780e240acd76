//! Capability traits - external systems consumed by contract only

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::DomainError;

/// A templated outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRequest {
    /// Recipient address
    pub to: String,
    /// Provider-side template identifier
    pub template_id: String,
    /// Substitution variables for the template
    pub variables: HashMap<String, String>,
}

/// Mail transport capability. No delivery-receipt callback is modeled;
/// the call returns once the provider accepts or rejects the request.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, request: MailRequest) -> Result<(), DomainError>;
}

/// Durable file storage capability. Returns a public URL for the stored
/// object or a typed error; validation of size and content type happens
/// before this is called.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, DomainError>;
}
